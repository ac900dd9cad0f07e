use std::convert::TryFrom;
use std::fmt;

use eyre::{bail, eyre, Report, Result};

/// A single database value.
///
/// Cursors return values in this representation and the caller converts
/// them to the type it expects, either through the `as_*` accessors or
/// through the fallible `TryFrom` conversions below. Asking for the
/// wrong type is a caller mistake; the conversion reports it, nothing in
/// this crate tries to repair it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl TryFrom<Value> for i64 {
    type Error = Report;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Integer(n) => Ok(n),
            other => bail!("Expected an integer, found {:?}", &other),
        }
    }
}

impl TryFrom<Value> for usize {
    type Error = Report;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Integer(n) => Ok(n.try_into()?),
            other => bail!("Expected an integer, found {:?}", &other),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Report;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Real(n) => Ok(n),
            Value::Integer(n) => Ok(n as f64),
            other => bail!("Expected a real, found {:?}", &other),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Report;

    fn try_from(value: Value) -> Result<Self> {
        // SQLite convention, any non-zero integer is true
        match value {
            Value::Integer(n) => Ok(n != 0),
            other => bail!("Expected a boolean, found {:?}", &other),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Report;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => bail!("Expected text, found {:?}", &other),
        }
    }
}

/// Convert a JSON value into a database value.
///
/// Arrays and objects have no scalar representation and are rejected;
/// booleans become integers the way the drivers store them.
pub fn json_to_value(input: &serde_json::Value) -> Result<Value> {
    use serde_json::Value as Json;
    let ok = match input {
        Json::Null => Value::Null,
        Json::Bool(n) => Value::Integer(*n as i64),
        Json::Number(n) if n.is_i64() => {
            Value::Integer(n.as_i64().ok_or_else(|| eyre!("Invalid Number {:?}", n))?)
        }
        Json::Number(n) if n.is_u64() => {
            let value = n.as_u64().ok_or_else(|| eyre!("Invalid Number {:?}", n))?;
            let converted: i64 = value.try_into()?;
            Value::Integer(converted)
        }
        Json::Number(n) => {
            Value::Real(n.as_f64().ok_or_else(|| eyre!("Invalid Number {:?}", n))?)
        }
        Json::String(n) => Value::Text(n.clone()),
        _ => bail!("Invalid type: {}", &input),
    };
    Ok(ok)
}

/// The inverse of [`json_to_value`]. A `Real` that JSON cannot represent
/// (NaN, infinities) becomes `null`; blobs become arrays of numbers.
pub fn value_to_json(input: &Value) -> serde_json::Value {
    use serde_json::Value as Json;
    match input {
        Value::Null => Json::Null,
        Value::Integer(n) => Json::Number((*n).into()),
        Value::Real(n) => serde_json::Number::from_f64(*n)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::Text(s) => Json::String(s.clone()),
        Value::Blob(b) => Json::Array(b.iter().map(|byte| Json::Number((*byte).into())).collect()),
    }
}
