//! [`CursorLike`] implementation for `rusqlite`.

use eyre::{bail, Result};
use rusqlite::types;
use rusqlite::Rows;

use crate::cursor::CursorLike;
use crate::value::Value;

/// Cursor over the rows of a prepared `rusqlite` statement.
///
/// The driver invalidates row borrows on every step, so [`advance`]
/// copies the stepped row into an owned buffer that the value accessors
/// read from.
///
/// # Examples
///
/// ```ignore
/// let mut statement = connection.prepare("SELECT user_id, full_name FROM users")?;
/// let mut cursor = SqliteCursor::new(statement.query([])?)?;
/// while cursor.advance()? {
///     println!("{}", cursor.value_at(1)?);
/// }
/// ```
///
/// [`advance`]: CursorLike::advance
pub struct SqliteCursor<'stmt> {
    rows: Rows<'stmt>,
    columns: Vec<String>,
    current: Option<Vec<types::Value>>,
}

impl<'stmt> SqliteCursor<'stmt> {
    /// Wrap the result of `Statement::query`.
    pub fn new(rows: Rows<'stmt>) -> Result<Self> {
        let columns = match rows.as_ref() {
            Some(statement) => statement
                .column_names()
                .into_iter()
                .map(String::from)
                .collect(),
            None => bail!("Rows without an underlying statement"),
        };
        Ok(SqliteCursor {
            rows,
            columns,
            current: None,
        })
    }

    fn current_row(&self) -> Result<&[types::Value]> {
        match &self.current {
            Some(row) => Ok(row),
            None => bail!("No current row, `advance` has to return true first"),
        }
    }
}

impl<'stmt> CursorLike for SqliteCursor<'stmt> {
    fn column_count(&self) -> Result<usize> {
        Ok(self.columns.len())
    }

    // SQLite applies `AS` aliases directly to the column name, there
    // is no separate label to report.
    fn column_label(&self, ordinal: usize) -> Result<Option<String>> {
        Ok(Some(self.column_name(ordinal)?))
    }

    fn column_name(&self, ordinal: usize) -> Result<String> {
        match self.columns.get(ordinal.wrapping_sub(1)) {
            Some(name) => Ok(name.clone()),
            None => bail!("Column ordinal {} out of range", ordinal),
        }
    }

    fn advance(&mut self) -> Result<bool> {
        match self.rows.next()? {
            Some(row) => {
                let mut values = Vec::with_capacity(self.columns.len());
                for index in 0..self.columns.len() {
                    values.push(row.get::<usize, types::Value>(index)?);
                }
                self.current = Some(values);
                Ok(true)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    fn value_at(&self, ordinal: usize) -> Result<Value> {
        let row = self.current_row()?;
        match row.get(ordinal.wrapping_sub(1)) {
            Some(value) => Ok(Value::from(value.clone())),
            None => bail!("Column ordinal {} out of range", ordinal),
        }
    }

    fn value_named(&self, name: &str) -> Result<Value> {
        let position = self
            .columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name));
        match position {
            Some(index) => self.value_at(index + 1),
            None => bail!("No column named {}", name),
        }
    }
}

impl From<types::Value> for Value {
    fn from(value: types::Value) -> Self {
        match value {
            types::Value::Null => Value::Null,
            types::Value::Integer(n) => Value::Integer(n),
            types::Value::Real(n) => Value::Real(n),
            types::Value::Text(s) => Value::Text(s),
            types::Value::Blob(b) => Value::Blob(b),
        }
    }
}
