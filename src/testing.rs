//! In-memory cursor stub for the unit tests.

use eyre::{bail, Result};

use crate::cursor::CursorLike;
use crate::value::Value;

/// Column metadata served by a [`StubCursor`].
pub(crate) struct Column {
    label: Option<String>,
    name: String,
    /// A broken column fails every metadata access.
    broken: bool,
}

impl Column {
    pub fn labeled(label: &str, name: &str) -> Self {
        Column {
            label: Some(label.to_string()),
            name: name.to_string(),
            broken: false,
        }
    }

    pub fn unlabeled(name: &str) -> Self {
        Column {
            label: None,
            name: name.to_string(),
            broken: false,
        }
    }

    pub fn broken() -> Self {
        Column {
            label: None,
            name: String::new(),
            broken: true,
        }
    }
}

/// Cursor over a fixed grid of values.
pub(crate) struct StubCursor {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
    next: usize,
    current: Option<usize>,
}

impl StubCursor {
    pub fn new(names: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let columns = names.iter().map(|name| Column::labeled(name, name)).collect();
        Self::with_columns(columns, rows)
    }

    pub fn with_columns(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        StubCursor {
            columns,
            rows,
            next: 0,
            current: None,
        }
    }

    fn column(&self, ordinal: usize) -> Result<&Column> {
        let column = match self.columns.get(ordinal.wrapping_sub(1)) {
            Some(column) => column,
            None => bail!("Column ordinal {} out of range", ordinal),
        };
        if column.broken {
            bail!("Broken column descriptor {}", ordinal);
        }
        Ok(column)
    }

    fn row(&self) -> Result<&[Value]> {
        match self.current {
            Some(index) => Ok(&self.rows[index]),
            None => bail!("No current row"),
        }
    }
}

impl CursorLike for StubCursor {
    fn column_count(&self) -> Result<usize> {
        Ok(self.columns.len())
    }

    fn column_label(&self, ordinal: usize) -> Result<Option<String>> {
        Ok(self.column(ordinal)?.label.clone())
    }

    fn column_name(&self, ordinal: usize) -> Result<String> {
        Ok(self.column(ordinal)?.name.clone())
    }

    fn advance(&mut self) -> Result<bool> {
        if self.next < self.rows.len() {
            self.current = Some(self.next);
            self.next += 1;
            Ok(true)
        } else {
            self.current = None;
            Ok(false)
        }
    }

    fn value_at(&self, ordinal: usize) -> Result<Value> {
        let row = self.row()?;
        match row.get(ordinal.wrapping_sub(1)) {
            Some(value) => Ok(value.clone()),
            None => bail!("Column ordinal {} out of range", ordinal),
        }
    }

    fn value_named(&self, name: &str) -> Result<Value> {
        let position = self
            .columns
            .iter()
            .position(|column| column.name.eq_ignore_ascii_case(name));
        match position {
            Some(index) => self.value_at(index + 1),
            None => bail!("No column named {}", name),
        }
    }
}
