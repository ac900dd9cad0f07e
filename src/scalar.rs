use eyre::Result;

use crate::cursor::CursorLike;
use crate::value::Value;

/// The column an extractor reads. Either the ordinal or the name is
/// consulted, never both.
#[derive(Debug, Clone)]
enum Locator {
    Ordinal(usize),
    Named(String),
}

/// Pulls a single column value out of the next available row.
///
/// The extractor always operates on "the next row" of whatever cursor
/// it is handed; it keeps no row state of its own and buffers nothing.
/// Its configuration is fixed at construction, so one instance can be
/// shared across threads as long as every thread brings its own cursor.
#[derive(Debug, Clone)]
pub struct ScalarExtractor {
    locator: Locator,
}

impl Default for ScalarExtractor {
    fn default() -> Self {
        Self::at(1)
    }
}

impl ScalarExtractor {
    /// Extractor for the first column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor for a 1-based column ordinal.
    pub fn at(ordinal: usize) -> Self {
        ScalarExtractor {
            locator: Locator::Ordinal(ordinal),
        }
    }

    /// Extractor for a named column.
    pub fn named(name: impl Into<String>) -> Self {
        ScalarExtractor {
            locator: Locator::Named(name.into()),
        }
    }

    /// Advance `cursor` by one row and read the configured column.
    ///
    /// Returns `Ok(None)` when the cursor has no further row. That is
    /// the regular empty-result contract, not a failure. Converting the
    /// returned [`Value`] to the expected type is up to the caller; a
    /// data-access error from the cursor is passed through unchanged.
    pub fn extract<Cursor: CursorLike>(&self, cursor: &mut Cursor) -> Result<Option<Value>> {
        if !cursor.advance()? {
            return Ok(None);
        }
        let value = match &self.locator {
            Locator::Ordinal(ordinal) => cursor.value_at(*ordinal)?,
            Locator::Named(name) => cursor.value_named(name)?,
        };
        Ok(Some(value))
    }
}
