use eyre::Result;

use crate::value::Value;

/// A forward-only handle over the rows of an executed query.
///
/// The crate never executes SQL itself. The caller prepares and runs a
/// statement with whatever driver it uses, wraps the result in a type
/// implementing this trait and passes it in. [`SqliteCursor`] is the
/// bundled implementation for `rusqlite`.
///
/// Ordinals are 1-based throughout; ordinal 0 is never valid. A cursor
/// starts positioned *before* the first row, so a value can only be read
/// after [`advance`] returned `true`. Cursors are not expected to be
/// thread-safe; access to one cursor has to be serialized by its owner.
///
/// [`SqliteCursor`]: crate::SqliteCursor
/// [`advance`]: CursorLike::advance
pub trait CursorLike {
    /// Number of columns in the result shape.
    fn column_count(&self) -> Result<usize>;

    /// The preferred label of a column, e.g. the `AS` alias.
    ///
    /// `None` (or an empty string) means there is no label and the
    /// caller should fall back to [`CursorLike::column_name`].
    fn column_label(&self, ordinal: usize) -> Result<Option<String>>;

    /// The raw name of a column.
    fn column_name(&self, ordinal: usize) -> Result<String>;

    /// Step to the next row. Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool>;

    /// Read a column of the current row by ordinal.
    fn value_at(&self, ordinal: usize) -> Result<Value>;

    /// Read a column of the current row by name (case-insensitive).
    fn value_named(&self, name: &str) -> Result<Value>;
}
