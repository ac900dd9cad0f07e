//! # Row mapping helpers on top of a relational result cursor
//!
//! This crate reduces the boilerplate of turning query result rows into
//! scalars and record values. It owns neither the connection nor the
//! statement; the caller hands it a live, forward-only cursor and keeps
//! the lifecycle.
//!
//! It contains the following modules:
//!
//! ## cursor
//!
//! The [`CursorLike`] trait. Everything in this crate is written against
//! it, so any driver that can report column metadata, step one row
//! forward and read a column can be plugged in.
//!
//! ## mapping
//!
//! [`ColumnMap`], the column-to-field lookup table. Columns are matched
//! against an ordered list of field names with a generous comparison that
//! ignores case, underscores and spaces, so a `user_id` column finds a
//! `userId` field without any configuration.
//!
//! ## scalar
//!
//! [`ScalarExtractor`], which advances a cursor by one row and reads a
//! single configured column, reporting an empty result as `None` rather
//! than an error.
//!
//! ## rows
//!
//! [`RowIterator`] to walk the remaining rows of a cursor, and [`stream`]
//! to pump them over a channel from a worker thread.
//!
//! ## sqlite
//!
//! [`SqliteCursor`], the bundled [`CursorLike`] implementation for
//! `rusqlite`.

mod cursor;
mod mapping;
mod rows;
mod scalar;
mod sqlite;
mod value;

#[cfg(test)]
pub(crate) mod testing;

pub use cursor::CursorLike;
pub use mapping::ColumnMap;
pub use rows::{stream, RowIterator, RowMessage};
pub use scalar::ScalarExtractor;
pub use sqlite::SqliteCursor;
pub use value::{json_to_value, value_to_json, Value};

// Re-Export some dependencies so they don't
// need to be listed again in other Cargo tomls
pub use crossbeam_channel;
pub use eyre;
pub use serde_json;
pub use tracing;

// Tracing

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub fn setup_tracing() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "error")
    }

    let collector = tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stdout));

    tracing::subscriber::set_global_default(collector).expect("Unable to set a global collector");
}
