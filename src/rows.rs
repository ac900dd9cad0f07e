//! Walk the remaining rows of a cursor, either in place or from a
//! worker thread.
//!
//! [`stream`] opens a `crossbeam` `channel` and pumps every row through
//! it from a dedicated thread, so a blocking cursor can be consumed
//! without blocking the caller. The worker performs exactly the same
//! single row step as the synchronous iterator; dropping the receiver
//! stops it at the next send.

use std::thread::JoinHandle;

use crossbeam_channel::{unbounded, Receiver, Sender};
use eyre::{Report, Result};

use crate::cursor::CursorLike;
use crate::value::Value;

/// Iterates the remaining rows of a cursor, materializing every column
/// of each row by ordinal.
///
/// The iterator fuses after the first failure; a broken cursor cannot
/// be meaningfully stepped further.
pub struct RowIterator<Cursor: CursorLike> {
    cursor: Cursor,
    columns: usize,
    done: bool,
}

impl<Cursor: CursorLike> RowIterator<Cursor> {
    /// Take over `cursor` and capture its column count.
    pub fn new(cursor: Cursor) -> Result<Self> {
        let columns = cursor.column_count()?;
        Ok(RowIterator {
            cursor,
            columns,
            done: false,
        })
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>> {
        if !self.cursor.advance()? {
            return Ok(None);
        }
        let mut row = Vec::with_capacity(self.columns);
        for ordinal in 1..=self.columns {
            row.push(self.cursor.value_at(ordinal)?);
        }
        Ok(Some(row))
    }
}

impl<Cursor: CursorLike> Iterator for RowIterator<Cursor> {
    type Item = Result<Vec<Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// What [`stream`] delivers. `Error` and `Done` are both terminal, no
/// further message follows either of them.
#[derive(Debug)]
pub enum RowMessage {
    /// One materialized row.
    Row(Vec<Value>),
    /// Reading a row failed.
    Error(Report),
    /// All rows were delivered.
    Done,
}

/// Stream the remaining rows of `cursor` from a worker thread.
///
/// This will consume the cursor and hand it to the worker. Returns a
/// `Receiver` delivering one [`RowMessage`] per row followed by a
/// terminal message, and a `JoinHandle` yielding the number of rows
/// that were streamed.
///
/// Every row is fully materialized before it is sent, so dropping the
/// receiver early never tears a row; the worker simply stops ahead of
/// the next send and the cursor is dropped with it.
///
/// # Examples
///
/// ```ignore
/// let (receiver, handle) = stream(cursor)?;
/// for message in receiver {
///     match message {
///         RowMessage::Row(row) => println!("{:?}", &row),
///         RowMessage::Error(e) => return Err(e),
///         RowMessage::Done => break,
///     }
/// }
/// let count = handle.join().expect("worker panicked")?;
/// ```
pub fn stream<Cursor>(cursor: Cursor) -> Result<(Receiver<RowMessage>, JoinHandle<Result<usize>>)>
where
    Cursor: CursorLike + Send + 'static,
{
    let iterator = RowIterator::new(cursor)?;
    let (sender, receiver) = unbounded();
    let handle = std::thread::spawn(move || pump_rows(iterator, sender));
    Ok((receiver, handle))
}

fn pump_rows<Cursor: CursorLike>(
    iterator: RowIterator<Cursor>,
    sender: Sender<RowMessage>,
) -> Result<usize> {
    let mut counter = 0;
    let mut failed = false;
    for row in iterator {
        let message = match row {
            Ok(row) => {
                counter += 1;
                RowMessage::Row(row)
            }
            Err(e) => {
                failed = true;
                RowMessage::Error(e)
            }
        };
        if sender.send(message).is_err() {
            tracing::trace!("Row receiver disconnected after {} rows", counter);
            return Ok(counter);
        }
    }
    if !failed {
        let _ = sender.send(RowMessage::Done);
    }
    tracing::trace!("Finished streaming {} rows", counter);
    Ok(counter)
}
