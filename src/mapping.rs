use eyre::Result;

use crate::cursor::CursorLike;

/// Lookup table from result columns to positions in an ordered field
/// list.
///
/// The map is built once per result shape, stays immutable afterwards
/// and can be shared across all rows of that shape (and across threads).
/// Slots are addressed by 1-based column ordinal; a slot holds the index
/// of the matched field, or nothing when no field matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// One slot per column ordinal. Slot 0 is never used.
    slots: Vec<Option<usize>>,
    /// Ordinals whose metadata could not be read.
    skipped: Vec<usize>,
}

impl ColumnMap {
    /// Build the map from the cursor's column metadata and an ordered
    /// list of field names.
    ///
    /// Each column is compared against the fields in order: the column
    /// label (or its raw name when the label is absent) has to equal the
    /// field name case-insensitively, either verbatim or with all
    /// underscores and spaces removed from the column side. The first
    /// field that satisfies one of the two comparisons wins. A column
    /// that satisfies neither keeps an empty slot.
    ///
    /// A metadata failure on a single column does not abort the mapping.
    /// The column is left unmatched, a warning is logged and its ordinal
    /// is reported through [`ColumnMap::skipped`]. Only a failure to
    /// read the column count is fatal, as the map cannot be sized
    /// without it.
    pub fn build<Cursor, Field>(cursor: &Cursor, fields: &[Field]) -> Result<Self>
    where
        Cursor: CursorLike,
        Field: AsRef<str>,
    {
        let count = cursor.column_count()?;
        let lowered: Vec<String> = fields.iter().map(|f| f.as_ref().to_lowercase()).collect();

        let mut slots = vec![None; count + 1];
        let mut skipped = Vec::new();
        for ordinal in 1..=count {
            let column = match column_name(cursor, ordinal) {
                Ok(name) => name.to_lowercase(),
                Err(e) => {
                    tracing::warn!("Could not read metadata of column {}: {:?}", ordinal, &e);
                    skipped.push(ordinal);
                    continue;
                }
            };
            let generous = generous_name(&column);
            slots[ordinal] = lowered
                .iter()
                .position(|field| field == &column || field == &generous);
        }
        Ok(ColumnMap { slots, skipped })
    }

    /// The field index a column maps to, if any.
    pub fn field_for(&self, ordinal: usize) -> Option<usize> {
        self.slots.get(ordinal).copied().flatten()
    }

    /// How many columns the mapped result shape has.
    pub fn column_count(&self) -> usize {
        self.slots.len() - 1
    }

    /// How many columns found a field.
    pub fn matched_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Ordinals left unmatched because their metadata could not be read.
    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }
}

/// Label first, raw name when the label is absent or empty.
fn column_name<Cursor: CursorLike>(cursor: &Cursor, ordinal: usize) -> Result<String> {
    match cursor.column_label(ordinal)? {
        Some(label) if !label.is_empty() => Ok(label),
        _ => cursor.column_name(ordinal),
    }
}

fn generous_name(name: &str) -> String {
    name.replace('_', "").replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Column, StubCursor};

    #[test]
    fn test_underscores_and_spaces_match() {
        let cursor = StubCursor::new(&["user_id", "Full Name"], Vec::new());
        let map = ColumnMap::build(&cursor, &["userId", "fullName"]).unwrap();
        assert_eq!(map.field_for(1), Some(0));
        assert_eq!(map.field_for(2), Some(1));
        assert_eq!(map.matched_count(), 2);
        assert!(map.skipped().is_empty());
    }

    #[test]
    fn test_unmatched_column_keeps_empty_slot() {
        let cursor = StubCursor::new(&["unmatched_col"], Vec::new());
        let map = ColumnMap::build(&cursor, &["userId"]).unwrap();
        assert_eq!(map.field_for(1), None);
        assert_eq!(map.column_count(), 1);
        assert_eq!(map.matched_count(), 0);
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let cursor = StubCursor::new(&["SUBJECT"], Vec::new());
        let map = ColumnMap::build(&cursor, &["subject"]).unwrap();
        assert_eq!(map.field_for(1), Some(0));
    }

    #[test]
    fn test_first_satisfying_field_wins() {
        // Both fields match the column, the earlier one has to win.
        let cursor = StubCursor::new(&["user_id"], Vec::new());
        let map = ColumnMap::build(&cursor, &["userid", "user_id"]).unwrap();
        assert_eq!(map.field_for(1), Some(0));
    }

    #[test]
    fn test_label_falls_back_to_name() {
        let columns = vec![
            Column::unlabeled("timestamp"),
            Column::labeled("", "subject"),
        ];
        let cursor = StubCursor::with_columns(columns, Vec::new());
        let map = ColumnMap::build(&cursor, &["subject", "timestamp"]).unwrap();
        assert_eq!(map.field_for(1), Some(1));
        assert_eq!(map.field_for(2), Some(0));
    }

    #[test]
    fn test_broken_column_does_not_abort_the_mapping() {
        let columns = vec![
            Column::labeled("user_id", "user_id"),
            Column::broken(),
            Column::labeled("full_name", "full_name"),
        ];
        let cursor = StubCursor::with_columns(columns, Vec::new());
        let map = ColumnMap::build(&cursor, &["userId", "fullName"]).unwrap();
        assert_eq!(map.field_for(1), Some(0));
        assert_eq!(map.field_for(2), None);
        assert_eq!(map.field_for(3), Some(1));
        assert_eq!(map.skipped(), &[2]);
    }

    #[test]
    fn test_building_twice_yields_identical_maps() {
        let cursor = StubCursor::new(&["user_id", "extra", "Full Name"], Vec::new());
        let fields = ["userId", "fullName"];
        let first = ColumnMap::build(&cursor, &fields).unwrap();
        let second = ColumnMap::build(&cursor, &fields).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_result_shape() {
        let cursor = StubCursor::new(&[], Vec::new());
        let map = ColumnMap::build(&cursor, &["userId"]).unwrap();
        assert_eq!(map.column_count(), 0);
        assert_eq!(map.field_for(0), None);
        assert_eq!(map.field_for(1), None);
    }
}
