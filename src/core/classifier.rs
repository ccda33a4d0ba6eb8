use std::collections::HashSet;

use crate::core::parsers::clean_string;
use crate::domain::model::{Column, EntityMode, Row};

/// Reference-id value that marks a row as new even when the column is filled.
pub const CREATE_MARKER: &str = "create";

/// A row belongs to create mode when it has a name and its reference id is
/// blank or the literal `create`.
pub fn is_create_row(row: &Row) -> bool {
    let reference = row.get(Column::ReferenceId).trim();
    !row.get(Column::FullName).trim().is_empty()
        && (reference.is_empty() || reference == CREATE_MARKER)
}

/// A row belongs to update mode when its reference id is filled and is not
/// the create marker.
pub fn is_update_row(row: &Row) -> bool {
    let reference = row.get(Column::ReferenceId).trim();
    !reference.is_empty() && reference != CREATE_MARKER
}

pub fn belongs_to(row: &Row, mode: EntityMode) -> bool {
    match mode {
        EntityMode::Create => is_create_row(row),
        EntityMode::Update => is_update_row(row),
    }
}

/// Identity used for de-duplication: the cleaned, lower-cased name in create
/// mode, the trimmed reference id in update mode.
pub fn dedup_key(row: &Row, mode: EntityMode) -> String {
    match mode {
        EntityMode::Create => clean_string(row.get(Column::FullName))
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase(),
        EntityMode::Update => row.get(Column::ReferenceId).trim().to_string(),
    }
}

/// Outcome of classifying a row collection for one mode.
#[derive(Debug, Default)]
pub struct Classification<'a> {
    pub selected: Vec<&'a Row>,
    /// Indices of rows that did not qualify for the mode.
    pub excluded: Vec<usize>,
    /// Indices of qualifying rows dropped as later duplicates.
    pub duplicates: Vec<usize>,
}

/// Filter rows for `mode` and keep the first row per identity. Later
/// duplicates are dropped, never merged.
pub fn classify(rows: &[Row], mode: EntityMode) -> Classification<'_> {
    let mut seen = HashSet::new();
    let mut result = Classification::default();

    for (index, row) in rows.iter().enumerate() {
        if !belongs_to(row, mode) {
            result.excluded.push(index);
            continue;
        }
        if seen.insert(dedup_key(row, mode)) {
            result.selected.push(row);
        } else {
            tracing::debug!("Dropping duplicate row {} ({} mode)", index + 1, mode);
            result.duplicates.push(index);
        }
    }

    result
}
