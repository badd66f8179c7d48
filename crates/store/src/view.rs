//! Read-only rows for list rendering

use crate::reducer::EntriesState;
use serde::Serialize;

/// One displayed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub index: usize,
    pub name: String,
    pub location: String,
    /// Even rows get the shaded background
    pub shaded: bool,
}

/// Rows in insertion order with alternating shading
pub fn rows(state: &EntriesState) -> Vec<ListRow> {
    state
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| ListRow {
            index,
            name: entry.name().to_string(),
            location: entry.location().to_string(),
            shaded: index % 2 == 0,
        })
        .collect()
}
