//! Pure reducer over the entry list

use nameform_core::Entry;
use serde::{Deserialize, Serialize};

/// Commands accepted by the entry store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Command {
    /// Append an accepted entry
    AddName(Entry),
    /// Remove every entry
    ClearAll,
}

/// Ordered list of accepted entries, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntriesState {
    entries: Vec<Entry>,
}

impl EntriesState {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }
}

/// Compute the state that follows `state` after `command`
///
/// The input is left untouched; a fresh sequence is built for the result.
pub fn reduce(state: &EntriesState, command: Command) -> EntriesState {
    match command {
        Command::AddName(entry) => {
            let mut entries = Vec::with_capacity(state.entries.len() + 1);
            entries.extend(state.entries.iter().cloned());
            entries.push(entry);
            EntriesState { entries }
        }
        Command::ClearAll => EntriesState::default(),
    }
}
