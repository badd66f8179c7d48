//! Reactive entry store
//!
//! Holds the current `EntriesState` in a watch channel. Every dispatch runs
//! the reducer and publishes the new state; list views subscribe and
//! re-render on change.

use crate::reducer::{reduce, Command, EntriesState};
use crate::view::{rows, ListRow};
use nameform_core::Entry;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Shared handle to the entry list
///
/// Clones refer to the same list. The store trusts its callers and never
/// rejects a command.
#[derive(Clone)]
pub struct EntryStore {
    state: Arc<watch::Sender<EntriesState>>,
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(EntriesState::default());
        Self { state: Arc::new(tx) }
    }

    /// Apply a command and publish the resulting state
    pub fn dispatch(&self, command: Command) -> EntriesState {
        let next = {
            let current = self.state.borrow();
            reduce(&current, command)
        };
        debug!("entry store now holds {} entries", next.len());

        self.state.send_replace(next.clone());
        next
    }

    /// Add an entry at the end of the list
    pub fn append(&self, entry: Entry) -> EntriesState {
        self.dispatch(Command::AddName(entry))
    }

    /// Remove every entry
    pub fn clear_all(&self) -> EntriesState {
        self.dispatch(Command::ClearAll)
    }

    /// Current state
    pub fn snapshot(&self) -> EntriesState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published state
    pub fn subscribe(&self) -> watch::Receiver<EntriesState> {
        self.state.subscribe()
    }

    /// Current entries as display rows
    pub fn rows(&self) -> Vec<ListRow> {
        rows(&self.state.borrow())
    }

    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }
}
