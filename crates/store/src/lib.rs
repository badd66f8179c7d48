//! Entry list state for Nameform
//!
//! This crate provides:
//! - Tagged store commands (`AddName`, `ClearAll`)
//! - A pure reducer that rebuilds the entry list per command
//! - A watch-backed store handle for reactive list views
//! - Striped display rows

pub mod reducer;
pub mod store;
pub mod view;

// Re-exports
pub use reducer::{reduce, Command, EntriesState};
pub use store::EntryStore;
pub use view::{rows, ListRow};
