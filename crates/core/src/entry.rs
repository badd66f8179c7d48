//! Accepted form entries

use serde::{Deserialize, Serialize};
use std::fmt;

/// A submitted name+location pair
///
/// Entries are immutable once created; the store only ever appends them or
/// drops all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    name: String,
    location: String,
}

impl Entry {
    /// Create a new entry
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    /// Registered name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Selected location
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.name, self.location)
    }
}
