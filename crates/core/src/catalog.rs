//! Location options for the form

use serde::{Deserialize, Serialize};

/// Ordered list of selectable locations
///
/// Fetched once when a form session mounts and read-only afterwards.
/// An empty catalog is valid and simply renders no options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationCatalog {
    locations: Vec<String>,
}

impl LocationCatalog {
    /// Build a catalog from fetched locations, preserving order
    pub fn new(locations: Vec<String>) -> Self {
        Self { locations }
    }

    /// Catalog with no options
    pub fn empty() -> Self {
        Self::default()
    }

    /// Options in display order
    pub fn options(&self) -> &[String] {
        &self.locations
    }

    pub fn contains(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
