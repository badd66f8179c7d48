//! Nameform Core - shared data model and remote gateway contracts
//!
//! This crate provides:
//! - `Entry` (an accepted name+location pair)
//! - `LocationCatalog` (options for the location field)
//! - Gateway traits for name validation and location lookup
//! - Mock gateways with configurable latency and failure

pub mod catalog;
pub mod entry;
pub mod gateway;
pub mod mock;

// Re-export main types for convenience
pub use catalog::LocationCatalog;
pub use entry::Entry;
pub use gateway::{GatewayError, LocationSource, NameValidator};
pub use mock::{MockConfig, MockDirectory};
