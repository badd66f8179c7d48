//! Remote gateway contracts
//!
//! Both calls are opaque remote operations: they take network-like time,
//! may fail, and give no ordering guarantee across concurrent calls.

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a remote call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Remote call failed: {0}")]
    Transport(String),

    #[error("Remote call timed out after {0}ms")]
    Timeout(u64),
}

/// Checks whether a candidate name is still available
///
/// Calls are idempotent. `Ok(true)` means available, `Ok(false)` means taken.
#[async_trait]
pub trait NameValidator: Send + Sync {
    async fn is_name_valid(&self, name: &str) -> Result<bool, GatewayError>;
}

/// Supplies the location options for the form
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn locations(&self) -> Result<Vec<String>, GatewayError>;
}
