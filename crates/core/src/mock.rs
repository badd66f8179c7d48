//! In-process stand-ins for the remote endpoints
//!
//! `MockDirectory` answers both gateway calls after a random delay drawn
//! from the configured latency range, and fails a configurable share of
//! calls. With a latency range wider than the debounce window, responses to
//! overlapping validations routinely come back out of order.

use crate::gateway::{GatewayError, LocationSource, NameValidator};
use async_trait::async_trait;
use parking_lot::RwLock;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

/// Behaviour of the mock endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Names reported as already taken (matched case-insensitively)
    pub taken_names: Vec<String>,
    /// Locations returned by the lookup endpoint
    pub locations: Vec<String>,
    /// Lower bound of simulated latency
    pub min_latency_ms: u64,
    /// Upper bound of simulated latency
    pub max_latency_ms: u64,
    /// Share of calls that fail, 0.0-1.0
    pub failure_rate: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            taken_names: vec!["eve".into(), "mallory".into(), "trudy".into()],
            locations: vec![
                "Canada".into(),
                "China".into(),
                "USA".into(),
                "Brazil".into(),
                "NYC".into(),
            ],
            min_latency_ms: 100,
            max_latency_ms: 1500,
            failure_rate: 0.0,
        }
    }
}

/// Mock name directory and location endpoint
pub struct MockDirectory {
    taken: RwLock<HashSet<String>>,
    locations: Vec<String>,
    min_latency: u64,
    max_latency: u64,
    failure_rate: f64,
}

impl MockDirectory {
    pub fn new(config: &MockConfig) -> Self {
        let taken = config
            .taken_names
            .iter()
            .map(|name| normalize(name))
            .collect();

        Self {
            taken: RwLock::new(taken),
            locations: config.locations.clone(),
            min_latency: config.min_latency_ms.min(config.max_latency_ms),
            max_latency: config.min_latency_ms.max(config.max_latency_ms),
            failure_rate: config.failure_rate.clamp(0.0, 1.0),
        }
    }

    /// Mark a name as taken for all later validations
    pub fn reserve(&self, name: &str) {
        self.taken.write().insert(normalize(name));
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.read().contains(&normalize(name))
    }

    /// Draw the delay and failure decision for one call
    fn roll(&self) -> (Duration, bool) {
        let mut rng = rand::thread_rng();
        let delay = if self.min_latency == self.max_latency {
            self.min_latency
        } else {
            rng.gen_range(self.min_latency..=self.max_latency)
        };
        let fail = self.failure_rate > 0.0 && rng.gen_bool(self.failure_rate);
        (Duration::from_millis(delay), fail)
    }
}

#[async_trait]
impl NameValidator for MockDirectory {
    async fn is_name_valid(&self, name: &str) -> Result<bool, GatewayError> {
        let (delay, fail) = self.roll();
        debug!("mock validation of {:?} will answer in {:?}", name, delay);
        tokio::time::sleep(delay).await;

        if fail {
            return Err(GatewayError::Transport(format!(
                "mock endpoint rejected validation of {name:?}"
            )));
        }

        Ok(!self.is_taken(name))
    }
}

#[async_trait]
impl LocationSource for MockDirectory {
    async fn locations(&self) -> Result<Vec<String>, GatewayError> {
        let (delay, fail) = self.roll();
        tokio::time::sleep(delay).await;

        if fail {
            return Err(GatewayError::Transport(
                "mock endpoint failed to list locations".to_string(),
            ));
        }

        Ok(self.locations.clone())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
