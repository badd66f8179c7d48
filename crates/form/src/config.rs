//! Form timing settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing knobs for a form session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Quiet period after the last name keystroke before validating
    pub debounce_ms: u64,
    /// Upper bound on one validation call (0 = wait forever)
    pub validation_timeout_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            validation_timeout_ms: 0,
        }
    }
}

impl FormConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validation_timeout(&self) -> Option<Duration> {
        (self.validation_timeout_ms > 0).then(|| Duration::from_millis(self.validation_timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_means_none() {
        let config = FormConfig::default();
        assert_eq!(config.debounce(), Duration::from_secs(1));
        assert_eq!(config.validation_timeout(), None);

        let config = FormConfig {
            validation_timeout_ms: 5000,
            ..FormConfig::default()
        };
        assert_eq!(config.validation_timeout(), Some(Duration::from_secs(5)));
    }
}
