//! System configuration file
//!
//! Loaded from `<config dir>/nameform/config.toml` unless `--config` points
//! elsewhere. A missing file means defaults.

use anyhow::{Context, Result};
use nameform_core::MockConfig;
use nameform_form::FormConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub form: FormConfig,
    pub mock: MockConfig,
    pub logging: LoggingConfig,
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set
    pub level: String,
    /// Log file path (empty = stderr)
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: String::new(),
        }
    }
}

/// A configuration value outside its allowed range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{key} = {value} is out of range ({range})")]
    OutOfRange {
        key: &'static str,
        value: u64,
        range: &'static str,
    },

    #[error("mock.failure_rate = {0} must be between 0.0 and 1.0")]
    FailureRate(f64),

    #[error("mock.min_latency_ms ({min}) must not exceed mock.max_latency_ms ({max})")]
    LatencyRange { min: u64, max: u64 },

    #[error("logging.level = {0:?} is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

impl SystemConfig {
    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("form.debounce_ms", self.form.debounce_ms, 10..=10_000, "10-10000")?;
        if self.form.validation_timeout_ms != 0 {
            check_range(
                "form.validation_timeout_ms",
                self.form.validation_timeout_ms,
                100..=120_000,
                "0 or 100-120000",
            )?;
        }

        check_range("mock.max_latency_ms", self.mock.max_latency_ms, 0..=60_000, "0-60000")?;
        if self.mock.min_latency_ms > self.mock.max_latency_ms {
            return Err(ConfigError::LatencyRange {
                min: self.mock.min_latency_ms,
                max: self.mock.max_latency_ms,
            });
        }
        if !(0.0..=1.0).contains(&self.mock.failure_rate) {
            return Err(ConfigError::FailureRate(self.mock.failure_rate));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::LogLevel(self.logging.level.clone()));
        }

        Ok(())
    }
}

fn check_range(
    key: &'static str,
    value: u64,
    allowed: std::ops::RangeInclusive<u64>,
    range: &'static str,
) -> Result<(), ConfigError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value, range })
    }
}

/// Default location of the config file
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nameform").join("config.toml"))
}

/// Config file to use: the explicit override, else the default location
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config_file_path().context("Could not determine config directory"),
    }
}

/// Load and validate the config at `path`, falling back to defaults if absent
pub fn load(path: &Path) -> Result<SystemConfig> {
    if !path.exists() {
        return Ok(SystemConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    Ok(config)
}

/// Write `config` to `path`, creating parent directories
pub fn save(config: &SystemConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let serialized = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, serialized)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

/// Write the annotated example config if nothing exists at `path`
///
/// Returns true if a file was created.
pub fn init_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    std::fs::write(path, example_config())
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(true)
}

/// Annotated config with every default spelled out
pub fn example_config() -> &'static str {
    r#"# Nameform configuration

[form]
# Quiet period after the last keystroke before the name is validated (10-10000)
debounce_ms = 1000
# Upper bound on a single validation call, 0 = wait forever (0 or 100-120000)
validation_timeout_ms = 0

[mock]
# Names the mock directory reports as taken (case-insensitive)
taken_names = ["eve", "mallory", "trudy"]
# Options returned by the mock location endpoint
locations = ["Canada", "China", "USA", "Brazil", "NYC"]
# Simulated latency range in milliseconds (max 60000)
min_latency_ms = 100
max_latency_ms = 1500
# Share of calls that fail (0.0-1.0)
failure_rate = 0.0

[logging]
# trace, debug, info, warn or error (RUST_LOG takes precedence)
level = "warn"
# Log file path, empty = stderr
file = ""
"#
}
