//! Configuration management command
//!
//! Provides CLI interface to view and edit the nameform configuration.

use crate::system_config::{self, SystemConfig};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

/// Every key understood by `get`/`set`
const KEYS: [&str; 9] = [
    "form.debounce_ms",
    "form.validation_timeout_ms",
    "mock.taken_names",
    "mock.locations",
    "mock.min_latency_ms",
    "mock.max_latency_ms",
    "mock.failure_rate",
    "logging.level",
    "logging.file",
];

/// List all configuration values
pub async fn run_list(path: &Path) -> Result<()> {
    let config = system_config::load(path)?;

    println!("{}", "Nameform Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), path.display().dimmed());

    println!("{}", "[form]".yellow());
    println!(
        "  {} = {} {}",
        "debounce_ms".cyan(),
        config.form.debounce_ms,
        format!("({}ms)", config.form.debounce_ms).dimmed()
    );
    println!(
        "  {} = {} {}",
        "validation_timeout_ms".cyan(),
        config.form.validation_timeout_ms,
        if config.form.validation_timeout_ms == 0 {
            "(no timeout)".dimmed().to_string()
        } else {
            format!("({}ms)", config.form.validation_timeout_ms).dimmed().to_string()
        }
    );

    println!("\n{}", "[mock]".yellow());
    for key in ["taken_names", "locations", "min_latency_ms", "max_latency_ms", "failure_rate"] {
        let value = get_value(&config, &format!("mock.{key}"))?;
        println!("  {} = {}", key.cyan(), value);
    }

    println!("\n{}", "[logging]".yellow());
    println!("  {} = {}", "level".cyan(), config.logging.level);
    println!(
        "  {} = {}",
        "file".cyan(),
        if config.logging.file.is_empty() {
            "(stderr)".dimmed().to_string()
        } else {
            config.logging.file.clone()
        }
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  debounce_ms: 10-10,000");
    println!("  validation_timeout_ms: 0 or 100-120,000 (0 = no timeout)");
    println!("  min_latency_ms <= max_latency_ms <= 60,000");
    println!("  failure_rate: 0.0-1.0");
    println!("  level: trace, debug, info, warn, error");

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(path: &Path, key: &str) -> Result<()> {
    let config = system_config::load(path)?;
    println!("{}", get_value(&config, key)?);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load(path)?;

    set_value(&mut config, key, value)?;

    // Validate before saving
    config.validate().context("Invalid configuration value")?;

    system_config::save(&config, path)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(path: &Path, create: bool) -> Result<()> {
    if create && system_config::init_if_missing(path)? {
        println!("{} Created config file at: {}", "✓".green(), path.display());
    } else if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{}", path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", system_config::example_config());
    Ok(())
}

fn get_value(config: &SystemConfig, key: &str) -> Result<String> {
    let value = match key {
        "form.debounce_ms" => config.form.debounce_ms.to_string(),
        "form.validation_timeout_ms" => config.form.validation_timeout_ms.to_string(),
        "mock.taken_names" => config.mock.taken_names.join(","),
        "mock.locations" => config.mock.locations.join(","),
        "mock.min_latency_ms" => config.mock.min_latency_ms.to_string(),
        "mock.max_latency_ms" => config.mock.max_latency_ms.to_string(),
        "mock.failure_rate" => config.mock.failure_rate.to_string(),
        "logging.level" => config.logging.level.clone(),
        "logging.file" => config.logging.file.clone(),
        _ => anyhow::bail!(
            "Unknown config key: {}. Known keys: {}",
            key,
            KEYS.join(", ")
        ),
    };
    Ok(value)
}

fn set_value(config: &mut SystemConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "form.debounce_ms" => {
            config.form.debounce_ms = value
                .parse()
                .context("Invalid value: must be a positive integer")?;
        }
        "form.validation_timeout_ms" => {
            config.form.validation_timeout_ms = value
                .parse()
                .context("Invalid value: must be a non-negative integer")?;
        }
        "mock.taken_names" => config.mock.taken_names = split_list(value),
        "mock.locations" => config.mock.locations = split_list(value),
        "mock.min_latency_ms" => {
            config.mock.min_latency_ms = value
                .parse()
                .context("Invalid value: must be a non-negative integer")?;
        }
        "mock.max_latency_ms" => {
            config.mock.max_latency_ms = value
                .parse()
                .context("Invalid value: must be a non-negative integer")?;
        }
        "mock.failure_rate" => {
            config.mock.failure_rate = value
                .parse()
                .context("Invalid value: must be a number between 0.0 and 1.0")?;
        }
        "logging.level" => config.logging.level = value.to_lowercase(),
        "logging.file" => config.logging.file = value.to_string(),
        _ => anyhow::bail!(
            "Unknown config key: {}. Known keys: {}",
            key,
            KEYS.join(", ")
        ),
    }
    Ok(())
}

/// Comma-separated list, blanks dropped
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
