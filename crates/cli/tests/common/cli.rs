//! CLI command execution helpers with automatic timing
//!
//! Wraps the `nameform` binary built for this test run and provides
//! assertion helpers over its output.

#![allow(dead_code)]

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct NfCommand {
    binary_path: PathBuf,
    config_path: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    stdin_data: Option<String>,
}

impl NfCommand {
    /// Create a new command bound to the given config file
    pub fn new(config_path: impl AsRef<Path>) -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_nameform")),
            config_path: config_path.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
            stdin_data: None,
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Provide stdin data, one action per line
    pub fn stdin(&mut self, lines: &[&str]) -> &mut Self {
        let mut data = lines.join("\n");
        data.push('\n');
        self.stdin_data = Some(data);
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let mut command = Command::new(&self.binary_path);
        command
            .arg("--config")
            .arg(&self.config_path)
            .args(&self.args)
            .envs(&self.env)
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().context("Failed to spawn command")?;

        // Dropping the handle closes stdin so the session sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            use std::io::Write;
            if let Some(data) = &self.stdin_data {
                stdin.write_all(data.as_bytes())?;
            }
        }

        let output = child
            .wait_with_output()
            .context("Failed to wait for command")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Parse every stdout line as a JSON event
    pub fn events(&self) -> Result<Vec<serde_json::Value>> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).with_context(|| format!("Not a JSON event: {line}"))
            })
            .collect()
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// nf!(config, "config", "list").assert_success()?;
/// nf!(config, "run").stdin(&["name bob", "wait"]).assert_success()?;
/// ```
#[macro_export]
macro_rules! nf {
    ($config:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::NfCommand::new($config);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
