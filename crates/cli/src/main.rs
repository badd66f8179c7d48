//! Nameform CLI - nameform command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod logging;
mod render;
mod system_config;

/// Nameform - Name and location entry form with live availability checks
#[derive(Parser)]
#[command(name = "nameform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the form, reading one action per line from stdin
    Run {
        /// Print one JSON object per event instead of coloured text
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,
    /// Get a configuration value
    Get {
        /// Config key (e.g., form.debounce_ms)
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Config key (e.g., form.debounce_ms)
        key: String,
        /// New value
        value: String,
    },
    /// Show config file path
    Path {
        /// Create config file with defaults if it doesn't exist
        #[arg(long)]
        create: bool,
    },
    /// Show example configuration
    Example,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(dispatch(cli));

    // A pending stdin read holds a blocking thread that cannot be cancelled
    runtime.shutdown_background();
    result
}

async fn dispatch(cli: Cli) -> Result<()> {
    let path = system_config::resolve_path(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { json } => {
            let config = system_config::load(&path)?;
            let _guard = logging::init(&config.logging)?;
            tracing::debug!(config = %path.display(), "starting form session");
            cmd::run::run(&config, json).await
        }
        Commands::Config(config_cmd) => {
            let _guard = logging::init(&system_config::LoggingConfig::default())?;
            match config_cmd {
                ConfigCommands::List => cmd::config::run_list(&path).await,
                ConfigCommands::Get { key } => cmd::config::run_get(&path, &key).await,
                ConfigCommands::Set { key, value } => {
                    cmd::config::run_set(&path, &key, &value).await
                }
                ConfigCommands::Path { create } => cmd::config::run_path(&path, create).await,
                ConfigCommands::Example => cmd::config::run_example().await,
            }
        }
    }
}
