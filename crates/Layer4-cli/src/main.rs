//! EventCore CLI - Main entry point

mod cli;
mod init;

use clap::{Parser, Subcommand};
use eventcore_foundation::EventsConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// EventCore - plugin event registry tooling
#[derive(Parser, Debug)]
#[command(name = "eventcore")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create .eventcore/events.json in the current directory
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective (global + project) configuration
    Config,
    /// List plugin directories and their event definition files
    Scan {
        /// Plugin root to scan (repeatable, overrides configuration)
        #[arg(short, long = "path")]
        paths: Vec<PathBuf>,

        /// Event definition file extension (overrides configuration)
        #[arg(short, long)]
        extension: Option<String>,

        /// Print candidates as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match args.command {
        Command::Init { force } => init::init_project(force),
        Command::Config => {
            let config = EventsConfig::load()?;
            cli::print_config(&config)
        }
        Command::Scan {
            paths,
            extension,
            json,
        } => {
            let mut config = EventsConfig::load().unwrap_or_else(|e| {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                EventsConfig::default()
            });
            if !paths.is_empty() {
                config.plugin_paths = paths;
            }
            if let Some(ext) = extension {
                config.definition_extension = Some(ext);
            }
            cli::run_scan(&config, json)
        }
    }
}
