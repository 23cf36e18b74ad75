//! # lentil-cli
//!
//! Structural validator for Pipfile dependency manifests.
//!
//! This is the main entry point for the lentil CLI tool. It handles command
//! parsing, sets up logging and error handling, and dispatches to the
//! appropriate command handlers.

use clap::{Parser, Subcommand};
use lentil_core::error::{LentilError, LentilResult};
use std::path::PathBuf;
use tracing::{error, info};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Structural validator for Pipfile dependency manifests
#[derive(Parser)]
#[command(name = "lentil", version, about = "Structural validator for Pipfile manifests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a manifest and print a report
    Check {
        /// Manifest path (discovered from the working directory when omitted)
        path: Option<PathBuf>,
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
        /// Also verify that Pipfile.lock matches the manifest
        #[arg(long)]
        lock: bool,
    },
    /// List declared packages
    List {
        /// Manifest path (discovered from the working directory when omitted)
        path: Option<PathBuf>,
        /// List development packages instead of runtime packages
        #[arg(long)]
        dev: bool,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical manifest hash
    Hash {
        /// Manifest path (discovered from the working directory when omitted)
        path: Option<PathBuf>,
    },
    /// Write a starter Pipfile into the current directory
    Init,
    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting lentil v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run_cli(cli) {
        let formatter = ErrorFormatter::new();
        eprintln!("{}", formatter.format_error(&err));
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> LentilResult<()> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| LentilError::Io {
        message: "Failed to create async runtime".to_string(),
        source: e,
    })?;

    rt.block_on(async {
        let ctx = CommandContext::new()?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "lentil={},lentil_manifest={},lentil_core={}",
            level, level, level
        ))
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("lentil encountered an unexpected error: {}", panic_info);
        eprintln!("lentil crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/lentil-tools/lentil/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
