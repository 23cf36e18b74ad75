//! Command implementations and dispatch logic.
//!
//! This module contains all command handlers and the central dispatch
//! system. Each command is implemented as an async function that takes a
//! CommandContext.

use camino::Utf8PathBuf;
use lentil_core::error::{LentilError, LentilResult};
use lentil_manifest::loader::ManifestLoader;
use lentil_manifest::{pipfile, Pipfile};
use std::path::PathBuf;
use tracing::info;

pub mod check;
pub mod hash;
pub mod init;
pub mod list;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> LentilResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| LentilError::Io {
            message: "Failed to get current directory".to_string(),
            source: e,
        })?;

        let output = OutputHandler::new();

        Ok(Self { cwd, output })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> LentilResult<()> {
    match command {
        Commands::Check { path, strict, lock } => {
            info!("Checking manifest (strict: {}, lock: {})", strict, lock);
            check::execute(path, strict, lock, ctx).await
        }
        Commands::List { path, dev, json } => {
            info!("Listing packages (dev: {}, json: {})", dev, json);
            list::execute(path, dev, json, ctx).await
        }
        Commands::Hash { path } => {
            info!("Hashing manifest");
            hash::execute(path, ctx).await
        }
        Commands::Init => {
            info!("Initializing manifest in current directory");
            init::execute(ctx).await
        }
        Commands::Version => {
            info!("Showing version information");
            show_version(ctx)
        }
    }
}

/// Load the manifest named on the command line, or discover one
pub(crate) async fn load_manifest(
    path: Option<PathBuf>,
    ctx: &CommandContext,
) -> LentilResult<(Pipfile, Utf8PathBuf)> {
    match path {
        Some(path) => {
            let path = into_utf8(path)?;
            let manifest = pipfile::load_from_file(&path).await?;
            Ok((manifest, path))
        }
        None => {
            let cwd = into_utf8(ctx.cwd.clone())?;
            let loader = ManifestLoader::new(cwd);
            let (manifest, source) = loader.load().await?;
            Ok((manifest, source.path().to_owned()))
        }
    }
}

fn into_utf8(path: PathBuf) -> LentilResult<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| LentilError::Validation {
        field: "path".to_string(),
        reason: format!("{} is not valid UTF-8", path.display()),
    })
}

fn show_version(ctx: &CommandContext) -> LentilResult<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("BUILD_DATE");
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.info(&format!("lentil v{}", version));
    ctx.output.info(&format!("Built: {}", build_date));
    ctx.output.info(&format!("Target: {}", target));
    ctx.output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));

    Ok(())
}
