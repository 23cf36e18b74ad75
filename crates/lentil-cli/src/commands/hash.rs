//! `lentil hash` command implementation.

use std::path::PathBuf;

use lentil_core::error::LentilResult;
use lentil_manifest::lock::content_hash;

use super::CommandContext;

/// Execute the `lentil hash` command
pub async fn execute(path: Option<PathBuf>, ctx: &CommandContext) -> LentilResult<()> {
    let (manifest, _manifest_path) = super::load_manifest(path, ctx).await?;
    let digest = content_hash(&manifest)?;

    // Bare value on stdout so the digest can be piped
    println!("{}", digest);
    Ok(())
}
