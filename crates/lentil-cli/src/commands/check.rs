//! `lentil check` command implementation.
//!
//! Parses and validates a manifest, prints every diagnostic, and optionally
//! verifies that Pipfile.lock still corresponds to the manifest.

use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};
use lentil_core::error::LentilResult;
use lentil_manifest::lock::{self, LOCKFILE_NAME};
use lentil_manifest::validate::{validate, Severity};
use lentil_manifest::Pipfile;

use super::CommandContext;

/// Execute the `lentil check` command
pub async fn execute(
    path: Option<PathBuf>,
    strict: bool,
    check_lock: bool,
    ctx: &CommandContext,
) -> LentilResult<()> {
    ctx.output.step("🔍", "Checking manifest");

    let (manifest, manifest_path) = super::load_manifest(path, ctx).await?;
    ctx.output
        .info(&format!("Using manifest at {}", manifest_path));

    let report = validate(&manifest);
    for diagnostic in &report.diagnostics {
        match diagnostic.severity {
            Severity::Error => ctx.output.error(&diagnostic.to_string()),
            Severity::Warning => ctx.output.warn(&diagnostic.to_string()),
        }
    }
    ctx.output.info(&format!("📊 {}", report.summary()));

    let mut failed = !report.is_ok() || (strict && report.warning_count() > 0);

    if check_lock {
        failed |= !lockfile_fresh(&manifest, &manifest_path, ctx).await?;
    }

    if failed {
        ctx.output.error("Manifest check failed");
        std::process::exit(1);
    }

    ctx.output.success("Manifest is structurally valid");
    Ok(())
}

/// Check Pipfile.lock freshness next to the manifest
async fn lockfile_fresh(
    manifest: &Pipfile,
    manifest_path: &Utf8Path,
    ctx: &CommandContext,
) -> LentilResult<bool> {
    let lock_path = match manifest_path.parent() {
        Some(parent) => parent.join(LOCKFILE_NAME),
        None => Utf8PathBuf::from(LOCKFILE_NAME),
    };

    if !lock_path.exists() {
        ctx.output
            .error(&format!("{} not found next to the manifest", LOCKFILE_NAME));
        return Ok(false);
    }

    let lockfile = lock::load_from_file(&lock_path).await?;
    if lock::is_fresh(&lockfile, manifest)? {
        ctx.output
            .success(&format!("{} is up to date", LOCKFILE_NAME));
        Ok(true)
    } else {
        ctx.output.error(&format!(
            "{} is out of date with the manifest",
            LOCKFILE_NAME
        ));
        Ok(false)
    }
}
