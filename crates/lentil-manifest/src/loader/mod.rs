//! Manifest discovery and loading.
//!
//! Finds the Pipfile governing a working directory by walking up the
//! directory tree, with an environment-variable override for tooling that
//! keeps its manifest elsewhere.

use camino::{Utf8Path, Utf8PathBuf};
use lentil_core::error::LentilError;

use crate::pipfile::{self, Pipfile};
use crate::ManifestResult;

/// Conventional manifest file name
pub const MANIFEST_NAME: &str = "Pipfile";

/// Environment variable overriding manifest discovery
pub const MANIFEST_ENV: &str = "LENTIL_PIPFILE";

/// Manifest discovery interface
pub struct ManifestLoader {
    /// Directory discovery starts from
    cwd: Utf8PathBuf,
}

/// Where a loaded manifest came from
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestSource {
    /// Found by walking up from the working directory
    Discovered(Utf8PathBuf),
    /// Taken from the override environment variable
    Environment(Utf8PathBuf),
}

impl ManifestSource {
    /// The manifest file path
    pub fn path(&self) -> &Utf8Path {
        match self {
            ManifestSource::Discovered(path) => path,
            ManifestSource::Environment(path) => path,
        }
    }
}

impl ManifestLoader {
    /// Create a loader rooted at a working directory
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Find the nearest Pipfile (walks up the directory tree)
    pub fn resolve_manifest_path(&self) -> Option<Utf8PathBuf> {
        let mut current = self.cwd.as_path();
        loop {
            let candidate = current.join(MANIFEST_NAME);
            if candidate.exists() {
                return Some(candidate);
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        None
    }

    /// Load the governing manifest with its provenance
    pub async fn load(&self) -> ManifestResult<(Pipfile, ManifestSource)> {
        if let Ok(override_path) = std::env::var(MANIFEST_ENV) {
            let path = Utf8PathBuf::from(override_path);
            let manifest = pipfile::load_from_file(&path).await?;
            return Ok((manifest, ManifestSource::Environment(path)));
        }

        let path = self
            .resolve_manifest_path()
            .ok_or_else(|| LentilError::Validation {
                field: "manifest".to_string(),
                reason: format!(
                    "No {} found in {} or any parent directory",
                    MANIFEST_NAME, self.cwd
                ),
            })?;
        let manifest = pipfile::load_from_file(&path).await?;
        Ok((manifest, ManifestSource::Discovered(path)))
    }
}
