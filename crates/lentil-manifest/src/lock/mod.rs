//! Pipfile.lock handling.
//!
//! The lockfile is JSON whose `_meta.hash.sha256` records the digest of the
//! manifest's canonical projection, so a stale lockfile can be detected
//! without resolving anything. Lockfile generation requires resolution and
//! belongs to the installer, not to this crate.

use indexmap::IndexMap;
use lentil_core::error::LentilError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::pipfile::{Pipfile, RequiresSection, SourceSection};
use crate::ManifestResult;

/// Conventional lockfile name next to the Pipfile
pub const LOCKFILE_NAME: &str = "Pipfile.lock";

/// Parsed Pipfile.lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipfileLock {
    #[serde(rename = "_meta")]
    pub meta: LockMeta,

    /// Locked runtime packages
    #[serde(default)]
    pub default: IndexMap<String, LockedPackage>,

    /// Locked development packages
    #[serde(default)]
    pub develop: IndexMap<String, LockedPackage>,
}

/// Lockfile metadata block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockMeta {
    pub hash: LockHash,

    #[serde(default = "default_pipfile_spec", rename = "pipfile-spec")]
    pub pipfile_spec: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<RequiresSection>,

    #[serde(default)]
    pub sources: Vec<SourceSection>,
}

/// Digest of the manifest the lockfile was generated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockHash {
    pub sha256: String,
}

/// A locked package entry; resolver-specific fields are ignored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LockedPackage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashes: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<String>,
}

/// Lockfile format revision written by current tooling
fn default_pipfile_spec() -> u32 {
    6
}

/// Parse a Pipfile.lock from JSON
pub fn parse_lock(content: &str) -> ManifestResult<PipfileLock> {
    serde_json::from_str(content).map_err(|e| LentilError::JsonParse {
        message: e.to_string(),
    })
}

/// Load and parse a Pipfile.lock from a file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ManifestResult<PipfileLock> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LentilError::io(format!("Failed to read {}", path), e))?;
    parse_lock(&content)
}

/// Digest of the manifest's canonical projection.
///
/// The projection mirrors the lockfile layout (_meta + default + develop);
/// serde_json maps sort their keys, so package declaration order does not
/// affect the digest.
pub fn content_hash(manifest: &Pipfile) -> ManifestResult<String> {
    let projection = serde_json::json!({
        "_meta": {
            "requires": manifest.requires.clone().unwrap_or_default(),
            "sources": manifest.sources,
        },
        "default": manifest.packages,
        "develop": manifest.dev_packages,
    });
    let payload = serde_json::to_string(&projection).map_err(|e| LentilError::JsonParse {
        message: e.to_string(),
    })?;
    Ok(hex::encode(Sha256::digest(payload.as_bytes())))
}

/// Check if the lockfile still corresponds to the manifest
pub fn is_fresh(lock: &PipfileLock, manifest: &Pipfile) -> ManifestResult<bool> {
    Ok(lock.meta.hash.sha256 == content_hash(manifest)?)
}
