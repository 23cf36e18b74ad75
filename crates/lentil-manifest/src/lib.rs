//! Pipfile parsing and structural validation.
//!
//! This crate handles parsing, validation, and reporting for Pipfile
//! dependency manifests and their Pipfile.lock companions. It checks the
//! structure of a manifest (names, constraints, sources, interpreter
//! requirement) without resolving or fetching anything: resolution belongs
//! to the package installer consuming the manifest.

pub mod loader;
pub mod lock;
pub mod pipfile;
pub mod report;
pub mod validate;

// Re-export main types
pub use loader::{ManifestLoader, ManifestSource};
pub use lock::{content_hash, PipfileLock};
pub use pipfile::{
    parse_pipfile, serialize_pipfile, PackageSpec, PackageTable, Pipfile, RequiresSection,
    SourceSection,
};
pub use report::ValidationReport;
pub use validate::{validate, Diagnostic, Section, Severity};

use lentil_core::error::LentilError;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, LentilError>;
