//! Pipfile parsing and serialization.

use indexmap::IndexMap;
use lentil_core::error::LentilError;
use lentil_core::types::{SpecifierError, SpecifierSet};
use serde::{Deserialize, Serialize};

use crate::ManifestResult;

/// Complete Pipfile manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipfile {
    /// Package registries, in declaration order
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceSection>,

    /// Runtime packages
    #[serde(default)]
    pub packages: IndexMap<String, PackageSpec>,

    /// Development-only packages
    #[serde(default, rename = "dev-packages")]
    pub dev_packages: IndexMap<String, PackageSpec>,

    /// Interpreter requirement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<RequiresSection>,

    /// Named shell commands
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub scripts: IndexMap<String, String>,
}

/// Package registry declaration ([[source]])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSection {
    /// Registry index URL
    pub url: String,

    /// Whether TLS certificates are verified when fetching
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,

    /// Registry name, referenced by package `index` keys
    pub name: String,
}

/// Interpreter requirement ([requires])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RequiresSection {
    /// Minor-version selector ("3.11")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_version: Option<String>,

    /// Exact interpreter pin ("3.11.0")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_full_version: Option<String>,
}

/// Package requirement (bare constraint string or detailed table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackageSpec {
    /// Bare constraint string ("*", ">=2.28")
    Plain(String),

    /// Detailed table form
    Table(PackageTable),
}

/// Detailed package requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PackageTable {
    /// Version constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Extras to install with the package
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,

    /// Environment marker expression, carried opaquely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<String>,

    /// Name of the source this package is fetched from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    /// Git repository URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git: Option<String>,

    /// Git reference (branch, tag, or revision)
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,

    /// Local directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Local or remote archive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Install in editable mode
    #[serde(default, skip_serializing_if = "is_false")]
    pub editable: bool,
}

/// Default value for verify_ssl (true)
fn default_verify_ssl() -> bool {
    true
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl PackageSpec {
    /// The version constraint text, when one applies.
    ///
    /// Origin forms (git, path, file) without a `version` key carry no
    /// constraint; a bare table with no origin means "any version".
    pub fn constraint_text(&self) -> Option<&str> {
        match self {
            PackageSpec::Plain(constraint) => Some(constraint),
            PackageSpec::Table(table) => match table.version.as_deref() {
                Some(version) => Some(version),
                None if table.git.is_none() && table.path.is_none() && table.file.is_none() => {
                    Some("*")
                }
                None => None,
            },
        }
    }

    /// Parse the version constraint into a specifier set
    pub fn specifier(&self) -> Result<Option<SpecifierSet>, SpecifierError> {
        match self.constraint_text() {
            Some(constraint) => SpecifierSet::parse(constraint).map(Some),
            None => Ok(None),
        }
    }

    /// Check if any version is acceptable
    pub fn is_unconstrained(&self) -> bool {
        self.constraint_text() == Some("*")
    }

    /// Check if this is a git requirement
    pub fn is_git(&self) -> bool {
        matches!(self, PackageSpec::Table(table) if table.git.is_some())
    }

    /// Check if this is a local path requirement
    pub fn is_path(&self) -> bool {
        matches!(self, PackageSpec::Table(table) if table.path.is_some())
    }

    /// Check if this is an archive requirement
    pub fn is_file(&self) -> bool {
        matches!(self, PackageSpec::Table(table) if table.file.is_some())
    }
}

/// Parse TOML string to a Pipfile
pub fn parse_pipfile(content: &str) -> ManifestResult<Pipfile> {
    // First pass with toml_edit for located syntax errors
    content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| located_error(content, e.span().map(|s| s.start), e.to_string()))?;

    // Then parse with serde for type safety
    let manifest: Pipfile = toml::from_str(content)
        .map_err(|e| located_error(content, e.span().map(|s| s.start), e.message().to_string()))?;

    Ok(manifest)
}

/// Serialize a Pipfile to TOML
pub fn serialize_pipfile(manifest: &Pipfile) -> ManifestResult<String> {
    toml::to_string_pretty(manifest).map_err(|e| LentilError::ManifestParse {
        message: format!("TOML serialization error: {}", e),
        line: 0,
        column: 0,
    })
}

/// Load and parse a Pipfile from a file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ManifestResult<Pipfile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LentilError::io(format!("Failed to read {}", path), e))?;

    parse_pipfile(&content).map_err(|e| match e {
        LentilError::ManifestParse {
            message,
            line,
            column,
        } => LentilError::ManifestParse {
            message: format!("In file {}: {}", path, message),
            line,
            column,
        },
        other => other,
    })
}

/// Build a parse error with line/column resolved from a byte offset
fn located_error(content: &str, offset: Option<usize>, message: String) -> LentilError {
    let (line, column) = match offset {
        Some(offset) => position(content, offset),
        None => (0, 0),
    };
    LentilError::ManifestParse {
        message,
        line,
        column,
    }
}

/// 1-based line and column of a byte offset
fn position(content: &str, offset: usize) -> (usize, usize) {
    let prefix = &content[..offset.min(content.len())];
    let line = prefix.matches('\n').count() + 1;
    let column = prefix.chars().rev().take_while(|&c| c != '\n').count() + 1;
    (line, column)
}
