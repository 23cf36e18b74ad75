//! Structural validation of Pipfile manifests.
//!
//! Validation never stops at the first problem: every check runs and the
//! findings accumulate as diagnostics so a single pass reports everything
//! wrong with a manifest.

use std::collections::{HashMap, HashSet};
use std::fmt;

use indexmap::IndexMap;
use lentil_core::types::{PackageName, PythonSelector, Version};
use serde::Serialize;
use url::Url;

use crate::pipfile::{PackageSpec, Pipfile, SourceSection};
use crate::report::ValidationReport;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// Manifest section a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Sources,
    Packages,
    DevPackages,
    Requires,
    Scripts,
}

/// A single validation finding
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub section: Section,
    /// Package, source, or field the finding is about
    pub subject: String,
    pub message: String,
}

impl Diagnostic {
    fn error(section: Section, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            section,
            subject: subject.into(),
            message: message.into(),
        }
    }

    fn warning(section: Section, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            section,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Validate a manifest and produce the full report
pub fn validate(manifest: &Pipfile) -> ValidationReport {
    let mut diagnostics = Vec::new();

    let source_names = check_sources(&manifest.sources, &mut diagnostics);
    check_package_table(
        Section::Packages,
        &manifest.packages,
        &source_names,
        &mut diagnostics,
    );
    check_package_table(
        Section::DevPackages,
        &manifest.dev_packages,
        &source_names,
        &mut diagnostics,
    );
    check_requires(manifest, &mut diagnostics);
    check_scripts(manifest, &mut diagnostics);

    ValidationReport {
        runtime_packages: resolvable_count(&manifest.packages),
        dev_packages: resolvable_count(&manifest.dev_packages),
        sources: manifest.sources.len(),
        python_target: python_target(manifest),
        diagnostics,
    }
}

/// Validate source declarations; returns the declared source names
fn check_sources(sources: &[SourceSection], diagnostics: &mut Vec<Diagnostic>) -> HashSet<String> {
    if sources.is_empty() {
        diagnostics.push(Diagnostic::warning(
            Section::Sources,
            "source",
            "no package source declared; the installer's default registry applies",
        ));
    }

    let mut names = HashSet::new();
    for source in sources {
        let subject = if source.name.is_empty() {
            source.url.as_str()
        } else {
            source.name.as_str()
        };

        if source.name.is_empty() {
            diagnostics.push(Diagnostic::error(
                Section::Sources,
                subject,
                "source name must not be empty",
            ));
        } else if !names.insert(source.name.clone()) {
            diagnostics.push(Diagnostic::error(
                Section::Sources,
                subject,
                "duplicate source name",
            ));
        }

        match Url::parse(&source.url) {
            Err(e) => diagnostics.push(Diagnostic::error(
                Section::Sources,
                subject,
                format!("URL '{}' is not well-formed: {}", source.url, e),
            )),
            Ok(url) => match url.scheme() {
                "https" | "file" => {}
                "http" => diagnostics.push(Diagnostic::warning(
                    Section::Sources,
                    subject,
                    "registry URL uses plain HTTP",
                )),
                scheme => diagnostics.push(Diagnostic::error(
                    Section::Sources,
                    subject,
                    format!("unsupported URL scheme '{}'", scheme),
                )),
            },
        }

        if !source.verify_ssl {
            diagnostics.push(Diagnostic::warning(
                Section::Sources,
                subject,
                "TLS verification is disabled",
            ));
        }
    }
    names
}

/// Validate one package table (runtime or development)
fn check_package_table(
    section: Section,
    table: &IndexMap<String, PackageSpec>,
    source_names: &HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    // First spelling seen for each normalized name
    let mut seen: HashMap<String, String> = HashMap::new();

    for (name, spec) in table {
        if !PackageName::is_valid(name) {
            diagnostics.push(Diagnostic::error(
                section,
                name,
                "invalid package name; names start and end with a letter or digit \
                 and may contain '.', '_', '-' in between",
            ));
        } else {
            let normalized = PackageName::normalize(name);
            match seen.get(&normalized) {
                Some(first) => diagnostics.push(Diagnostic::error(
                    section,
                    name,
                    format!("duplicate of '{}' after name normalization", first),
                )),
                None => {
                    seen.insert(normalized, name.clone());
                }
            }
        }

        check_spec(section, name, spec, source_names, diagnostics);
    }
}

/// Validate a single package requirement
fn check_spec(
    section: Section,
    name: &str,
    spec: &PackageSpec,
    source_names: &HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Err(e) = spec.specifier() {
        diagnostics.push(Diagnostic::error(
            section,
            name,
            format!("invalid version constraint: {}", e),
        ));
    }

    let PackageSpec::Table(table) = spec else {
        return;
    };

    let origins = [
        table.version.is_some(),
        table.git.is_some(),
        table.path.is_some(),
        table.file.is_some(),
    ];
    if origins.iter().filter(|&&origin| origin).count() > 1 {
        diagnostics.push(Diagnostic::error(
            section,
            name,
            "may declare only one of version, git, path, or file",
        ));
    }

    if table.git_ref.is_some() && table.git.is_none() {
        diagnostics.push(Diagnostic::error(
            section,
            name,
            "'ref' requires a 'git' URL",
        ));
    }

    if table.editable && table.git.is_none() && table.path.is_none() {
        diagnostics.push(Diagnostic::warning(
            section,
            name,
            "'editable' only applies to path or VCS requirements",
        ));
    }

    for extra in &table.extras {
        if !PackageName::is_valid(extra) {
            diagnostics.push(Diagnostic::error(
                section,
                name,
                format!("invalid extra name '{}'", extra),
            ));
        }
    }

    if let Some(index) = &table.index {
        if !source_names.contains(index) {
            diagnostics.push(Diagnostic::error(
                section,
                name,
                format!("index '{}' does not match any declared source", index),
            ));
        }
    }
}

/// Validate the [requires] section
fn check_requires(manifest: &Pipfile, diagnostics: &mut Vec<Diagnostic>) {
    let Some(requires) = &manifest.requires else {
        return;
    };

    let selector = requires.python_version.as_ref().and_then(|text| {
        match text.parse::<PythonSelector>() {
            Ok(selector) => Some(selector),
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    Section::Requires,
                    "python_version",
                    format!("invalid version selector '{}': {}", text, e),
                ));
                None
            }
        }
    });

    let full = requires.python_full_version.as_ref().and_then(|text| {
        match text.parse::<Version>() {
            Ok(version) => Some(version),
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    Section::Requires,
                    "python_full_version",
                    format!("invalid version '{}': {}", text, e),
                ));
                None
            }
        }
    });

    if let (Some(selector), Some(full)) = (selector, full) {
        if !selector.selects(&full) {
            diagnostics.push(Diagnostic::error(
                Section::Requires,
                "python_full_version",
                format!("'{}' does not satisfy python_version '{}'", full, selector),
            ));
        }
    }
}

/// Validate the [scripts] section
fn check_scripts(manifest: &Pipfile, diagnostics: &mut Vec<Diagnostic>) {
    for (name, command) in &manifest.scripts {
        if name.trim().is_empty() {
            diagnostics.push(Diagnostic::error(
                Section::Scripts,
                name,
                "script name must not be empty",
            ));
        }
        if command.trim().is_empty() {
            diagnostics.push(Diagnostic::error(
                Section::Scripts,
                name,
                "script command must not be empty",
            ));
        }
    }
}

/// Packages whose name and constraint both parse
fn resolvable_count(table: &IndexMap<String, PackageSpec>) -> usize {
    table
        .iter()
        .filter(|(name, spec)| PackageName::is_valid(name) && spec.specifier().is_ok())
        .count()
}

/// The declared interpreter target: the full pin when present
fn python_target(manifest: &Pipfile) -> Option<String> {
    let requires = manifest.requires.as_ref()?;
    requires
        .python_full_version
        .clone()
        .or_else(|| requires.python_version.clone())
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Sources => "source",
            Section::Packages => "packages",
            Section::DevPackages => "dev-packages",
            Section::Requires => "requires",
            Section::Scripts => "scripts",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.section, self.subject, self.message
        )
    }
}
