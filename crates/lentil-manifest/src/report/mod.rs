//! Validation report summarizing a manifest check.

use std::fmt;

use serde::Serialize;

use crate::validate::{Diagnostic, Severity};

/// Outcome of validating a manifest
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Runtime packages whose name and constraint both parse
    pub runtime_packages: usize,

    /// Development packages whose name and constraint both parse
    pub dev_packages: usize,

    /// Declared package sources
    pub sources: usize,

    /// Interpreter target: the full pin when present, else the selector
    pub python_target: Option<String>,

    /// All findings, in manifest order
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Check if the manifest passed (warnings do not fail a check)
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Number of error-severity findings
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity findings
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// One-line summary of what the manifest declares
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} runtime packages, {} development packages, {} sources",
            self.runtime_packages, self.dev_packages, self.sources
        );
        if let Some(target) = &self.python_target {
            summary.push_str(&format!(", interpreter {}", target));
        }
        summary
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", diagnostic)?;
        }
        write!(f, "{}", self.summary())
    }
}
