//! Package name validation and normalization.
//!
//! Distribution names must start and end with an ASCII alphanumeric and may
//! contain `.`, `_`, and `-` in between. Comparisons use the normalized
//! form: lowercase with runs of separators collapsed to a single `-`, so
//! "Pillow_HEIF" and "pillow-heif" refer to the same package.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Validated package name carrying its normalized form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName {
    raw: String,
    normalized: String,
}

/// Package name validation errors
#[derive(Error, Debug)]
pub enum NameError {
    #[error("Package name must not be empty")]
    Empty,

    #[error("Invalid package name: {name}")]
    InvalidName { name: String },
}

impl PackageName {
    /// Check if a name is syntactically valid
    pub fn is_valid(name: &str) -> bool {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if !first.is_ascii_alphanumeric() {
            return false;
        }
        if let Some(last) = name.chars().last() {
            if !last.is_ascii_alphanumeric() {
                return false;
            }
        }
        name.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    }

    /// Normalize a name for comparison (lowercase, separator runs to "-")
    pub fn normalize(name: &str) -> String {
        let mut normalized = String::with_capacity(name.len());
        let mut in_separator = false;
        for c in name.chars() {
            if matches!(c, '.' | '_' | '-') {
                in_separator = true;
                continue;
            }
            if in_separator {
                normalized.push('-');
                in_separator = false;
            }
            normalized.push(c.to_ascii_lowercase());
        }
        normalized
    }

    /// The name as written in the manifest
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The normalized comparison form
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl FromStr for PackageName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(NameError::Empty);
        }
        if !Self::is_valid(s) {
            return Err(NameError::InvalidName {
                name: s.to_string(),
            });
        }
        Ok(PackageName {
            raw: s.to_string(),
            normalized: Self::normalize(s),
        })
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(PackageName::is_valid("requests"));
        assert!(PackageName::is_valid("pillow-heif"));
        assert!(PackageName::is_valid("opencv_python"));
        assert!(PackageName::is_valid("zope.interface"));
        assert!(PackageName::is_valid("a"));
        assert!(PackageName::is_valid("123tool"));

        assert!(!PackageName::is_valid(""));
        assert!(!PackageName::is_valid("-requests"));
        assert!(!PackageName::is_valid("requests-"));
        assert!(!PackageName::is_valid(".hidden"));
        assert!(!PackageName::is_valid("has space"));
        assert!(!PackageName::is_valid("has/slash"));
    }

    #[test]
    fn test_normalization() {
        assert_eq!(PackageName::normalize("Requests"), "requests");
        assert_eq!(PackageName::normalize("Pillow_HEIF"), "pillow-heif");
        assert_eq!(PackageName::normalize("zope.interface"), "zope-interface");
        assert_eq!(PackageName::normalize("a--b__c..d"), "a-b-c-d");
    }

    #[test]
    fn test_parse() {
        let name: PackageName = "Pillow-HEIF".parse().unwrap();
        assert_eq!(name.as_str(), "Pillow-HEIF");
        assert_eq!(name.normalized(), "pillow-heif");
        assert_eq!(name.to_string(), "Pillow-HEIF");

        assert!("".parse::<PackageName>().is_err());
        assert!("-bad".parse::<PackageName>().is_err());
    }
}
