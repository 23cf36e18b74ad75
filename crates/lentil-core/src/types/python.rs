//! Interpreter version selectors.
//!
//! A selector like "3.11" picks out every interpreter release whose leading
//! segments match; the full pin "3.11.0" is an ordinary [`Version`].

use std::fmt;
use std::str::FromStr;

use super::version::{Version, VersionError};

/// Minor-version selector for the [requires] section ("3" or "3.11")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonSelector {
    pub parts: Vec<u64>,
}

impl PythonSelector {
    /// Check if a full interpreter version falls under this selector
    pub fn selects(&self, version: &Version) -> bool {
        version.epoch == 0
            && !version.is_prerelease()
            && self
                .parts
                .iter()
                .enumerate()
                .all(|(i, &part)| version.release_segment(i) == part)
    }
}

impl FromStr for PythonSelector {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let parts = input
            .split('.')
            .map(|part| {
                part.parse().map_err(|_| VersionError::InvalidNumber {
                    component: part.to_string(),
                })
            })
            .collect::<Result<Vec<u64>, VersionError>>()?;
        if parts.is_empty() || parts.len() > 3 {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }
        Ok(PythonSelector { parts })
    }
}

impl fmt::Display for PythonSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_selector_parse() {
        let selector: PythonSelector = "3.11".parse().unwrap();
        assert_eq!(selector.parts, vec![3, 11]);
        assert_eq!(selector.to_string(), "3.11");

        assert!("".parse::<PythonSelector>().is_err());
        assert!("3.x".parse::<PythonSelector>().is_err());
        assert!("3.11.0.1".parse::<PythonSelector>().is_err());
    }

    #[test]
    fn test_selects() {
        let selector: PythonSelector = "3.11".parse().unwrap();
        assert!(selector.selects(&version("3.11.0")));
        assert!(selector.selects(&version("3.11.9")));
        assert!(!selector.selects(&version("3.12.0")));
        assert!(!selector.selects(&version("3.11.0rc1")));

        let major_only: PythonSelector = "3".parse().unwrap();
        assert!(major_only.selects(&version("3.8.10")));
        assert!(!major_only.selects(&version("2.7.18")));
    }
}
