//! PEP 440 version specifiers (==, !=, >=, <=, >, <, ~=, ===, *).
//!
//! A SpecifierSet is a comma-separated conjunction of specifiers; a version
//! satisfies the set when it satisfies every member.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::version::{Version, VersionError};

/// Version constraint set (">=2.28, <3", "==1.4.*", "*")
#[derive(Debug, Clone, PartialEq)]
pub struct SpecifierSet {
    pub specifiers: Vec<Specifier>,
}

/// Individual version specifier
#[derive(Debug, Clone, PartialEq)]
pub struct Specifier {
    pub op: Op,
    /// Parsed right-hand side; absent for wildcard and arbitrary equality
    pub version: Option<Version>,
    /// Right-hand side as written, used for display and `===` comparison
    pub raw: String,
    /// True for the `.*` prefix-match forms of `==` and `!=`
    pub prefix: bool,
}

/// Comparison operator for version specifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,         // ==1.0.0
    Ne,         // !=1.0.0
    Gte,        // >=1.0.0
    Lte,        // <=1.0.0
    Gt,         // >1.0.0
    Lt,         // <1.0.0
    Compatible, // ~=1.4.2
    Arbitrary,  // ===anything
    Wildcard,   // *
}

/// Specifier parsing errors
#[derive(Error, Debug)]
pub enum SpecifierError {
    #[error("Invalid version specifier: {input}")]
    InvalidSpecifier { input: String },

    #[error("Prefix match '.*' is only allowed with == and !=: {input}")]
    PrefixNotAllowed { input: String },

    #[error("Compatible release '~=' requires at least two version segments: {input}")]
    CompatibleRelease { input: String },

    #[error(transparent)]
    Version(#[from] VersionError),
}

impl SpecifierSet {
    /// Parse a comma-separated specifier set; `*` alone means any version
    pub fn parse(input: &str) -> Result<Self, SpecifierError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SpecifierError::InvalidSpecifier {
                input: input.to_string(),
            });
        }
        if input == "*" {
            return Ok(SpecifierSet {
                specifiers: vec![Specifier::wildcard()],
            });
        }

        let specifiers = input
            .split(',')
            .map(|part| part.parse())
            .collect::<Result<Vec<Specifier>, SpecifierError>>()?;
        Ok(SpecifierSet { specifiers })
    }

    /// Check if a version satisfies every specifier in the set
    pub fn matches(&self, version: &Version) -> bool {
        self.specifiers.iter().all(|spec| spec.matches(version))
    }

    /// Check if this set accepts any version at all ("*")
    pub fn is_wildcard(&self) -> bool {
        self.specifiers.iter().all(|spec| spec.op == Op::Wildcard)
    }
}

impl Specifier {
    /// The any-version specifier
    pub fn wildcard() -> Self {
        Self {
            op: Op::Wildcard,
            version: None,
            raw: String::new(),
            prefix: false,
        }
    }

    /// Check if a version satisfies this specifier
    pub fn matches(&self, candidate: &Version) -> bool {
        let target = match (self.op, &self.version) {
            (Op::Wildcard, _) => return true,
            // Arbitrary equality compares the literal text; candidates are
            // already parsed here, so the canonical form stands in for it
            (Op::Arbitrary, _) => return candidate.to_string() == self.raw.trim(),
            (_, Some(target)) => target,
            (_, None) => return false,
        };

        match self.op {
            Op::Eq if self.prefix => release_prefix_matches(target, candidate),
            Op::Ne if self.prefix => !release_prefix_matches(target, candidate),
            Op::Eq => candidate.public_cmp(target) == Ordering::Equal,
            Op::Ne => candidate.public_cmp(target) != Ordering::Equal,
            Op::Gte => candidate.public_cmp(target) != Ordering::Less,
            Op::Lte => candidate.public_cmp(target) != Ordering::Greater,
            Op::Gt => candidate.public_cmp(target) == Ordering::Greater,
            Op::Lt => candidate.public_cmp(target) == Ordering::Less,
            Op::Compatible => compatible_matches(target, candidate),
            Op::Arbitrary | Op::Wildcard => unreachable!("handled above"),
        }
    }
}

/// Prefix match: epoch equal and every given release segment equal,
/// missing candidate segments reading as zero (==1.4.* matches 1.4)
fn release_prefix_matches(target: &Version, candidate: &Version) -> bool {
    candidate.epoch == target.epoch
        && target
            .release
            .iter()
            .enumerate()
            .all(|(i, &segment)| candidate.release_segment(i) == segment)
}

/// Compatible release: ~=2.2.1 means >=2.2.1, ==2.2.*
fn compatible_matches(target: &Version, candidate: &Version) -> bool {
    if candidate.epoch != target.epoch {
        return false;
    }
    let prefix_len = target.release.len().saturating_sub(1);
    let prefix_ok = target.release[..prefix_len]
        .iter()
        .enumerate()
        .all(|(i, &segment)| candidate.release_segment(i) == segment);
    prefix_ok && candidate.public_cmp(target) != Ordering::Less
}

impl FromStr for Specifier {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input == "*" {
            return Ok(Specifier::wildcard());
        }

        // Longest operators first so "===" is not read as "==" + "="
        let (op, rest) = if let Some(rest) = input.strip_prefix("===") {
            (Op::Arbitrary, rest)
        } else if let Some(rest) = input.strip_prefix("==") {
            (Op::Eq, rest)
        } else if let Some(rest) = input.strip_prefix("!=") {
            (Op::Ne, rest)
        } else if let Some(rest) = input.strip_prefix(">=") {
            (Op::Gte, rest)
        } else if let Some(rest) = input.strip_prefix("<=") {
            (Op::Lte, rest)
        } else if let Some(rest) = input.strip_prefix("~=") {
            (Op::Compatible, rest)
        } else if let Some(rest) = input.strip_prefix('>') {
            (Op::Gt, rest)
        } else if let Some(rest) = input.strip_prefix('<') {
            (Op::Lt, rest)
        } else {
            return Err(SpecifierError::InvalidSpecifier {
                input: input.to_string(),
            });
        };

        let raw = rest.trim();
        if raw.is_empty() {
            return Err(SpecifierError::InvalidSpecifier {
                input: input.to_string(),
            });
        }

        if op == Op::Arbitrary {
            return Ok(Specifier {
                op,
                version: None,
                raw: raw.to_string(),
                prefix: false,
            });
        }

        let (version_text, prefix) = match raw.strip_suffix(".*") {
            Some(stripped) => {
                if !matches!(op, Op::Eq | Op::Ne) {
                    return Err(SpecifierError::PrefixNotAllowed {
                        input: input.to_string(),
                    });
                }
                (stripped, true)
            }
            None => (raw, false),
        };

        let version: Version = version_text.parse()?;
        if op == Op::Compatible && version.release.len() < 2 {
            return Err(SpecifierError::CompatibleRelease {
                input: input.to_string(),
            });
        }

        Ok(Specifier {
            op,
            version: Some(version),
            raw: raw.to_string(),
            prefix,
        })
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            Op::Wildcard => write!(f, "*"),
            _ => write!(f, "{}{}", self.op, self.raw),
        }
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.specifiers.iter().map(Specifier::to_string).collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Gte => ">=",
            Op::Lte => "<=",
            Op::Gt => ">",
            Op::Lt => "<",
            Op::Compatible => "~=",
            Op::Arbitrary => "===",
            Op::Wildcard => "*",
        };
        write!(f, "{}", symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_wildcard() {
        let set = SpecifierSet::parse("*").unwrap();
        assert!(set.is_wildcard());
        assert!(set.matches(&version("0.0.1")));
        assert!(set.matches(&version("999.0")));
    }

    #[test]
    fn test_exact() {
        let set = SpecifierSet::parse("==1.2.3").unwrap();
        assert!(set.matches(&version("1.2.3")));
        assert!(set.matches(&version("1.2.3.0")));
        assert!(!set.matches(&version("1.2.4")));
    }

    #[test]
    fn test_prefix_match() {
        let set = SpecifierSet::parse("==1.4.*").unwrap();
        assert!(set.matches(&version("1.4")));
        assert!(set.matches(&version("1.4.7")));
        assert!(!set.matches(&version("1.5.0")));

        let set = SpecifierSet::parse("!=1.4.*").unwrap();
        assert!(!set.matches(&version("1.4.7")));
        assert!(set.matches(&version("1.5.0")));
    }

    #[test]
    fn test_ordered_operators() {
        let set = SpecifierSet::parse(">=2.28").unwrap();
        assert!(set.matches(&version("2.28.0")));
        assert!(set.matches(&version("2.31")));
        assert!(!set.matches(&version("2.27.9")));

        let set = SpecifierSet::parse("<2").unwrap();
        assert!(set.matches(&version("1.9.9")));
        assert!(!set.matches(&version("2.0")));
    }

    #[test]
    fn test_compatible_release() {
        let set = SpecifierSet::parse("~=2.2.1").unwrap();
        assert!(set.matches(&version("2.2.1")));
        assert!(set.matches(&version("2.2.9")));
        assert!(!set.matches(&version("2.3.0")));
        assert!(!set.matches(&version("2.2.0")));

        let set = SpecifierSet::parse("~=1.4").unwrap();
        assert!(set.matches(&version("1.4")));
        assert!(set.matches(&version("1.9")));
        assert!(!set.matches(&version("2.0")));
    }

    #[test]
    fn test_conjunction() {
        let set = SpecifierSet::parse(">=1.0, <2.0, !=1.5").unwrap();
        assert_eq!(set.specifiers.len(), 3);
        assert!(set.matches(&version("1.4")));
        assert!(!set.matches(&version("1.5")));
        assert!(!set.matches(&version("2.0")));
        assert!(!set.matches(&version("0.9")));
    }

    #[test]
    fn test_arbitrary_equality() {
        let set = SpecifierSet::parse("===1.0").unwrap();
        assert!(set.matches(&version("1.0")));
        // String comparison, not version comparison
        assert!(!set.matches(&version("1.0.0")));
    }

    #[test]
    fn test_invalid_specifiers() {
        assert!(SpecifierSet::parse("").is_err());
        assert!(SpecifierSet::parse("1.0").is_err());
        assert!(SpecifierSet::parse("^1.0").is_err());
        assert!(SpecifierSet::parse(">=1.0, ").is_err());
        assert!(SpecifierSet::parse(">=1.4.*").is_err());
        assert!(SpecifierSet::parse("~=2").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["*", "==1.4.*", ">=1.0, <2.0", "~=2.2.1", "===1.0"] {
            let set = SpecifierSet::parse(input).unwrap();
            assert_eq!(set.to_string(), input);
        }
    }
}
