//! PEP 440 version type.
//!
//! Provides a Version type that follows the Python version numbering
//! specification: `[N!]N(.N)*[{a|b|rc}N][.postN][.devN][+local]`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// PEP 440 version (epoch!release[pre][.post][.dev][+local])
#[derive(Debug, Clone)]
pub struct Version {
    pub epoch: u64,
    pub release: Vec<u64>,
    pub pre: Option<PreRelease>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
    pub local: Option<String>,
}

/// Pre-release segment (a1, b2, rc3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreRelease {
    pub tag: PreTag,
    pub number: u64,
}

/// Pre-release phase, ordered by precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreTag {
    Alpha,
    Beta,
    Rc,
}

/// Version parsing and validation errors
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version format: {input}")]
    InvalidFormat { input: String },

    #[error("Invalid number in version: {component}")]
    InvalidNumber { component: String },

    #[error("Invalid local version label: {local}")]
    InvalidLocal { local: String },
}

impl Version {
    /// Create a version from its release segments
    pub fn new(release: Vec<u64>) -> Self {
        Self {
            epoch: 0,
            release,
            pre: None,
            post: None,
            dev: None,
            local: None,
        }
    }

    /// Check if this is a pre-release or developmental version
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// Release segment at `index`, missing segments read as zero
    pub fn release_segment(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    /// Compare public version precedence, ignoring the local label.
    ///
    /// Within one release the phases order as dev < pre < final < post,
    /// and a dev segment sorts below the corresponding tagged release
    /// (1.0.dev1 < 1.0a1 < 1.0a1.post1... is not a thing, but
    /// 1.0a1.dev1 < 1.0a1 holds).
    pub fn public_cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| cmp_release(&self.release, &other.release))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post_key().cmp(&other.post_key()))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
    }

    /// Rank of the pre-release phase: a bare dev release sorts below any
    /// tagged pre-release, which sorts below the final release.
    fn pre_key(&self) -> (u8, u8, u64) {
        match &self.pre {
            Some(pre) => (1, pre.tag as u8, pre.number),
            None if self.post.is_none() && self.dev.is_some() => (0, 0, 0),
            None => (2, 0, 0),
        }
    }

    fn post_key(&self) -> (u8, u64) {
        match self.post {
            Some(number) => (1, number),
            None => (0, 0),
        }
    }

    fn dev_key(&self) -> (u8, u64) {
        match self.dev {
            Some(number) => (0, number),
            None => (1, 0),
        }
    }
}

/// Compare release tuples with implicit zero padding (1.0 == 1.0.0)
fn cmp_release(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.public_cmp(other)
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        let body = input.strip_prefix('v').unwrap_or(&input);

        // Split off the local version label
        let (body, local) = match body.split_once('+') {
            Some((b, label)) => (b, Some(label.to_string())),
            None => (body, None),
        };
        if let Some(ref label) = local {
            let valid = !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
            if !valid {
                return Err(VersionError::InvalidLocal {
                    local: label.clone(),
                });
            }
        }

        // Split off the epoch
        let (epoch, body) = match body.split_once('!') {
            Some((e, rest)) => {
                let epoch = e.parse().map_err(|_| VersionError::InvalidNumber {
                    component: e.to_string(),
                })?;
                (epoch, rest)
            }
            None => (0u64, body),
        };

        let bytes = body.as_bytes();
        let mut pos = 0;

        // Release segments: N(.N)*
        let mut release = Vec::new();
        match take_number(body, &mut pos)? {
            Some(segment) => release.push(segment),
            None => {
                return Err(VersionError::InvalidFormat {
                    input: s.trim().to_string(),
                })
            }
        }
        while bytes.get(pos) == Some(&b'.')
            && bytes.get(pos + 1).is_some_and(|b| b.is_ascii_digit())
        {
            pos += 1;
            if let Some(segment) = take_number(body, &mut pos)? {
                release.push(segment);
            }
        }

        let pre = take_phase(
            body,
            &mut pos,
            &[
                ("alpha", PreTag::Alpha),
                ("preview", PreTag::Rc),
                ("beta", PreTag::Beta),
                ("pre", PreTag::Rc),
                ("rc", PreTag::Rc),
                ("a", PreTag::Alpha),
                ("b", PreTag::Beta),
                ("c", PreTag::Rc),
            ],
        )?
        .map(|(tag, number)| PreRelease { tag, number });

        let mut post = take_phase(body, &mut pos, &[("post", ()), ("rev", ()), ("r", ())])?
            .map(|(_, number)| number);

        // Implicit post release: 1.0-1
        if post.is_none()
            && bytes.get(pos) == Some(&b'-')
            && bytes.get(pos + 1).is_some_and(|b| b.is_ascii_digit())
        {
            pos += 1;
            post = take_number(body, &mut pos)?;
        }

        let dev = take_phase(body, &mut pos, &[("dev", ())])?.map(|(_, number)| number);

        if pos != body.len() {
            return Err(VersionError::InvalidFormat {
                input: s.trim().to_string(),
            });
        }

        Ok(Version {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }
}

/// Consume a run of ASCII digits starting at `pos`
fn take_number(input: &str, pos: &mut usize) -> Result<Option<u64>, VersionError> {
    let bytes = input.as_bytes();
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos == start {
        return Ok(None);
    }
    let component = &input[start..*pos];
    component
        .parse()
        .map(Some)
        .map_err(|_| VersionError::InvalidNumber {
            component: component.to_string(),
        })
}

/// Consume an optional phase segment: [.-_]tag[.-_]N
///
/// Aliases must be ordered longest first so "alpha" wins over "a".
/// Returns the tag payload and its number (zero when omitted).
fn take_phase<T: Copy>(
    input: &str,
    pos: &mut usize,
    aliases: &[(&str, T)],
) -> Result<Option<(T, u64)>, VersionError> {
    let bytes = input.as_bytes();
    let mut look = *pos;
    if matches!(bytes.get(look), Some(b'.' | b'-' | b'_')) {
        look += 1;
    }
    for (alias, payload) in aliases {
        if !input[look..].starts_with(alias) {
            continue;
        }
        let mut end = look + alias.len();
        // A trailing letter means this is a different word
        if bytes.get(end).is_some_and(|b| b.is_ascii_lowercase()) {
            continue;
        }
        if matches!(bytes.get(end), Some(b'.' | b'-' | b'_'))
            && bytes.get(end + 1).is_some_and(|b| b.is_ascii_digit())
        {
            end += 1;
        }
        let number = take_number(input, &mut end)?.unwrap_or(0);
        *pos = end;
        return Ok(Some((*payload, number)));
    }
    Ok(None)
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", release.join("."))?;

        if let Some(ref pre) = self.pre {
            write!(f, "{}{}", pre.tag, pre.number)?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{}", post)?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{}", dev)?;
        }
        if let Some(ref local) = self.local {
            write!(f, "+{}", local)?;
        }
        Ok(())
    }
}

impl fmt::Display for PreTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            PreTag::Alpha => "a",
            PreTag::Beta => "b",
            PreTag::Rc => "rc",
        };
        write!(f, "{}", tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = Version::from_str("3.11.0").unwrap();
        assert_eq!(v.epoch, 0);
        assert_eq!(v.release, vec![3, 11, 0]);
        assert_eq!(v.pre, None);
        assert_eq!(v.post, None);
        assert_eq!(v.dev, None);
        assert_eq!(v.local, None);
    }

    #[test]
    fn test_version_with_prerelease() {
        let v = Version::from_str("1.2.3rc1").unwrap();
        assert_eq!(v.release, vec![1, 2, 3]);
        assert_eq!(
            v.pre,
            Some(PreRelease {
                tag: PreTag::Rc,
                number: 1
            })
        );

        let v = Version::from_str("2.0-alpha.3").unwrap();
        assert_eq!(
            v.pre,
            Some(PreRelease {
                tag: PreTag::Alpha,
                number: 3
            })
        );
    }

    #[test]
    fn test_version_with_post_and_dev() {
        let v = Version::from_str("1.0.post2").unwrap();
        assert_eq!(v.post, Some(2));

        let v = Version::from_str("1.0.dev5").unwrap();
        assert_eq!(v.dev, Some(5));

        let v = Version::from_str("1.0-1").unwrap();
        assert_eq!(v.post, Some(1));
    }

    #[test]
    fn test_version_with_epoch_and_local() {
        let v = Version::from_str("2!1.0+ubuntu.1").unwrap();
        assert_eq!(v.epoch, 2);
        assert_eq!(v.local, Some("ubuntu.1".to_string()));
    }

    #[test]
    fn test_version_display() {
        for canonical in ["1.2.3", "1.0a2", "1.0rc1", "2!1.4.post1", "1.0.dev3", "1.0+local"] {
            let v = Version::from_str(canonical).unwrap();
            assert_eq!(v.to_string(), canonical);
        }
        // Alternate spellings normalize
        assert_eq!(Version::from_str("v1.0-alpha").unwrap().to_string(), "1.0a0");
        assert_eq!(Version::from_str("1.0.preview2").unwrap().to_string(), "1.0rc2");
    }

    #[test]
    fn test_zero_padding_equality() {
        assert_eq!(
            Version::from_str("1.0").unwrap(),
            Version::from_str("1.0.0").unwrap()
        );
        assert_eq!(
            Version::from_str("3.11").unwrap(),
            Version::from_str("3.11.0").unwrap()
        );
    }

    #[test]
    fn test_version_precedence_chain() {
        let chain = [
            "1.0.dev0",
            "1.0.dev1",
            "1.0a1.dev1",
            "1.0a1",
            "1.0b2",
            "1.0rc1",
            "1.0",
            "1.0+local",
            "1.0.post1",
            "1.1.dev1",
            "1.1",
            "2!0.1",
        ];
        let parsed: Vec<Version> = chain
            .iter()
            .map(|s| Version::from_str(s).unwrap())
            .collect();
        for pair in parsed.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_invalid_versions() {
        for input in ["", "abc", "1.0.x", "1..0", "1.0!2", "1.0+", "1.0+bad/label"] {
            assert!(Version::from_str(input).is_err(), "{:?} should not parse", input);
        }
    }

    #[test]
    fn test_is_prerelease() {
        assert!(Version::from_str("1.0a1").unwrap().is_prerelease());
        assert!(Version::from_str("1.0.dev1").unwrap().is_prerelease());
        assert!(!Version::from_str("1.0.post1").unwrap().is_prerelease());
        assert!(!Version::from_str("1.0").unwrap().is_prerelease());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn version_round_trip(
            epoch in 0u64..10,
            release in prop::collection::vec(0u64..1000, 1..5),
            pre_number in prop::option::of(0u64..100),
            post in prop::option::of(0u64..100),
            dev in prop::option::of(0u64..100),
        ) {
            let original = Version {
                epoch,
                release: release.clone(),
                pre: pre_number.map(|number| PreRelease { tag: PreTag::Beta, number }),
                post,
                dev,
                local: None,
            };

            let parsed = Version::from_str(&original.to_string()).unwrap();

            prop_assert_eq!(parsed.epoch, original.epoch);
            prop_assert_eq!(parsed.release, original.release);
            prop_assert_eq!(parsed.pre, original.pre);
            prop_assert_eq!(parsed.post, original.post);
            prop_assert_eq!(parsed.dev, original.dev);
        }
    }

    proptest! {
        #[test]
        fn version_comparison_transitivity(
            a in prop::collection::vec(0u64..20, 1..4),
            b in prop::collection::vec(0u64..20, 1..4),
            c in prop::collection::vec(0u64..20, 1..4),
        ) {
            let a = Version::new(a);
            let b = Version::new(b);
            let c = Version::new(c);

            if a < b && b < c {
                prop_assert!(a < c, "Transitivity violated: {} < {} < {} but {} >= {}", a, b, c, a, c);
            }
            if a > b && b > c {
                prop_assert!(a > c, "Transitivity violated: {} > {} > {} but {} <= {}", a, b, c, a, c);
            }
        }
    }
}
