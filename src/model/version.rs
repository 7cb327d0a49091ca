//! Package versions as they appear in lock file keys.
//!
//! Lock files carry versions written by many producers over the years, so
//! the text is parsed leniently. The core is a semantic version; legacy
//! four-part versions keep their fourth (revision) component alongside it.
//! The normalized form is what gets written back.

use std::fmt;
use std::str::FromStr;

use crate::error::{LockError, LockResult};

/// A resolved package version: `major.minor.patch[.revision][-pre][+build]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    semver: semver::Version,
    revision: u64,
}

impl Version {
    /// Create a three-part version.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            semver: semver::Version::new(major, minor, patch),
            revision: 0,
        }
    }

    /// Set the fourth component. Zero means none.
    pub const fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    /// The semantic part of the version.
    pub fn semver(&self) -> &semver::Version {
        &self.semver
    }

    /// The fourth component, or zero.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// This version with build metadata removed.
    ///
    /// Build metadata does not take part in identity.
    pub fn without_build(&self) -> Self {
        let mut version = self.clone();
        version.semver.build = semver::BuildMetadata::EMPTY;
        version
    }
}

impl From<semver::Version> for Version {
    fn from(semver: semver::Version) -> Self {
        Self { semver, revision: 0 }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.semver;
        write!(f, "{}.{}.{}", v.major, v.minor, v.patch)?;
        if self.revision != 0 {
            write!(f, ".{}", self.revision)?;
        }
        if !v.pre.is_empty() {
            write!(f, "-{}", v.pre)?;
        }
        if !v.build.is_empty() {
            write!(f, "+{}", v.build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = LockError;

    fn from_str(text: &str) -> LockResult<Self> {
        parse_version(text)
    }
}

/// Parse a version segment from a composite key.
///
/// - `1` and `1.2` are padded to `1.0.0` and `1.2.0`
/// - `1.2.3.4` keeps `4` as the revision; a zero revision is dropped
/// - prerelease and build metadata follow semver rules
pub fn parse_version(text: &str) -> LockResult<Version> {
    let invalid = |reason: &str| LockError::InvalidVersion {
        value: text.to_string(),
        reason: reason.to_string(),
    };

    if text.is_empty() {
        return Err(invalid("empty version"));
    }

    let (core, suffix) = text.split_at(text.find(['-', '+']).unwrap_or(text.len()));
    let parts: Vec<&str> = core.split('.').collect();
    let (core, revision) = match parts.as_slice() {
        [major] => (format!("{major}.0.0"), 0),
        [major, minor] => (format!("{major}.{minor}.0"), 0),
        [_, _, _] => (core.to_string(), 0),
        [major, minor, patch, revision] => {
            if revision.is_empty() || !revision.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("invalid revision component"));
            }
            let revision = revision
                .parse::<u64>()
                .map_err(|_| invalid("revision component out of range"))?;
            (format!("{major}.{minor}.{patch}"), revision)
        }
        _ => return Err(invalid("too many components")),
    };

    let semver = semver::Version::parse(&format!("{core}{suffix}")).map_err(|e| {
        LockError::InvalidVersion {
            value: text.to_string(),
            reason: e.to_string(),
        }
    })?;
    Ok(Version { semver, revision })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_part() {
        assert_eq!(parse_version("13.0.1").unwrap(), Version::new(13, 0, 1));
    }

    #[test]
    fn test_short_forms_are_padded() {
        assert_eq!(parse_version("2").unwrap(), Version::new(2, 0, 0));
        assert_eq!(parse_version("2.1").unwrap(), Version::new(2, 1, 0));
    }

    #[test]
    fn test_zero_revision_dropped() {
        let version = parse_version("4.3.0.0").unwrap();
        assert_eq!(version, Version::new(4, 3, 0));
        assert_eq!(version.to_string(), "4.3.0");
    }

    #[test]
    fn test_revision_kept() {
        let version = parse_version("3.5.0.2").unwrap();
        assert_eq!(version, Version::new(3, 5, 0).with_revision(2));
        assert_eq!(version.revision(), 2);
        assert_eq!(version.to_string(), "3.5.0.2");

        let version = parse_version("1.2.3.4-beta+abc").unwrap();
        assert_eq!(version.to_string(), "1.2.3.4-beta+abc");
        assert_eq!(version.semver().pre.as_str(), "beta");
    }

    #[test]
    fn test_prerelease_and_build() {
        let version = parse_version("1.0-beta.2+sha.abc").unwrap();
        assert_eq!(version.to_string(), "1.0.0-beta.2+sha.abc");
        assert_eq!(version.without_build().to_string(), "1.0.0-beta.2");
    }

    #[test]
    fn test_invalid() {
        for text in [
            "", "a.b.c", "1..2", "1.2.3.4.5", "01.0.0", "1.0.0-", "1.2.3.x", "1.2.3.",
            "1.2.3.+4",
        ] {
            assert!(
                matches!(parse_version(text), Err(LockError::InvalidVersion { .. })),
                "accepted {text:?}"
            );
        }
    }
}
