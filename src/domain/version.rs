use crate::domain::ReleaseSignal;
use crate::error::{BffError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Ordering follows semver precedence: the numeric triple first, then a
/// pre-release sorts before the release it precedes. Build metadata only
/// separates versions that are otherwise equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
    pub build: Option<String>,
}

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: None,
            build: None,
        }
    }

    /// Parse a semantic version string (e.g., "1.2.3", "1.2.3-rc.1+build.5")
    pub fn parse(input: &str) -> Result<Self> {
        let parsed = semver::Version::parse(input.trim())
            .map_err(|e| BffError::version(format!("'{}' is not a semantic version: {}", input, e)))?;

        Ok(Version {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre: (!parsed.pre.is_empty()).then(|| parsed.pre.to_string()),
            build: (!parsed.build.is_empty()).then(|| parsed.build.to_string()),
        })
    }

    /// A version without pre-release or build metadata is eligible as a release point
    pub fn is_release(&self) -> bool {
        self.pre.is_none() && self.build.is_none()
    }

    /// Bump version according to release type
    ///
    /// # Returns
    /// * `Err(Version)` - If the bumped component is already `u64::MAX`
    pub fn bump(&self, release_type: ReleaseType) -> Result<Self> {
        let overflow = || {
            BffError::version(format!(
                "Cannot make a {} release after {}: component overflows",
                release_type, self
            ))
        };

        let next = match release_type {
            ReleaseType::Major => {
                Version::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            ReleaseType::Minor => Version::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            ReleaseType::Patch => Version::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        };
        Ok(next)
    }

    /// Compute the next release from the accumulated commit signal
    pub fn next(&self, signal: ReleaseSignal) -> Result<Self> {
        self.bump(ReleaseType::for_signal(self.major, signal))
    }
}

/// Pure version arithmetic: `(current, breaking, feature) -> next`.
///
/// Before 1.0 there is no stable public contract, so breaking changes bump
/// the minor component like features do. Fails only when the bumped
/// component would overflow.
pub fn next_version(current: &Version, breaking: bool, feature: bool) -> Result<Version> {
    current.next(ReleaseSignal { breaking, feature })
}

fn compare_prerelease(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (semver::Prerelease::new(a), semver::Prerelease::new(b)) {
            (Ok(left), Ok(right)) => left.cmp(&right),
            _ => a.cmp(b),
        },
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| compare_prerelease(&self.pre, &other.pre))
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = BffError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Magnitude of the next release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
}

impl ReleaseType {
    /// Decide the release type for a current major version and commit signal
    pub fn for_signal(major: u64, signal: ReleaseSignal) -> Self {
        if major == 0 {
            if signal.breaking || signal.feature {
                ReleaseType::Minor
            } else {
                ReleaseType::Patch
            }
        } else if signal.breaking {
            ReleaseType::Major
        } else if signal.feature {
            ReleaseType::Minor
        } else {
            ReleaseType::Patch
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
        assert!(v.is_release());
    }

    #[test]
    fn test_version_parse_trims_whitespace() {
        assert_eq!(Version::parse(" 0.4.1\n").unwrap(), Version::new(0, 4, 1));
    }

    #[test]
    fn test_version_parse_prerelease_and_build() {
        let v = Version::parse("1.0.0-rc.1+build.7").unwrap();
        assert_eq!(v.pre.as_deref(), Some("rc.1"));
        assert_eq!(v.build.as_deref(), Some("build.7"));
        assert!(!v.is_release());
        assert_eq!(v.to_string(), "1.0.0-rc.1+build.7");
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("v1.2.3").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("").is_err());
    }

    #[test]
    fn test_version_orders_by_numeric_triple() {
        assert!(Version::new(1, 10, 0) > Version::new(1, 9, 9));
        assert!(Version::new(2, 0, 0) > Version::new(1, 99, 99));
    }

    #[test]
    fn test_prerelease_sorts_before_release() {
        let release = Version::new(1, 0, 0);
        let rc1 = Version::parse("1.0.0-rc.1").unwrap();
        let rc2 = Version::parse("1.0.0-rc.2").unwrap();
        let rc10 = Version::parse("1.0.0-rc.10").unwrap();

        assert!(rc1 < release);
        assert!(rc1 < rc2);
        assert!(rc2 < rc10);
        assert!(release < Version::new(1, 0, 1));
        assert!(Version::parse("1.0.1-alpha").unwrap() > release);
    }

    #[test]
    fn test_bump_at_component_limit_is_error() {
        let max = u64::MAX;
        assert!(matches!(
            next_version(&Version::new(max, 0, 0), true, false),
            Err(BffError::Version(_))
        ));
        assert!(next_version(&Version::new(1, max, 0), false, true).is_err());
        assert!(next_version(&Version::new(0, max, 3), true, false).is_err());
        assert!(next_version(&Version::new(1, 2, max), false, false).is_err());

        // the other components may sit at the limit
        assert_eq!(
            next_version(&Version::new(1, max, max), true, false).unwrap(),
            Version::new(2, 0, 0)
        );
    }

    #[test]
    fn test_pre_one_zero_breaking_and_feature_bump_minor() {
        let v = Version::new(0, 4, 7);
        assert_eq!(next_version(&v, true, false).unwrap(), Version::new(0, 5, 0));
        assert_eq!(next_version(&v, false, true).unwrap(), Version::new(0, 5, 0));
        assert_eq!(next_version(&v, true, true).unwrap(), Version::new(0, 5, 0));
    }

    #[test]
    fn test_pre_one_zero_without_signal_bumps_patch() {
        let v = Version::new(0, 4, 7);
        assert_eq!(next_version(&v, false, false).unwrap(), Version::new(0, 4, 8));
    }

    #[test]
    fn test_stable_breaking_bumps_major_regardless_of_feature() {
        let v = Version::new(1, 2, 0);
        assert_eq!(next_version(&v, true, false).unwrap(), Version::new(2, 0, 0));
        assert_eq!(next_version(&v, true, true).unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_stable_feature_bumps_minor() {
        let v = Version::new(3, 1, 4);
        assert_eq!(next_version(&v, false, true).unwrap(), Version::new(3, 2, 0));
    }

    #[test]
    fn test_stable_without_signal_bumps_patch() {
        let v = Version::new(3, 1, 4);
        assert_eq!(next_version(&v, false, false).unwrap(), Version::new(3, 1, 5));
    }

    #[test]
    fn test_next_drops_prerelease_metadata() {
        let v = Version::parse("1.2.3-beta.2").unwrap();
        let next = next_version(&v, false, false).unwrap();
        assert!(next.is_release());
        assert_eq!(next.to_string(), "1.2.4");
    }

    #[test]
    fn test_release_type_display() {
        assert_eq!(ReleaseType::Major.to_string(), "major");
        assert_eq!(ReleaseType::Minor.to_string(), "minor");
        assert_eq!(ReleaseType::Patch.to_string(), "patch");
    }

    #[test]
    fn test_release_type_table() {
        let none = ReleaseSignal::default();
        let breaking = ReleaseSignal::new(true, false);
        let feature = ReleaseSignal::new(false, true);

        assert_eq!(ReleaseType::for_signal(0, breaking), ReleaseType::Minor);
        assert_eq!(ReleaseType::for_signal(0, feature), ReleaseType::Minor);
        assert_eq!(ReleaseType::for_signal(0, none), ReleaseType::Patch);
        assert_eq!(ReleaseType::for_signal(1, breaking), ReleaseType::Major);
        assert_eq!(ReleaseType::for_signal(1, feature), ReleaseType::Minor);
        assert_eq!(ReleaseType::for_signal(1, none), ReleaseType::Patch);
    }
}
