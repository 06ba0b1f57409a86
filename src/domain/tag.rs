use crate::boundary::BoundaryWarning;
use crate::domain::Version;
use crate::error::{BffError, Result};
use log::debug;
use std::collections::HashMap;

/// Parse a release version from a tag name (e.g., "v1.2.3" -> Version(1,2,3))
///
/// The prefix is stripped when present. Tags that are not semantic versions,
/// or that carry pre-release or build metadata, are rejected with
/// [`BffError::MalformedTag`].
pub fn parse_release_tag(tag: &str, prefix: &str) -> Result<Version> {
    let version_part = tag.strip_prefix(prefix).unwrap_or(tag);

    let version = Version::parse(version_part)
        .map_err(|e| BffError::malformed_tag(tag, e.to_string()))?;

    if !version.is_release() {
        return Err(BffError::malformed_tag(tag, "pre-release or build metadata"));
    }

    Ok(version)
}

/// Commit hash -> release version, built fresh for every resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagIndex {
    versions: HashMap<String, Version>,
}

impl TagIndex {
    /// Build the index from `(tag name, commit hash)` pairs.
    ///
    /// Unusable tags are skipped and reported as warnings. When two valid
    /// tags point at the same commit the last one seen wins.
    pub fn build<I>(tags: I, prefix: &str) -> (Self, Vec<BoundaryWarning>)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut versions = HashMap::new();
        let mut warnings = Vec::new();

        for (name, hash) in tags {
            debug!("looking at tag {} ({})", name, hash);
            match parse_release_tag(&name, prefix) {
                Ok(version) => {
                    versions.insert(hash, version);
                }
                Err(BffError::MalformedTag { tag, reason }) => {
                    debug!("tag {} skipped: {}", tag, reason);
                    let warning = if is_prerelease_tag(&tag, prefix) {
                        BoundaryWarning::PrereleaseTag { tag }
                    } else {
                        BoundaryWarning::MalformedTag { tag, reason }
                    };
                    warnings.push(warning);
                }
                Err(other) => {
                    warnings.push(BoundaryWarning::MalformedTag {
                        tag: name,
                        reason: other.to_string(),
                    });
                }
            }
        }

        (TagIndex { versions }, warnings)
    }

    pub fn get(&self, hash: &str) -> Option<&Version> {
        self.versions.get(hash)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

fn is_prerelease_tag(tag: &str, prefix: &str) -> bool {
    let version_part = tag.strip_prefix(prefix).unwrap_or(tag);
    Version::parse(version_part).is_ok_and(|v| !v.is_release())
}
