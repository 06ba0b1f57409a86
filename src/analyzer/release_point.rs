use crate::analyzer::walk::{HistoryWalk, MostRecentParent, WalkStrategy};
use crate::boundary::BoundaryWarning;
use crate::domain::{TagIndex, Version};
use crate::error::{BffError, Result};
use crate::git::Repository;
use log::{debug, info};

/// The last release reachable from a branch tip
#[derive(Debug, Clone, PartialEq)]
pub enum ReleasePoint {
    /// A commit carrying a valid release tag
    Tagged { version: Version, hash: String },
    /// The repository has no release yet
    Unreleased,
}

impl ReleasePoint {
    pub fn version(&self) -> Option<&Version> {
        match self {
            ReleasePoint::Tagged { version, .. } => Some(version),
            ReleasePoint::Unreleased => None,
        }
    }

    pub fn hash(&self) -> Option<&str> {
        match self {
            ReleasePoint::Tagged { hash, .. } => Some(hash),
            ReleasePoint::Unreleased => None,
        }
    }

    /// Version to bump from; `0.0.0` before the first release
    pub fn baseline(&self) -> Version {
        self.version().cloned().unwrap_or_else(|| Version::new(0, 0, 0))
    }
}

/// Result of resolving the release point of a branch
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Hash of the branch tip
    pub tip: String,
    pub point: ReleasePoint,
    pub warnings: Vec<BoundaryWarning>,
}

/// Resolve the branch tip and check that it is what is checked out.
///
/// # Returns
/// * `Ok(String)` - Hash of the branch tip
/// * `Err(ReferenceNotFound)` - If the branch does not resolve
/// * `Err(NotOnReleaseBranch)` - If HEAD is somewhere else
pub fn verify_release_branch<R: Repository + ?Sized>(repo: &R, branch: &str) -> Result<String> {
    let tip = repo.resolve_reference(branch)?;
    let head = repo.head_commit()?;

    if head != tip {
        return Err(BffError::NotOnReleaseBranch {
            branch: branch.to_string(),
            head,
            tip,
        });
    }

    Ok(tip)
}

/// Find the latest release reachable from `branch` following the most recent parent
pub fn resolve_release_point<R: Repository + ?Sized>(
    repo: &R,
    branch: &str,
    tag_prefix: &str,
) -> Result<Resolution> {
    resolve_release_point_with(repo, branch, tag_prefix, MostRecentParent)
}

/// Same as [resolve_release_point] with an explicit walk strategy
pub fn resolve_release_point_with<R, S>(
    repo: &R,
    branch: &str,
    tag_prefix: &str,
    strategy: S,
) -> Result<Resolution>
where
    R: Repository + ?Sized,
    S: WalkStrategy,
{
    let tip = verify_release_branch(repo, branch)?;

    let (index, mut warnings) = TagIndex::build(repo.list_tags()?, tag_prefix);
    debug!("{} release tags indexed", index.len());

    let mut walk = HistoryWalk::new(repo, strategy, &tip);
    let mut point = ReleasePoint::Unreleased;

    for commit in walk.by_ref() {
        let commit = commit?;
        if let Some(version) = index.get(&commit.hash) {
            point = ReleasePoint::Tagged {
                version: version.clone(),
                hash: commit.hash,
            };
            break;
        }
    }

    match &point {
        ReleasePoint::Tagged { version, hash } => {
            info!("latest release on {} is {} at {}", branch, version, hash)
        }
        ReleasePoint::Unreleased => info!("no release found on {}", branch),
    }

    warnings.extend(walk.into_warnings());

    Ok(Resolution {
        tip,
        point,
        warnings,
    })
}
