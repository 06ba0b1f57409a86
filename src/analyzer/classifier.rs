use crate::analyzer::release_point::ReleasePoint;
use crate::analyzer::walk::{HistoryWalk, MostRecentParent, WalkStrategy};
use crate::boundary::BoundaryWarning;
use crate::config::MarkersConfig;
use crate::domain::ReleaseSignal;
use crate::error::Result;
use crate::git::Repository;
use log::debug;

/// Signal gathered from the commits since the last release
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub signal: ReleaseSignal,
    /// Number of commits scanned, tip included, release commit excluded
    pub commits_scanned: usize,
    pub warnings: Vec<BoundaryWarning>,
}

/// Scan commits from `tip` down to the release point following the most recent parent
///
/// With [ReleasePoint::Unreleased] the scan runs to the root of history.
pub fn classify_history<R: Repository + ?Sized>(
    repo: &R,
    tip: &str,
    point: &ReleasePoint,
    markers: &MarkersConfig,
) -> Result<Classification> {
    classify_history_with(repo, tip, point, markers, MostRecentParent)
}

/// Same as [classify_history] with an explicit walk strategy
pub fn classify_history_with<R, S>(
    repo: &R,
    tip: &str,
    point: &ReleasePoint,
    markers: &MarkersConfig,
    strategy: S,
) -> Result<Classification>
where
    R: Repository + ?Sized,
    S: WalkStrategy,
{
    let stop_at = point.hash();
    let mut walk = HistoryWalk::new(repo, strategy, tip);
    let mut signal = ReleaseSignal::default();
    let mut commits_scanned = 0;

    for commit in walk.by_ref() {
        let commit = commit?;
        if Some(commit.hash.as_str()) == stop_at {
            break;
        }

        let found = ReleaseSignal::scan(&commit.message, markers);
        if found != ReleaseSignal::default() {
            debug!("{} {:?}: {}", commit.short_hash(), found, commit.summary());
        }
        signal.absorb(found);
        commits_scanned += 1;
    }

    Ok(Classification {
        signal,
        commits_scanned,
        warnings: walk.into_warnings(),
    })
}
