//! Single-path history walks.
//!
//! A walk visits one commit per step, starting at a tip. Which parent comes
//! next is decided by a [WalkStrategy], so a merge-base aware strategy can
//! replace [MostRecentParent] without touching the resolver or classifier.

use crate::boundary::BoundaryWarning;
use crate::domain::Commit;
use crate::error::Result;
use crate::git::Repository;
use log::warn;

/// Outcome of one step of a walk
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    /// The next commit, or `None` at the root of history
    pub next: Option<Commit>,
    pub warning: Option<BoundaryWarning>,
}

/// Chooses the next node of a walk
pub trait WalkStrategy {
    fn advance<R: Repository + ?Sized>(&self, repo: &R, current: &Commit) -> Result<Advance>;
}

/// Follows the parent with the latest author timestamp.
///
/// The first listed parent wins ties. Crossing a merge is not an error, but
/// it is reported because the heuristic is not a merge-base computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostRecentParent;

impl WalkStrategy for MostRecentParent {
    fn advance<R: Repository + ?Sized>(&self, repo: &R, current: &Commit) -> Result<Advance> {
        let mut chosen: Option<Commit> = None;

        for parent_hash in &current.parents {
            let parent = repo.commit(parent_hash)?;
            let newer = chosen
                .as_ref()
                .map_or(true, |best| parent.author_time > best.author_time);
            if newer {
                chosen = Some(parent);
            }
        }

        let warning = match (&chosen, current.is_merge()) {
            (Some(parent), true) => {
                warn!(
                    "commit {} has {} parents, following {}",
                    current.hash,
                    current.parents.len(),
                    parent.hash
                );
                Some(BoundaryWarning::MergeCommit {
                    commit_hash: current.hash.clone(),
                    parent_count: current.parents.len(),
                    chosen_parent: parent.hash.clone(),
                })
            }
            _ => None,
        };

        Ok(Advance {
            next: chosen,
            warning,
        })
    }
}

enum WalkState {
    Start(String),
    Visited(Commit),
    Done,
}

/// Lazy iterator over a single-path walk, tip first.
///
/// Commits are loaded only when requested, so stopping early never touches
/// the parents of the last yielded commit. The walk ends after the first
/// error.
pub struct HistoryWalk<'r, R: ?Sized, S> {
    repo: &'r R,
    strategy: S,
    state: WalkState,
    warnings: Vec<BoundaryWarning>,
}

impl<'r, R: Repository + ?Sized> HistoryWalk<'r, R, MostRecentParent> {
    /// Walk from `tip` following the most recent parent
    pub fn most_recent_parent(repo: &'r R, tip: &str) -> Self {
        HistoryWalk::new(repo, MostRecentParent, tip)
    }
}

impl<'r, R: Repository + ?Sized, S: WalkStrategy> HistoryWalk<'r, R, S> {
    pub fn new(repo: &'r R, strategy: S, tip: &str) -> Self {
        HistoryWalk {
            repo,
            strategy,
            state: WalkState::Start(tip.to_string()),
            warnings: Vec::new(),
        }
    }

    pub fn into_warnings(self) -> Vec<BoundaryWarning> {
        self.warnings
    }
}

impl<R: Repository + ?Sized, S: WalkStrategy> Iterator for HistoryWalk<'_, R, S> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let loaded = match std::mem::replace(&mut self.state, WalkState::Done) {
            WalkState::Start(hash) => self.repo.commit(&hash).map(Some),
            WalkState::Visited(previous) => {
                self.strategy.advance(self.repo, &previous).map(|advance| {
                    self.warnings.extend(advance.warning);
                    advance.next
                })
            }
            WalkState::Done => return None,
        };

        match loaded {
            Ok(Some(commit)) => {
                self.state = WalkState::Visited(commit.clone());
                Some(Ok(commit))
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BffError;
    use crate::git::MockRepository;

    fn hashes<R: Repository + ?Sized, S: WalkStrategy>(walk: HistoryWalk<'_, R, S>) -> Vec<String> {
        walk.map(|c| c.unwrap().hash).collect()
    }

    #[test]
    fn test_linear_walk_reaches_root() {
        let mut repo = MockRepository::new();
        repo.add_commit("a", "root", &[], 1);
        repo.add_commit("b", "two", &["a"], 2);
        repo.add_commit("c", "three", &["b"], 3);

        let walk = HistoryWalk::most_recent_parent(&repo, "c");
        assert_eq!(hashes(walk), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_merge_follows_most_recent_parent() {
        let mut repo = MockRepository::new();
        repo.add_commit("root", "root", &[], 1);
        repo.add_commit("old", "old side", &["root"], 10);
        repo.add_commit("new", "new side", &["root"], 20);
        repo.add_commit("merge", "merge", &["old", "new"], 30);

        let mut walk = HistoryWalk::most_recent_parent(&repo, "merge");
        let visited: Vec<String> = walk.by_ref().map(|c| c.unwrap().hash).collect();

        assert_eq!(visited, vec!["merge", "new", "root"]);
        assert_eq!(
            walk.into_warnings(),
            vec![BoundaryWarning::MergeCommit {
                commit_hash: "merge".to_string(),
                parent_count: 2,
                chosen_parent: "new".to_string(),
            }]
        );
    }

    #[test]
    fn test_merge_tie_prefers_first_parent() {
        let mut repo = MockRepository::new();
        repo.add_commit("root", "root", &[], 1);
        repo.add_commit("left", "left", &["root"], 10);
        repo.add_commit("right", "right", &["root"], 10);
        repo.add_commit("merge", "merge", &["left", "right"], 30);

        let walk = HistoryWalk::most_recent_parent(&repo, "merge");
        assert_eq!(hashes(walk), vec!["merge", "left", "root"]);
    }

    #[test]
    fn test_missing_parent_ends_walk_with_error() {
        let mut repo = MockRepository::new();
        repo.add_commit("b", "orphaned", &["gone"], 2);

        let mut walk = HistoryWalk::most_recent_parent(&repo, "b");
        assert_eq!(walk.next().unwrap().unwrap().hash, "b");
        assert!(matches!(
            walk.next(),
            Some(Err(BffError::HistoryTraversal { .. }))
        ));
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_walk_is_restartable() {
        let mut repo = MockRepository::new();
        repo.add_commit("a", "root", &[], 1);
        repo.add_commit("b", "two", &["a"], 2);

        let first = hashes(HistoryWalk::most_recent_parent(&repo, "b"));
        let second = hashes(HistoryWalk::most_recent_parent(&repo, "b"));
        assert_eq!(first, second);
    }
}
