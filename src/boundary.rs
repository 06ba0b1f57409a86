use std::fmt;

/// Warnings that occur while walking history towards the last release.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No new commits since the latest release
    NoNewCommits {
        latest_version: String,
        current_commit_hash: String,
    },
    /// Tag exists but cannot be parsed as a semantic version
    MalformedTag { tag: String, reason: String },
    /// Tag parses but carries pre-release or build metadata
    PrereleaseTag { tag: String },
    /// A merge commit was crossed by following its most recent parent
    MergeCommit {
        commit_hash: String,
        parent_count: usize,
        chosen_parent: String,
    },
}

fn short(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                latest_version,
                current_commit_hash,
            } => write!(
                f,
                "No new commits since release '{}' (current: {})",
                latest_version,
                short(current_commit_hash)
            ),
            BoundaryWarning::MalformedTag { tag, reason } => {
                write!(f, "Skipping tag '{}': {}", tag, reason)
            }
            BoundaryWarning::PrereleaseTag { tag } => {
                write!(f, "Skipping pre-release or build tag '{}'", tag)
            }
            BoundaryWarning::MergeCommit {
                commit_hash,
                parent_count,
                chosen_parent,
            } => write!(
                f,
                "Commit {} has {} parents; following most recent parent {}",
                short(commit_hash),
                parent_count,
                short(chosen_parent)
            ),
        }
    }
}
