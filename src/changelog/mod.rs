//! Changelog composition: rendering commits and inserting release sections.

pub mod document;
pub mod render;

pub use document::{
    detect_line_ending, insert_block, prepare_update, read_lines, render_document,
    update_changelog_file, RELEASE_INSERT_LINE,
};
pub use render::{render_commit, ReleaseSection};

use crate::analyzer::ReleasePoint;
use crate::domain::Commit;
use crate::error::Result;
use crate::git::{LogOrder, Repository};

/// Commits from `tip` down to, but excluding, the release commit
///
/// Uses the repository's ordered log rather than the single-parent walk, so
/// commits from merged branches are listed too.
pub fn collect_release_commits<R: Repository + ?Sized>(
    repo: &R,
    tip: &str,
    point: &ReleasePoint,
    order: LogOrder,
) -> Result<Vec<Commit>> {
    let stop_at = point.hash();
    let mut commits = Vec::new();

    for commit in repo.commits_from(tip, order)? {
        let commit = commit?;
        if Some(commit.hash.as_str()) == stop_at {
            break;
        }
        commits.push(commit);
    }

    Ok(commits)
}
