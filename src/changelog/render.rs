//! Rendering commits into changelog entries.

use crate::config::ChangelogConfig;
use crate::domain::Commit;
use chrono::NaiveDate;
use regex::Regex;

/// Split an auto-appended pull request reference off a summary line.
///
/// `"Add widget (#42)"` -> `Some(("Add widget", "42"))`. The token must end the line.
fn split_pull_request(summary: &str) -> Option<(&str, &str)> {
    let re = Regex::new(r"\(#(\d+)\)$").ok()?;
    let captures = re.captures(summary)?;
    let token = captures.get(0)?;
    let number = captures.get(1)?;

    Some((summary[..token.start()].trim_end(), number.as_str()))
}

fn link(base: &str, target: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), target)
}

/// Render one commit as a changelog list item.
///
/// ```text
/// * [2847a2e6](../../commit/2847a2e624ee6736b43cc3a68acd75368d1a75d1) A commit message
/// * [2847a2e6](../../commit/2847a2e624ee6736b43cc3a68acd75368d1a75d1) A commit message ([#100](../../pull/100))
/// ```
///
/// A commit with an empty hash renders as an empty string.
pub fn render_commit(commit: &Commit, links: &ChangelogConfig) -> String {
    if commit.hash.is_empty() {
        return String::new();
    }

    let prefix = format!(
        "* [{}]({})",
        commit.short_hash(),
        link(&links.commit_link, &commit.hash)
    );
    let summary = commit.summary();

    match split_pull_request(summary) {
        Some((message, number)) => {
            let pull = format!("([#{}]({}))", number, link(&links.pull_link, number));
            if message.is_empty() {
                format!("{} {}", prefix, pull)
            } else {
                format!("{} {} {}", prefix, message, pull)
            }
        }
        None => format!("{} {}", prefix, summary),
    }
}

/// A release section ready to be inserted into a changelog
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSection {
    pub version: String,
    pub date: NaiveDate,
    /// Rendered entries, newest first
    pub entries: Vec<String>,
}

impl ReleaseSection {
    /// Render commits (newest first) into a section; empty renders are dropped
    pub fn from_commits(
        version: impl Into<String>,
        date: NaiveDate,
        commits: &[Commit],
        links: &ChangelogConfig,
    ) -> Self {
        let entries = commits
            .iter()
            .map(|commit| render_commit(commit, links))
            .filter(|entry| !entry.is_empty())
            .collect();

        ReleaseSection {
            version: version.into(),
            date,
            entries,
        }
    }

    /// `## <version> <YYYY-MM-DD>`
    pub fn header(&self) -> String {
        format!("## {} {}", self.version, self.date.format("%Y-%m-%d"))
    }

    /// Header, blank line, entries, and a trailing blank separator
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() + 3);
        lines.push(self.header());
        lines.push(String::new());
        lines.extend(self.entries.iter().cloned());
        lines.push(String::new());
        lines
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        for line in self.lines() {
            output.push_str(&line);
            output.push('\n');
        }
        output
    }
}
