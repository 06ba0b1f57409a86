//! Pure formatting functions for UI output.
//!
//! Everything the operator reads goes through here; diagnostics go through `log`.

use console::style;

use crate::analyzer::ReleasePoint;
use crate::boundary::BoundaryWarning;
use crate::domain::{Commit, ReleaseSignal, ReleaseType, Version};

const MAX_LISTED_COMMITS: usize = 10;
const MAX_SUMMARY_CHARS: usize = 60;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Shorten a summary line to at most 60 characters.
pub fn truncate_summary(summary: &str) -> &str {
    match summary.char_indices().nth(MAX_SUMMARY_CHARS) {
        Some((end, _)) => &summary[..end],
        None => summary,
    }
}

/// Display the commits that go into the next release.
///
/// Lists up to 10 summaries; the rest are counted.
pub fn display_commit_analysis(commits: &[Commit], branch: &str) {
    println!(
        "\n{}",
        style(format!("Changes on '{}' since the last release", branch)).bold()
    );
    println!("{}", style(format!("{} commits:", commits.len())).underlined());

    for commit in commits.iter().take(MAX_LISTED_COMMITS) {
        println!(
            "  {} {}",
            style(commit.short_hash()).dim(),
            truncate_summary(commit.summary())
        );
    }

    if commits.len() > MAX_LISTED_COMMITS {
        println!("  ... and {} more commits", commits.len() - MAX_LISTED_COMMITS);
    }
}

/// Display the proposed release.
///
/// Shows either:
/// - If a release exists: "From: old -> To: new"
/// - Otherwise: "Initial release: new"
pub fn display_release_plan(
    point: &ReleasePoint,
    signal: ReleaseSignal,
    release_type: ReleaseType,
    next: &Version,
    tag: &str,
) {
    println!(
        "\n{} breaking: {}, feature: {}",
        style("Detected:").bold(),
        signal.breaking,
        signal.feature
    );

    match point.version() {
        Some(current) => {
            println!("{} ({})", style("Proposed Release:").bold(), release_type);
            println!("  From: {}", style(current).red());
            println!("  To:   {}", style(next).green());
        }
        None => {
            println!("{}", style("Initial Release:").bold());
            println!("  New version: {}", style(next).green());
        }
    }
    println!("  Tag:  {}", style(tag).cyan());
}

/// Display a rendered changelog section as it will be inserted.
pub fn display_changelog_preview(markdown: &str) {
    println!("\n{}", style("Changelog section:").bold());
    for line in markdown.lines() {
        println!("  {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_summary_keeps_short_lines() {
        assert_eq!(truncate_summary("fix typo"), "fix typo");
    }

    #[test]
    fn test_truncate_summary_cuts_on_char_boundary() {
        let long = "é".repeat(80);
        let cut = truncate_summary(&long);
        assert_eq!(cut.chars().count(), 60);
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_release_plan(
            &ReleasePoint::Unreleased,
            ReleaseSignal::default(),
            ReleaseType::Patch,
            &Version::new(0, 0, 1),
            "v0.0.1",
        );
    }
}
