//! Release workflow orchestration
//!
//! Ties resolution, classification, version arithmetic and changelog
//! composition together for the `bump` and `changelog` commands. Prompts are
//! injected so the workflows can run without a terminal.

use chrono::NaiveDate;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::analyzer::{classify_history, resolve_release_point, ReleasePoint};
use crate::boundary::BoundaryWarning;
use crate::changelog::{self, ReleaseSection};
use crate::config::Config;
use crate::domain::{ReleaseSignal, ReleaseType, Version};
use crate::error::{BffError, Result};
use crate::git::Repository;
use crate::ui;
use crate::version_file;

/// Arguments for the bump workflow
///
/// Mirrors the CLI arguments without depending on clap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BumpArgs {
    /// Release branch, overriding `default_branch` from the config
    pub branch: Option<String>,

    /// Skip confirmation prompts
    pub force: bool,

    /// Show the proposal and stop before writing anything
    pub dry_run: bool,
}

/// How a bump workflow ended
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowStatus {
    /// Files written and tag created
    Released {
        /// Commit the tag points at
        tagged_commit: String,
    },
    /// Stopped after showing the proposal
    DryRun,
    /// The operator declined
    Declined,
}

/// Result of a bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub branch: String,
    pub previous: Option<Version>,
    pub next: Version,
    pub release_type: ReleaseType,
    pub signal: ReleaseSignal,
    pub tag: String,
    pub warnings: Vec<BoundaryWarning>,
    pub status: WorkflowStatus,
}

fn working_tree<R: Repository + ?Sized>(repo: &R) -> Result<&Path> {
    repo.workdir()
        .ok_or_else(|| BffError::repository("Repository has no working tree"))
}

fn release_branch<'a>(config: &'a Config, branch: Option<&'a str>) -> &'a str {
    branch.unwrap_or(&config.default_branch)
}

/// Collect warnings, dropping ones already reported by an earlier walk
fn merge_warnings(into: &mut Vec<BoundaryWarning>, more: Vec<BoundaryWarning>) {
    for warning in more {
        if !into.contains(&warning) {
            into.push(warning);
        }
    }
}

/// Fail before any write when the release tag is already taken
fn ensure_tag_available<R: Repository + ?Sized>(repo: &R, tag: &str) -> Result<()> {
    if repo.list_tags()?.iter().any(|(name, _)| name == tag) {
        return Err(BffError::repository(format!("Tag '{}' already exists", tag)));
    }
    Ok(())
}

/// Main bump workflow
///
/// 1. Resolve the release point on the release branch
/// 2. Check the version file against it
/// 3. Classify the commits since and compute the next version
/// 4. Check the tag is free and a committer identity is configured
/// 5. Confirm with the operator
/// 6. Write the version file and changelog, commit them, and tag
///
/// Nothing is written unless every step before 6 succeeded.
///
/// # Arguments
///
/// * `repo` - Commit graph accessor
/// * `config` - Loaded configuration
/// * `args` - Workflow arguments (branch, force, dry_run)
/// * `today` - Date stamped on the changelog section
/// * `confirm` - Yes/no prompt, called with the question text
pub fn run_bump<R, C>(
    repo: &R,
    config: &Config,
    args: &BumpArgs,
    today: NaiveDate,
    mut confirm: C,
) -> Result<WorkflowResult>
where
    R: Repository + ?Sized,
    C: FnMut(&str) -> Result<bool>,
{
    let branch = release_branch(config, args.branch.as_deref()).to_string();
    let workdir = working_tree(repo)?.to_path_buf();
    let interactive = !args.force && !args.dry_run;

    let resolution = resolve_release_point(repo, &branch, &config.tag_prefix)?;
    let point = resolution.point;
    let mut warnings = resolution.warnings;

    let version_path = workdir.join(&config.files.version);
    version_file::ensure_matches(&version_path, point.version())?;

    let classification = classify_history(repo, &resolution.tip, &point, &config.markers)?;
    merge_warnings(&mut warnings, classification.warnings);

    let previous = point.version().cloned();
    let baseline = point.baseline();
    let signal = classification.signal;
    let release_type = ReleaseType::for_signal(baseline.major, signal);
    let next = baseline.next(signal)?;
    let tag = config.tag_name(&next);
    info!("{} -> {} ({})", baseline, next, release_type);

    let mut result = WorkflowResult {
        branch: branch.clone(),
        previous,
        next: next.clone(),
        release_type,
        signal,
        tag: tag.clone(),
        warnings: Vec::new(),
        status: WorkflowStatus::Declined,
    };

    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }

    if classification.commits_scanned == 0 {
        let warning = BoundaryWarning::NoNewCommits {
            latest_version: baseline.to_string(),
            current_commit_hash: resolution.tip.clone(),
        };
        ui::display_boundary_warning(&warning);
        warnings.push(warning);

        if interactive && !confirm("Continue with no new commits?")? {
            result.warnings = warnings;
            return Ok(result);
        }
    }
    result.warnings = warnings;

    let commits = changelog::collect_release_commits(
        repo,
        &resolution.tip,
        &point,
        config.changelog.order,
    )?;
    ui::display_commit_analysis(&commits, &branch);
    ui::display_release_plan(&point, signal, release_type, &next, &tag);

    let changelog_path = workdir.join(&config.files.changelog);
    let pending_changelog = if config.behavior.update_changelog {
        let section =
            ReleaseSection::from_commits(next.to_string(), today, &commits, &config.changelog);
        ui::display_changelog_preview(&section.to_markdown());
        Some(changelog::prepare_update(&changelog_path, &section)?)
    } else {
        None
    };

    if args.dry_run {
        ui::display_status(&format!("Dry run: would write {} and tag {}", next, tag));
        result.status = WorkflowStatus::DryRun;
        return Ok(result);
    }

    ensure_tag_available(repo, &tag)?;
    if config.behavior.commit_release {
        repo.check_committer()?;
    }

    if interactive && !confirm(&format!("Release {} as {}?", next, tag))? {
        return Ok(result);
    }

    version_file::write_version_file(&version_path, &next)?;
    let mut changed: Vec<PathBuf> = vec![PathBuf::from(&config.files.version)];

    if let Some(content) = pending_changelog {
        std::fs::write(&changelog_path, content)?;
        changed.push(PathBuf::from(&config.files.changelog));
    }
    debug!("wrote {:?}", changed);

    let tagged_commit = if config.behavior.commit_release {
        let paths: Vec<&Path> = changed.iter().map(PathBuf::as_path).collect();
        let hash = repo.commit_files(&paths, &format!("release version {}", next))?;
        ui::display_success(&format!("Committed release version {}", next));
        hash
    } else {
        resolution.tip.clone()
    };

    repo.create_tag(&tag, &tagged_commit)?;
    ui::display_success(&format!("Created tag: {}", tag));
    info!("tagged {} at {}", tag, tagged_commit);

    result.status = WorkflowStatus::Released { tagged_commit };
    Ok(result)
}

/// Changelog workflow: insert a section for `version` covering the commits
/// since the last release on the branch.
///
/// # Returns
///
/// The section that was written
pub fn run_changelog<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    version: &Version,
    branch: Option<&str>,
    today: NaiveDate,
) -> Result<ReleaseSection> {
    let branch = release_branch(config, branch);
    let workdir = working_tree(repo)?;

    let resolution = resolve_release_point(repo, branch, &config.tag_prefix)?;
    for warning in &resolution.warnings {
        ui::display_boundary_warning(warning);
    }

    let commits = changelog::collect_release_commits(
        repo,
        &resolution.tip,
        &resolution.point,
        config.changelog.order,
    )?;
    if let ReleasePoint::Tagged { version: last, .. } = &resolution.point {
        debug!("{} commits since {}", commits.len(), last);
    }

    let section =
        ReleaseSection::from_commits(version.to_string(), today, &commits, &config.changelog);
    let path = workdir.join(&config.files.changelog);
    changelog::update_changelog_file(&path, &section)?;

    ui::display_success(&format!(
        "Added {} entries for {} to {}",
        section.entries.len(),
        version,
        path.display()
    ));
    Ok(section)
}
