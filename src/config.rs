use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BffError, Result};
use crate::git::LogOrder;

/// Represents the complete configuration for bff.
///
/// Contains the release branch, tag naming, commit message markers, file locations and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_branch")]
    pub default_branch: String,

    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default)]
    pub markers: MarkersConfig,

    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_branch() -> String {
    "origin/HEAD".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_breaking_marker() -> String {
    "[breaking]".to_string()
}

fn default_feature_marker() -> String {
    "[feature]".to_string()
}

fn default_version_file() -> String {
    "VERSION".to_string()
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_commit_link() -> String {
    "../../commit".to_string()
}

fn default_pull_link() -> String {
    "../../pull".to_string()
}

fn default_true() -> bool {
    true
}

/// Literal substrings searched for in the first line of each commit message.
///
/// Matching is case-sensitive.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MarkersConfig {
    #[serde(default = "default_breaking_marker")]
    pub breaking: String,

    #[serde(default = "default_feature_marker")]
    pub feature: String,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        MarkersConfig {
            breaking: default_breaking_marker(),
            feature: default_feature_marker(),
        }
    }
}

/// Paths of the version marker file and the changelog, relative to the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_version_file")]
    pub version: String,

    #[serde(default = "default_changelog_file")]
    pub changelog: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            version: default_version_file(),
            changelog: default_changelog_file(),
        }
    }
}

/// Link bases and commit order used when rendering changelog sections.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_commit_link")]
    pub commit_link: String,

    #[serde(default = "default_pull_link")]
    pub pull_link: String,

    /// `"time"` (newest first) or `"topological"` (children before parents)
    #[serde(default)]
    pub order: LogOrder,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            commit_link: default_commit_link(),
            pull_link: default_pull_link(),
            order: LogOrder::default(),
        }
    }
}

/// Controls what `bump` writes once a release is confirmed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default = "default_true")]
    pub update_changelog: bool,

    #[serde(default = "default_true")]
    pub commit_release: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            update_changelog: true,
            commit_release: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_branch: default_branch(),
            tag_prefix: default_tag_prefix(),
            markers: MarkersConfig::default(),
            files: FilesConfig::default(),
            changelog: ChangelogConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Config {
    /// Formats the tag name for a released version, e.g. `v1.2.3`.
    pub fn tag_name(&self, version: &impl std::fmt::Display) -> String {
        format!("{}{}", self.tag_prefix, version)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `bff.toml` in current directory
/// 3. `.bff.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| BffError::config(format!("Cannot read {}: {}", path, e)))?
    } else if Path::new("./bff.toml").exists() {
        fs::read_to_string("./bff.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".bff.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses configuration from TOML text; missing keys take their defaults.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| BffError::config(e.to_string()))
}
