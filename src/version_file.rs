//! The version marker file kept at the repository root.

use crate::domain::Version;
use crate::error::{BffError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read the file contents, trimmed. A missing file reads as `None`.
pub fn read_version_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content.trim().to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Check the file agrees with the latest release.
///
/// With no release yet the file must be missing or empty.
///
/// # Returns
/// * `Ok(())` - If the file matches
/// * `Err(VersionFileMismatch)` - If it holds anything else
pub fn ensure_matches(path: &Path, expected: Option<&Version>) -> Result<()> {
    let found = read_version_file(path)?.unwrap_or_default();

    let matches = match expected {
        Some(version) => found == version.to_string(),
        None => found.is_empty(),
    };

    if matches {
        return Ok(());
    }

    Err(BffError::VersionFileMismatch {
        path: path.display().to_string(),
        expected: expected
            .map(|v| v.to_string())
            .unwrap_or_else(|| "<none>".to_string()),
        found,
    })
}

/// Overwrite the file with the given version and a trailing newline
pub fn write_version_file(path: &Path, version: &Version) -> Result<()> {
    fs::write(path, format!("{}\n", version))?;
    Ok(())
}
