//! Positional insertion of release sections into a changelog document.
//!
//! The document is only ever treated as a list of lines. Sections are
//! inserted at a fixed offset below the title; an existing section for the
//! same version is not detected.

use crate::changelog::ReleaseSection;
use crate::error::Result;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// New sections go before this line: after the title and one blank line.
pub const RELEASE_INSERT_LINE: usize = 2;

/// Insert `block` before line `index`, appending when the document is shorter.
pub fn insert_block(lines: &[String], block: &[String], index: usize) -> Vec<String> {
    let index = index.min(lines.len());

    let mut result = Vec::with_capacity(lines.len() + block.len());
    result.extend_from_slice(&lines[..index]);
    result.extend_from_slice(block);
    result.extend_from_slice(&lines[index..]);
    result
}

/// Line terminator of an existing document: `\r\n` if its first line uses it.
pub fn detect_line_ending(content: &str) -> &'static str {
    match content.find('\n') {
        Some(end) if content[..end].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Join lines back into file content, each terminated by `line_ending`.
pub fn render_document(lines: &[String], line_ending: &str) -> String {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push_str(line_ending);
    }
    content
}

/// Read a changelog as lines plus its line ending; a missing file is an
/// empty `\n` document.
pub fn read_lines(path: &Path) -> Result<(Vec<String>, &'static str)> {
    match fs::read_to_string(path) {
        Ok(content) => Ok((
            content.lines().map(str::to_string).collect(),
            detect_line_ending(&content),
        )),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet", path.display());
            Ok((Vec::new(), "\n"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Compute the new changelog content without writing it
pub fn prepare_update(path: &Path, section: &ReleaseSection) -> Result<String> {
    let (existing, line_ending) = read_lines(path)?;
    let updated = insert_block(&existing, &section.lines(), RELEASE_INSERT_LINE);
    Ok(render_document(&updated, line_ending))
}

/// Insert a release section into the changelog file, creating it if needed
pub fn update_changelog_file(path: &Path, section: &ReleaseSection) -> Result<()> {
    let content = prepare_update(path, section)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_insert_at_fixed_offset() {
        let original = lines(&["# Changelog", "", "## 0.1.0 2019-01-01", "", "* old"]);
        let block = lines(&["## 0.2.0 2019-02-01", "", "* new", ""]);

        let result = insert_block(&original, &block, RELEASE_INSERT_LINE);

        assert_eq!(result.len(), original.len() + block.len());
        assert_eq!(&result[..2], &original[..2]);
        assert_eq!(&result[2..6], &block[..]);
        assert_eq!(&result[6..], &original[2..]);
    }

    #[test]
    fn test_insert_into_empty_document_is_just_the_block() {
        let block = lines(&["## 1.0.0 2020-01-01", "", "* entry", ""]);
        let result = insert_block(&[], &block, RELEASE_INSERT_LINE);
        assert_eq!(result, block);
    }

    #[test]
    fn test_insert_into_title_only_document_appends() {
        let original = lines(&["# Changelog"]);
        let block = lines(&["## 1.0.0 2020-01-01", ""]);
        let result = insert_block(&original, &block, RELEASE_INSERT_LINE);
        assert_eq!(result, lines(&["# Changelog", "## 1.0.0 2020-01-01", ""]));
    }

    #[test]
    fn test_insert_at_fixed_offset_does_not_dedupe() {
        let original = lines(&["# Changelog", "", "## 1.0.0 2020-01-01", ""]);
        let block = lines(&["## 1.0.0 2020-01-01", ""]);
        let result = insert_block(&original, &block, RELEASE_INSERT_LINE);
        assert_eq!(
            result
                .iter()
                .filter(|l| l.as_str() == "## 1.0.0 2020-01-01")
                .count(),
            2
        );
    }

    #[test]
    fn test_render_document_terminates_lines() {
        assert_eq!(render_document(&lines(&["a", "", "b"]), "\n"), "a\n\nb\n");
        assert_eq!(render_document(&[], "\n"), "");
    }

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(detect_line_ending("# Changelog\r\n\r\n"), "\r\n");
        assert_eq!(detect_line_ending("# Changelog\n\n"), "\n");
        assert_eq!(detect_line_ending("# Changelog"), "\n");
        assert_eq!(detect_line_ending(""), "\n");
    }

    #[test]
    fn test_update_keeps_crlf_line_endings() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        fs::write(&path, "# Changelog\r\n\r\n## 1.0.0 2020-01-01\r\n").unwrap();

        let section = ReleaseSection {
            version: "1.1.0".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
            entries: vec!["* entry".to_string()],
        };
        update_changelog_file(&path, &section).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Changelog\r\n\r\n## 1.1.0 2020-02-01\r\n\r\n* entry\r\n\r\n## 1.0.0 2020-01-01\r\n"
        );
    }

    #[test]
    fn test_missing_file_is_empty_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let (lines, line_ending) = read_lines(&dir.path().join("CHANGELOG.md")).unwrap();
        assert!(lines.is_empty());
        assert_eq!(line_ending, "\n");
    }
}
