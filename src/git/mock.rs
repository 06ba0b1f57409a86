use crate::domain::Commit;
use crate::error::{BffError, Result};
use crate::git::{CommitIter, LogOrder, Repository};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Mock repository for testing without actual git operations
///
/// Commits, tags and references live in memory; writes are recorded so
/// tests can assert on them.
pub struct MockRepository {
    commits: HashMap<String, Commit>,
    tags: Vec<(String, String)>,
    references: HashMap<String, String>,
    head: Option<String>,
    workdir: Option<PathBuf>,
    has_committer: bool,
    created_tags: RefCell<Vec<(String, String)>>,
    release_commits: RefCell<Vec<(Vec<PathBuf>, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            tags: Vec::new(),
            references: HashMap::new(),
            head: None,
            workdir: None,
            has_committer: true,
            created_tags: RefCell::new(Vec::new()),
            release_commits: RefCell::new(Vec::new()),
        }
    }

    /// Add a commit to the mock repository
    pub fn add_commit(&mut self, hash: &str, message: &str, parents: &[&str], author_time: i64) {
        let parents = parents.iter().map(|p| p.to_string()).collect();
        self.commits
            .insert(hash.to_string(), Commit::new(hash, message, parents, author_time));
    }

    /// Add a tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.tags.push((name.into(), hash.into()));
    }

    /// Point a named reference at a commit
    pub fn set_reference(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.references.insert(name.into(), hash.into());
    }

    /// Set the checked-out commit
    pub fn set_head(&mut self, hash: impl Into<String>) {
        self.head = Some(hash.into());
    }

    pub fn set_workdir(&mut self, path: impl Into<PathBuf>) {
        self.workdir = Some(path.into());
    }

    /// Behave like a repository with no `user.name`/`user.email` configured
    pub fn clear_committer(&mut self) {
        self.has_committer = false;
    }

    /// Tags created through [Repository::create_tag]
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.created_tags.borrow().clone()
    }

    /// Commits made through [Repository::commit_files]
    pub fn release_commits(&self) -> Vec<(Vec<PathBuf>, String)> {
        self.release_commits.borrow().clone()
    }

    fn reachable_from(&self, hash: &str) -> Result<Vec<Commit>> {
        let mut seen = HashSet::new();
        let mut stack = vec![hash.to_string()];
        let mut commits = Vec::new();

        while let Some(next) = stack.pop() {
            if !seen.insert(next.clone()) {
                continue;
            }
            let commit = self.commit(&next)?;
            stack.extend(commit.parents.iter().rev().cloned());
            commits.push(commit);
        }

        Ok(commits)
    }
}

/// Reorder newest-first commits so no parent precedes one of its children
fn topological(mut pending: Vec<Commit>) -> Vec<Commit> {
    let mut ordered = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let ready = pending
            .iter()
            .position(|candidate| {
                !pending
                    .iter()
                    .any(|other| other.parents.contains(&candidate.hash))
            })
            .unwrap_or(0);
        ordered.push(pending.remove(ready));
    }

    ordered
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn resolve_reference(&self, name: &str) -> Result<String> {
        self.references
            .get(name)
            .cloned()
            .ok_or_else(|| BffError::reference_not_found(name))
    }

    fn head_commit(&self) -> Result<String> {
        self.head
            .clone()
            .ok_or_else(|| BffError::reference_not_found("HEAD"))
    }

    fn commit(&self, hash: &str) -> Result<Commit> {
        self.commits.get(hash).cloned().ok_or_else(|| {
            BffError::history_traversal(hash, git2::Error::from_str("object not found"))
        })
    }

    fn list_tags(&self) -> Result<Vec<(String, String)>> {
        Ok(self.tags.clone())
    }

    fn commits_from(&self, hash: &str, order: LogOrder) -> Result<CommitIter<'_>> {
        let mut commits = self.reachable_from(hash)?;
        // Stable sort keeps discovery order between equal timestamps.
        commits.sort_by(|a, b| b.author_time.cmp(&a.author_time));
        if order == LogOrder::Topological {
            commits = topological(commits);
        }
        Ok(Box::new(commits.into_iter().map(Ok)))
    }

    fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    fn commit_files(&self, paths: &[&Path], message: &str) -> Result<String> {
        self.check_committer()?;
        let mut commits = self.release_commits.borrow_mut();
        commits.push((
            paths.iter().map(|p| p.to_path_buf()).collect(),
            message.to_string(),
        ));
        Ok(format!("release{}", commits.len()))
    }

    fn check_committer(&self) -> Result<()> {
        if self.has_committer {
            Ok(())
        } else {
            Err(BffError::repository(
                "No usable committer identity (set user.name and user.email)",
            ))
        }
    }

    fn create_tag(&self, name: &str, hash: &str) -> Result<()> {
        let mut tags = self.created_tags.borrow_mut();
        if tags.iter().any(|(existing, _)| existing == name) {
            return Err(BffError::repository(format!("Tag '{}' already exists", name)));
        }
        tags.push((name.to_string(), hash.to_string()));
        Ok(())
    }
}
