//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the commit graph,
//! allowing for multiple implementations including real Git repositories
//! and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory commit graph for testing
//!
//! # Usage
//!
//! Release analysis depends on the [Repository] trait rather than concrete
//! implementations so it can run against hand-built histories in tests.
//!
//! ```rust
//! # use bff::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> bff::Result<()> {
//! let tip = repo.resolve_reference("origin/main")?;
//! let commit = repo.commit(&tip)?;
//! println!("{} {}", commit.short_hash(), commit.summary());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

pub use crate::domain::Commit;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Order in which [Repository::commits_from] yields commits
///
/// Configurable for changelog sections as `[changelog] order`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOrder {
    /// Newest commit time first
    #[default]
    Time,
    /// Parents are never shown before all of their children
    Topological,
}

/// Lazy, finite sequence of commits; each call starts a fresh walk
pub type CommitIter<'a> = Box<dyn Iterator<Item = Result<Commit>> + 'a>;

/// Commit graph operations needed by the release engine
///
/// ## Error Handling
///
/// Missing references map to [crate::error::BffError::ReferenceNotFound];
/// failures while loading commits map to
/// [crate::error::BffError::HistoryTraversal]. Nothing is retried.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation backed by an in-memory graph
pub trait Repository {
    /// Resolve a reference name to the hash of the commit it points at
    ///
    /// Accepts short names (`main`, `origin/main`), full names
    /// (`refs/heads/main`) and symbolic references (`origin/HEAD`).
    ///
    /// # Returns
    /// * `Ok(String)` - Full hash of the referenced commit
    /// * `Err(ReferenceNotFound)` - If the name does not resolve
    fn resolve_reference(&self, name: &str) -> Result<String>;

    /// Hash of the currently checked-out commit
    fn head_commit(&self) -> Result<String>;

    /// Load a single commit by hash
    fn commit(&self, hash: &str) -> Result<Commit>;

    /// All tags as `(short name, peeled commit hash)` pairs
    ///
    /// Tags that do not point at a commit are left out.
    fn list_tags(&self) -> Result<Vec<(String, String)>>;

    /// Iterate commits reachable from `hash` in the given order
    fn commits_from(&self, hash: &str, order: LogOrder) -> Result<CommitIter<'_>>;

    /// Root of the working tree, if the repository has one
    fn workdir(&self) -> Option<&Path>;

    /// Stage the given paths (relative to the working tree) and commit them on HEAD
    ///
    /// # Returns
    /// * `Ok(String)` - Hash of the new commit
    fn commit_files(&self, paths: &[&Path], message: &str) -> Result<String>;

    /// Check that [Repository::commit_files] has a committer identity to use
    ///
    /// Called before anything is written so a missing `user.name` or
    /// `user.email` cannot leave modified files without a release commit.
    fn check_committer(&self) -> Result<()>;

    /// Create a lightweight tag pointing at a commit
    fn create_tag(&self, name: &str, hash: &str) -> Result<()>;
}
