use crate::domain::Commit;
use crate::error::{BffError, Result};
use crate::git::{CommitIter, LogOrder};
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};
use log::debug;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    fn parse_oid(hash: &str) -> Result<Oid> {
        Oid::from_str(hash).map_err(|e| BffError::history_traversal(hash, e))
    }

    fn load_commit(&self, oid: Oid) -> Result<Commit> {
        let commit = self
            .repo
            .find_commit(oid)
            .map_err(|e| BffError::history_traversal(oid.to_string(), e))?;
        let author_time = commit.author().when().seconds();

        Ok(Commit {
            hash: oid.to_string(),
            message: commit.message().unwrap_or("").to_string(),
            parents: commit.parent_ids().map(|id| id.to_string()).collect(),
            author_time,
        })
    }
}

impl From<LogOrder> for Sort {
    fn from(order: LogOrder) -> Self {
        match order {
            LogOrder::Time => Sort::TIME,
            LogOrder::Topological => Sort::TOPOLOGICAL | Sort::TIME,
        }
    }
}

impl super::Repository for Git2Repository {
    fn resolve_reference(&self, name: &str) -> Result<String> {
        let reference = match self.repo.resolve_reference_from_short_name(name) {
            Ok(reference) => reference,
            Err(e) if e.code() == ErrorCode::NotFound || e.code() == ErrorCode::InvalidSpec => {
                return Err(BffError::reference_not_found(name));
            }
            Err(e) => return Err(e.into()),
        };

        let commit = reference
            .resolve()
            .and_then(|r| r.peel_to_commit())
            .map_err(|e| {
                debug!("reference {} does not peel to a commit: {}", name, e);
                BffError::reference_not_found(name)
            })?;

        Ok(commit.id().to_string())
    }

    fn head_commit(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .map_err(|_| BffError::reference_not_found("HEAD"))?;
        let commit = head.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn commit(&self, hash: &str) -> Result<Commit> {
        self.load_commit(Self::parse_oid(hash)?)
    }

    fn list_tags(&self) -> Result<Vec<(String, String)>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            // Annotated tags peel through the tag object to the commit.
            match reference.peel_to_commit() {
                Ok(commit) => tags.push((name.to_string(), commit.id().to_string())),
                Err(e) => debug!("tag {} does not point at a commit: {}", name, e),
            }
        }

        Ok(tags)
    }

    fn commits_from(&self, hash: &str, order: LogOrder) -> Result<CommitIter<'_>> {
        let start = Self::parse_oid(hash)?;
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(order.into())?;
        revwalk
            .push(start)
            .map_err(|e| BffError::history_traversal(hash, e))?;

        Ok(Box::new(revwalk.map(move |next| {
            let oid = next.map_err(|e| BffError::history_traversal(start.to_string(), e))?;
            self.load_commit(oid)
        })))
    }

    fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn commit_files(&self, paths: &[&Path], message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(path)?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(oid.to_string())
    }

    fn check_committer(&self) -> Result<()> {
        self.repo.signature().map(|_| ()).map_err(|e| {
            BffError::repository(format!(
                "No usable committer identity (set user.name and user.email): {}",
                e.message()
            ))
        })
    }

    fn create_tag(&self, name: &str, hash: &str) -> Result<()> {
        let object = self.repo.find_object(Self::parse_oid(hash)?, None)?;

        self.repo
            .tag_lightweight(name, &object, false)
            .map_err(|e| BffError::repository(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }
}
