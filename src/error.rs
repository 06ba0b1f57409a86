use thiserror::Error;

/// Unified error type for bff operations
#[derive(Error, Debug)]
pub enum BffError {
    #[error("Reference not found: '{name}'")]
    ReferenceNotFound { name: String },

    #[error(
        "Not on release branch '{branch}': HEAD is at {head} but the branch tip is {tip}. \
         Please only release versions from {branch}; SHAs on other branches can go away \
         if a branch is rebased or squashed."
    )]
    NotOnReleaseBranch {
        branch: String,
        head: String,
        tip: String,
    },

    #[error("Version file {path} contains '{found}' but the latest release is '{expected}'")]
    VersionFileMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("Malformed tag '{tag}': {reason}")]
    MalformedTag { tag: String, reason: String },

    #[error("History traversal failed at commit {hash}: {source}")]
    HistoryTraversal {
        hash: String,
        #[source]
        source: git2::Error,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in bff
pub type Result<T> = std::result::Result<T, BffError>;

impl BffError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BffError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BffError::Version(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        BffError::Repository(msg.into())
    }

    pub fn reference_not_found(name: impl Into<String>) -> Self {
        BffError::ReferenceNotFound { name: name.into() }
    }

    pub fn malformed_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        BffError::MalformedTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    pub fn history_traversal(hash: impl Into<String>, source: git2::Error) -> Self {
        BffError::HistoryTraversal {
            hash: hash.into(),
            source,
        }
    }
}
