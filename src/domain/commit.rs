/// A commit as seen by the release engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full hex object id
    pub hash: String,
    pub message: String,
    /// Parent hashes in the order the commit lists them
    pub parents: Vec<String>,
    /// Author timestamp, seconds since the epoch
    pub author_time: i64,
}

impl Commit {
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        parents: Vec<String>,
        author_time: i64,
    ) -> Self {
        Commit {
            hash: hash.into(),
            message: message.into(),
            parents,
            author_time,
        }
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Abbreviated hash used in changelog entries
    pub fn short_hash(&self) -> &str {
        self.hash.get(..8).unwrap_or(&self.hash)
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}
