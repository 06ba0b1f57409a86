//! Domain logic - pure release rules independent of git operations

pub mod commit;
pub mod signal;
pub mod tag;
pub mod version;

pub use commit::Commit;
pub use signal::ReleaseSignal;
pub use tag::{parse_release_tag, TagIndex};
pub use version::{next_version, ReleaseType, Version};
