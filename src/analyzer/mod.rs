//! History analysis: locating the last release and classifying what changed since.

pub mod classifier;
pub mod release_point;
pub mod walk;

pub use classifier::{classify_history, classify_history_with, Classification};
pub use release_point::{
    resolve_release_point, resolve_release_point_with, verify_release_branch, ReleasePoint,
    Resolution,
};
pub use walk::{Advance, HistoryWalk, MostRecentParent, WalkStrategy};
