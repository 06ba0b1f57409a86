//! Command workflows behind the `bff` binary.

pub mod orchestration;

pub use orchestration::{run_bump, run_changelog, BumpArgs, WorkflowResult, WorkflowStatus};
