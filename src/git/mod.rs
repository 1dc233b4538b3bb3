//! The git collaborator: runs `git` and hands back raw listing lines.

mod git_source;

pub use git_source::{GitError, GitSource};
