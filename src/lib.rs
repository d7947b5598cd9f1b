//! tagsmith - A CLI tool that tags the latest commit and publishes GitHub releases.
//!
//! # Overview
//!
//! tagsmith inspects a repository's commit history through the GitHub API,
//! tags the newest untagged commit with the next dotted version name, and
//! publishes a release whose body summarizes the diff since the previously
//! released tag.

pub mod error;
pub mod github;
pub mod reconcile;
pub mod service;

// Re-export commonly used types
pub use error::{ReconcileError, ServiceError};
pub use reconcile::{ReleaseOutcome, ReleaseReconciler, TagOutcome};
pub use service::{Commit, Comparison, FileDelta, Reference, Release, RepositoryService, Tag, TagObject};
