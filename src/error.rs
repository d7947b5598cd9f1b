//! Error types for tagsmith modules using thiserror.

use thiserror::Error;

/// Errors from the remote repository service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(
        "GitHub authentication failed: the token was rejected. Check that it is valid and has not expired"
    )]
    AuthenticationFailed,

    #[error("Repository not found: {owner}/{repo}")]
    RepositoryNotFound { owner: String, repo: String },

    #[error("Rate limited by GitHub API. Resets at: {reset_time}")]
    RateLimited { reset_time: String },

    #[error("GitHub API request failed: {0}")]
    Api(#[source] Box<octocrab::Error>),
}

/// Errors from the tag/release reconciliation logic.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error(
        "Tag name '{name}' does not match the v.<major>.<minor>.<patch>[.<build>] scheme. \
         Rename or delete the offending tag, or create one well-formed tag manually and re-run"
    )]
    MalformedTagName { name: String },

    #[error(
        "Tag object for '{tag_name}' was created but its reference was not: {source}. \
         The remote now holds an unreferenced tag object; create refs/tags/{tag_name} manually or delete the orphan before re-running"
    )]
    PartialTagCreation {
        tag_name: String,
        #[source]
        source: ServiceError,
    },

    #[error(transparent)]
    Service(#[from] ServiceError),
}
