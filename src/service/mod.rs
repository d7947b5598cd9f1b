//! The capability boundary to the hosted repository.

pub mod types;

pub use types::{Commit, Comparison, FileDelta, Reference, Release, Tag, TagObject};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ServiceError;

/// Remote repository operations the reconciler depends on.
///
/// This abstraction allows substituting a fake or mock service in tests.
/// Every listing returns a plain ordered `Vec`, so callers never branch on
/// single-item versus paged result shapes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// List commits of the configured repository.
    async fn list_commits(&self) -> Result<Vec<Commit>, ServiceError>;

    /// List tags, each resolved to its target commit.
    async fn list_tags(&self) -> Result<Vec<Tag>, ServiceError>;

    /// List releases.
    async fn list_releases(&self) -> Result<Vec<Release>, ServiceError>;

    /// Create an annotated tag object pointing at a commit.
    async fn create_tag_object(
        &self,
        name: &str,
        message: &str,
        target_sha: &str,
    ) -> Result<TagObject, ServiceError>;

    /// Create a named reference pointing at an object hash.
    async fn create_reference(
        &self,
        ref_path: &str,
        target_sha: &str,
    ) -> Result<Reference, ServiceError>;

    /// Publish a release bound to an existing tag.
    async fn create_release(
        &self,
        tag_name: &str,
        release_name: &str,
        body: &str,
        draft: bool,
        prerelease: bool,
    ) -> Result<Release, ServiceError>;

    /// Compute the diff between two commits.
    async fn compare(&self, base_sha: &str, head_sha: &str) -> Result<Comparison, ServiceError>;
}

/// Forwarding impl so a shared `Arc<T>` can stand in for the service it wraps.
#[async_trait]
impl<T: RepositoryService + ?Sized> RepositoryService for Arc<T> {
    async fn list_commits(&self) -> Result<Vec<Commit>, ServiceError> {
        (**self).list_commits().await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ServiceError> {
        (**self).list_tags().await
    }

    async fn list_releases(&self) -> Result<Vec<Release>, ServiceError> {
        (**self).list_releases().await
    }

    async fn create_tag_object(
        &self,
        name: &str,
        message: &str,
        target_sha: &str,
    ) -> Result<TagObject, ServiceError> {
        (**self).create_tag_object(name, message, target_sha).await
    }

    async fn create_reference(
        &self,
        ref_path: &str,
        target_sha: &str,
    ) -> Result<Reference, ServiceError> {
        (**self).create_reference(ref_path, target_sha).await
    }

    async fn create_release(
        &self,
        tag_name: &str,
        release_name: &str,
        body: &str,
        draft: bool,
        prerelease: bool,
    ) -> Result<Release, ServiceError> {
        (**self)
            .create_release(tag_name, release_name, body, draft, prerelease)
            .await
    }

    async fn compare(&self, base_sha: &str, head_sha: &str) -> Result<Comparison, ServiceError> {
        (**self).compare(base_sha, head_sha).await
    }
}
