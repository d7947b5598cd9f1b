//! Tag and release reconciliation.
//!
//! The per-run decision procedure: does the latest commit need a tag, and
//! does the latest tag need a release. Nothing is persisted locally; every
//! invocation re-derives its state from the remote, so a run is an
//! idempotent best-effort attempt the operator may simply re-invoke.

pub mod notes;
pub mod tag_name;

use tracing::{debug, warn};

use crate::error::ReconcileError;
use crate::service::{Release, RepositoryService, Tag};

use self::notes::render_release_notes;
use self::tag_name::next_tag_name;

/// Result of a tagging pass.
#[derive(Debug, Clone)]
pub enum TagOutcome {
    /// The repository has no commits. Legitimate empty state, not an error.
    NoCommits,
    /// The latest commit already carries a tag; nothing was created.
    AlreadyTagged { sha: String },
    /// A tag object and its reference were created.
    Created { name: String, commit_sha: String },
}

/// Result of a release pass.
#[derive(Debug, Clone)]
pub enum ReleaseOutcome {
    /// The repository has no tags. Legitimate empty state, not an error.
    NoTags,
    /// The target tag already has a release; nothing was created.
    AlreadyReleased { tag_name: String },
    /// A release was published.
    Created(Release),
}

/// Sequences repository service calls to reconcile tags and releases.
pub struct ReleaseReconciler<S> {
    service: S,
}

impl<S: RepositoryService> ReleaseReconciler<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Tag the most recent commit, unless it is already tagged.
    ///
    /// "Most recent" is always by committer date, descending. The tag object
    /// is created first, then the `refs/tags/<name>` reference pointing at
    /// it; a failure between the two is reported as
    /// [`ReconcileError::PartialTagCreation`] so the orphaned object does not
    /// drift silently.
    pub async fn tag_latest_commit(&self) -> Result<TagOutcome, ReconcileError> {
        let commits = self.service.list_commits().await?;
        let Some(latest) = commits.iter().max_by_key(|c| c.committed_at) else {
            debug!("No commits found; nothing to tag");
            return Ok(TagOutcome::NoCommits);
        };

        let tags = self.service.list_tags().await?;
        if tags.iter().any(|t| t.commit_sha == latest.sha) {
            debug!(sha = %latest.sha, "Latest commit is already tagged");
            return Ok(TagOutcome::AlreadyTagged {
                sha: latest.sha.clone(),
            });
        }

        let newest_tag = tags.iter().max_by_key(|t| t.commit_date);
        let name = next_tag_name(newest_tag.map(|t| t.name.as_str()))?;
        let message = format!("Release {}", name);

        let tag_object = self
            .service
            .create_tag_object(&name, &message, &latest.sha)
            .await?;

        let ref_path = format!("refs/tags/{}", name);
        match self
            .service
            .create_reference(&ref_path, &tag_object.sha)
            .await
        {
            Ok(_) => Ok(TagOutcome::Created {
                name,
                commit_sha: latest.sha.clone(),
            }),
            Err(source) => Err(ReconcileError::PartialTagCreation {
                tag_name: name,
                source,
            }),
        }
    }

    /// Publish a release for a tag, unless one already exists.
    ///
    /// With no explicit tag, the latest tag (by target-commit committer
    /// date) is released. The release body diffs the target tag against the
    /// most recently created release's tag; the very first release falls
    /// back to the tag's comment-thread URL.
    pub async fn create_release(
        &self,
        tag: Option<Tag>,
    ) -> Result<ReleaseOutcome, ReconcileError> {
        let tags = self.service.list_tags().await?;
        let target = match tag {
            Some(tag) => tag,
            None => match tags.iter().max_by_key(|t| t.commit_date) {
                Some(latest) => latest.clone(),
                None => {
                    debug!("No tags found; nothing to release");
                    return Ok(ReleaseOutcome::NoTags);
                }
            },
        };

        let releases = self.service.list_releases().await?;
        if releases.iter().any(|r| r.tag_name == target.name) {
            debug!(tag = %target.name, "Tag already has a release");
            return Ok(ReleaseOutcome::AlreadyReleased {
                tag_name: target.name,
            });
        }

        let body = match releases.iter().max_by_key(|r| r.created_at) {
            Some(previous) => match tags.iter().find(|t| t.name == previous.tag_name) {
                Some(base) => {
                    let comparison = self
                        .service
                        .compare(&base.commit_sha, &target.commit_sha)
                        .await?;
                    render_release_notes(&comparison)
                }
                None => {
                    warn!(
                        tag = %previous.tag_name,
                        "Latest release points at a tag that no longer exists; using the minimal description"
                    );
                    target.comments_url.clone()
                }
            },
            None => target.comments_url.clone(),
        };

        let release = self
            .service
            .create_release(&target.name, &target.name, &body, false, false)
            .await?;

        Ok(ReleaseOutcome::Created(release))
    }
}
