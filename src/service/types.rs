//! Entities owned by the remote repository service.
//!
//! All of these are created and stored remotely; the reconciler reads them
//! for decision-making and requests creation of new tags and releases, but
//! never mutates an existing entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit as listed by the remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    /// Committer timestamp, falling back to the author timestamp when the
    /// committer signature is absent.
    pub committed_at: DateTime<Utc>,
    /// URL of the commit's comment thread.
    pub comments_url: String,
}

/// An existing tag, resolved to its target commit.
///
/// Tags are ordered by the target commit's committer date, never by parsing
/// the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub commit_sha: String,
    pub commit_date: DateTime<Utc>,
    /// Comment-thread URL of the target commit, used as the fallback release
    /// description when there is no prior release to diff against.
    pub comments_url: String,
}

/// A freshly created annotated tag object.
///
/// Distinct from [`Tag`]: the sha here is the tag object's own hash, which a
/// `refs/tags/<name>` reference must point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagObject {
    pub name: String,
    pub sha: String,
}

/// A named reference, e.g. `refs/tags/v.0.0.2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub ref_path: String,
    pub sha: String,
}

/// A published release bound to a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub id: u64,
    pub name: String,
    pub tag_name: String,
    pub created_at: DateTime<Utc>,
    pub body: Option<String>,
    pub draft: bool,
    pub prerelease: bool,
}

/// A service-computed diff between two commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// Human-facing diff URL.
    pub html_url: String,
    /// Changed files in the order the service returned them. Never re-sorted.
    pub files: Vec<FileDelta>,
}

/// Per-file statistics within a [`Comparison`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDelta {
    pub filename: String,
    pub status: String,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
    pub blob_url: String,
    pub patch: Option<String>,
}
