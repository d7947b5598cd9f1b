//! Shared test utilities: an in-memory fake of the repository service.
//!
//! Not all helpers are used by every test file.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use tagsmith::error::ServiceError;
use tagsmith::service::{
    Commit, Comparison, FileDelta, Reference, Release, RepositoryService, Tag, TagObject,
};

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn commit(sha: &str, committed_at: DateTime<Utc>) -> Commit {
    Commit {
        sha: sha.to_string(),
        committed_at,
        comments_url: comments_url(sha),
    }
}

pub fn tag(name: &str, commit_sha: &str, commit_date: DateTime<Utc>) -> Tag {
    Tag {
        name: name.to_string(),
        commit_sha: commit_sha.to_string(),
        commit_date,
        comments_url: comments_url(commit_sha),
    }
}

pub fn release(id: u64, tag_name: &str, created_at: DateTime<Utc>) -> Release {
    Release {
        id,
        name: tag_name.to_string(),
        tag_name: tag_name.to_string(),
        created_at,
        body: None,
        draft: false,
        prerelease: false,
    }
}

pub fn file_delta(filename: &str, patch: Option<&str>) -> FileDelta {
    FileDelta {
        filename: filename.to_string(),
        status: "modified".to_string(),
        additions: 5,
        deletions: 1,
        changes: 6,
        blob_url: format!("https://github.com/owner/repo/blob/head/{}", filename),
        patch: patch.map(str::to_string),
    }
}

pub fn comments_url(sha: &str) -> String {
    format!(
        "https://api.github.com/repos/owner/repo/commits/{}/comments",
        sha
    )
}

/// A tag object created but not yet referenced.
struct PendingTagObject {
    object_sha: String,
    name: String,
    commit_sha: String,
}

/// In-memory stand-in for the remote repository service.
///
/// Owns commit/tag/release state the way the remote does and records every
/// creation call, so tests can assert on exactly what a reconciliation run
/// changed. A created tag becomes visible in `list_tags` only once its
/// reference exists, matching the remote's two-step tag creation.
pub struct FakeService {
    commits: Vec<Commit>,
    tags: Mutex<Vec<Tag>>,
    releases: Mutex<Vec<Release>>,
    comparison: Comparison,
    pending_tag_objects: Mutex<Vec<PendingTagObject>>,
    pub created_tag_objects: Mutex<Vec<(String, String, String)>>,
    pub created_references: Mutex<Vec<(String, String)>>,
    pub created_releases: Mutex<Vec<Release>>,
    pub compare_calls: Mutex<Vec<(String, String)>>,
    next_release_id: Mutex<u64>,
}

impl FakeService {
    pub fn new(commits: Vec<Commit>, tags: Vec<Tag>, releases: Vec<Release>) -> Self {
        Self {
            commits,
            tags: Mutex::new(tags),
            releases: Mutex::new(releases),
            comparison: Comparison {
                html_url: "https://github.com/owner/repo/compare/base...head".to_string(),
                files: Vec::new(),
            },
            pending_tag_objects: Mutex::new(Vec::new()),
            created_tag_objects: Mutex::new(Vec::new()),
            created_references: Mutex::new(Vec::new()),
            created_releases: Mutex::new(Vec::new()),
            compare_calls: Mutex::new(Vec::new()),
            next_release_id: Mutex::new(1),
        }
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn tag_creation_count(&self) -> usize {
        self.created_tag_objects.lock().unwrap().len()
    }

    pub fn release_creation_count(&self) -> usize {
        self.created_releases.lock().unwrap().len()
    }
}

#[async_trait]
impl RepositoryService for FakeService {
    async fn list_commits(&self) -> Result<Vec<Commit>, ServiceError> {
        Ok(self.commits.clone())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ServiceError> {
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn list_releases(&self) -> Result<Vec<Release>, ServiceError> {
        Ok(self.releases.lock().unwrap().clone())
    }

    async fn create_tag_object(
        &self,
        name: &str,
        message: &str,
        target_sha: &str,
    ) -> Result<TagObject, ServiceError> {
        self.created_tag_objects.lock().unwrap().push((
            name.to_string(),
            message.to_string(),
            target_sha.to_string(),
        ));

        let object_sha = format!("tagobj-{}", name);
        self.pending_tag_objects.lock().unwrap().push(PendingTagObject {
            object_sha: object_sha.clone(),
            name: name.to_string(),
            commit_sha: target_sha.to_string(),
        });

        Ok(TagObject {
            name: name.to_string(),
            sha: object_sha,
        })
    }

    async fn create_reference(
        &self,
        ref_path: &str,
        target_sha: &str,
    ) -> Result<Reference, ServiceError> {
        self.created_references
            .lock()
            .unwrap()
            .push((ref_path.to_string(), target_sha.to_string()));

        // The tag becomes listable once its reference exists
        let pending = self.pending_tag_objects.lock().unwrap();
        if let Some(tag_object) = pending.iter().find(|p| p.object_sha == target_sha) {
            if let Some(commit) = self.commits.iter().find(|c| c.sha == tag_object.commit_sha) {
                self.tags.lock().unwrap().push(Tag {
                    name: tag_object.name.clone(),
                    commit_sha: commit.sha.clone(),
                    commit_date: commit.committed_at,
                    comments_url: commit.comments_url.clone(),
                });
            }
        }

        Ok(Reference {
            ref_path: ref_path.to_string(),
            sha: target_sha.to_string(),
        })
    }

    async fn create_release(
        &self,
        tag_name: &str,
        release_name: &str,
        body: &str,
        draft: bool,
        prerelease: bool,
    ) -> Result<Release, ServiceError> {
        let mut next_id = self.next_release_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;

        let release = Release {
            id,
            name: release_name.to_string(),
            tag_name: tag_name.to_string(),
            created_at: date(2024, 6, 1) + Duration::days(id as i64),
            body: Some(body.to_string()),
            draft,
            prerelease,
        };

        self.releases.lock().unwrap().push(release.clone());
        self.created_releases.lock().unwrap().push(release.clone());

        Ok(release)
    }

    async fn compare(&self, base_sha: &str, head_sha: &str) -> Result<Comparison, ServiceError> {
        self.compare_calls
            .lock()
            .unwrap()
            .push((base_sha.to_string(), head_sha.to_string()));

        Ok(self.comparison.clone())
    }
}
