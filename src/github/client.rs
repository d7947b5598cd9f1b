//! Repository service implementation over the GitHub REST API.
//!
//! Uses octocrab's generic routes with locally defined wire models, so the
//! service depends on exactly the fields it reads and nothing else.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ServiceError;
use crate::service::{
    Commit, Comparison, FileDelta, Reference, Release, RepositoryService, Tag, TagObject,
};

const PER_PAGE: u8 = 100;

/// Safety limit to prevent unbounded listing loops.
const MAX_PAGES: u32 = 50;

/// GitHub implementation of [`RepositoryService`], bound to one repository.
pub struct GitHubService {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubService {
    pub fn new(octocrab: Octocrab, owner: String, repo: String) -> Self {
        Self {
            octocrab,
            owner,
            repo,
        }
    }

    fn route(&self, suffix: &str) -> String {
        format!("/repos/{}/{}/{}", self.owner, self.repo, suffix)
    }

    /// Fetch every page of a listing endpoint.
    async fn get_paged<T: DeserializeOwned>(&self, route: &str) -> Result<Vec<T>, ServiceError> {
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let query = PageQuery {
                per_page: PER_PAGE,
                page,
            };
            let items: Vec<T> = self
                .octocrab
                .get(route, Some(&query))
                .await
                .map_err(|e| self.map_api_error(e))?;

            let batch = items.len();
            all.extend(items);

            if batch < PER_PAGE as usize {
                break;
            }

            page += 1;

            if page > MAX_PAGES {
                warn!(
                    "Reached {}-page safety limit while fetching {} for {}/{}",
                    MAX_PAGES, route, self.owner, self.repo
                );
                break;
            }
        }

        Ok(all)
    }

    /// Fetch one commit to learn its committer date and comment-thread URL.
    async fn fetch_commit(&self, sha: &str) -> Result<Option<Commit>, ServiceError> {
        let route = self.route(&format!("commits/{}", sha));
        let payload: CommitPayload = self
            .octocrab
            .get(&route, None::<&()>)
            .await
            .map_err(|e| self.map_api_error(e))?;

        Ok(into_commit(payload))
    }

    fn map_api_error(&self, err: octocrab::Error) -> ServiceError {
        // Check error content using both Display and Debug output
        // to handle different octocrab error formats
        let err_display = err.to_string();
        let err_debug = format!("{:?}", err);
        let err_lower = err_display.to_lowercase();
        let debug_lower = err_debug.to_lowercase();

        if err_lower.contains("bad credentials") || debug_lower.contains("bad credentials") {
            return ServiceError::AuthenticationFailed;
        }

        // GitHub returns 403 with a rate limit message
        if err_lower.contains("rate limit") || debug_lower.contains("rate limit") {
            return ServiceError::RateLimited {
                reset_time: "unknown".to_string(),
            };
        }

        if err_display.contains("Not Found") || err_debug.contains("Not Found") {
            return ServiceError::RepositoryNotFound {
                owner: self.owner.clone(),
                repo: self.repo.clone(),
            };
        }

        ServiceError::Api(Box::new(err))
    }
}

#[async_trait]
impl RepositoryService for GitHubService {
    async fn list_commits(&self) -> Result<Vec<Commit>, ServiceError> {
        let route = self.route("commits");
        let payloads: Vec<CommitPayload> = self.get_paged(&route).await?;

        let commits = payloads
            .into_iter()
            .filter_map(|payload| {
                let sha = payload.sha.clone();
                let commit = into_commit(payload);
                if commit.is_none() {
                    warn!(sha = %sha, "Skipping commit without a usable timestamp");
                }
                commit
            })
            .collect();

        Ok(commits)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ServiceError> {
        let route = self.route("tags");
        let payloads: Vec<TagPayload> = self.get_paged(&route).await?;

        let mut tags = Vec::with_capacity(payloads.len());
        for payload in payloads {
            match self.fetch_commit(&payload.commit.sha).await? {
                Some(commit) => tags.push(Tag {
                    name: payload.name,
                    commit_sha: commit.sha,
                    commit_date: commit.committed_at,
                    comments_url: commit.comments_url,
                }),
                None => warn!(
                    tag = %payload.name,
                    "Skipping tag whose target commit has no usable timestamp"
                ),
            }
        }

        Ok(tags)
    }

    async fn list_releases(&self) -> Result<Vec<Release>, ServiceError> {
        let route = self.route("releases");
        let payloads: Vec<ReleasePayload> = self.get_paged(&route).await?;

        Ok(payloads.into_iter().map(Release::from).collect())
    }

    async fn create_tag_object(
        &self,
        name: &str,
        message: &str,
        target_sha: &str,
    ) -> Result<TagObject, ServiceError> {
        let route = self.route("git/tags");
        let request = CreateTagRequest {
            tag: name,
            message,
            object: target_sha,
            target_type: "commit",
        };

        let payload: GitTagPayload = self
            .octocrab
            .post(&route, Some(&request))
            .await
            .map_err(|e| self.map_api_error(e))?;

        Ok(TagObject {
            name: payload.tag,
            sha: payload.sha,
        })
    }

    async fn create_reference(
        &self,
        ref_path: &str,
        target_sha: &str,
    ) -> Result<Reference, ServiceError> {
        let route = self.route("git/refs");
        let request = CreateReferenceRequest {
            ref_path,
            sha: target_sha,
        };

        let payload: ReferencePayload = self
            .octocrab
            .post(&route, Some(&request))
            .await
            .map_err(|e| self.map_api_error(e))?;

        Ok(Reference {
            ref_path: payload.ref_path,
            sha: payload.object.sha,
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
        let route = self.route("releases");
        let request = CreateReleaseRequest {
            tag_name,
            name: release_name,
            body,
            draft,
            prerelease,
        };

        let payload: ReleasePayload = self
            .octocrab
            .post(&route, Some(&request))
            .await
            .map_err(|e| self.map_api_error(e))?;

        Ok(payload.into())
    }

    async fn compare(&self, base_sha: &str, head_sha: &str) -> Result<Comparison, ServiceError> {
        let route = self.route(&format!("compare/{}...{}", base_sha, head_sha));
        let payload: ComparisonPayload = self
            .octocrab
            .get(&route, None::<&()>)
            .await
            .map_err(|e| self.map_api_error(e))?;

        Ok(Comparison {
            html_url: payload.html_url,
            files: payload.files.into_iter().map(FileDelta::from).collect(),
        })
    }
}

fn into_commit(payload: CommitPayload) -> Option<Commit> {
    let committed_at = payload
        .commit
        .committer
        .as_ref()
        .and_then(|s| s.date)
        .or_else(|| payload.commit.author.as_ref().and_then(|s| s.date))?;

    Some(Commit {
        sha: payload.sha,
        committed_at,
        comments_url: payload.comments_url,
    })
}

// ── Query and request payloads ──

#[derive(Serialize)]
struct PageQuery {
    per_page: u8,
    page: u32,
}

#[derive(Serialize)]
struct CreateTagRequest<'a> {
    tag: &'a str,
    message: &'a str,
    object: &'a str,
    #[serde(rename = "type")]
    target_type: &'a str,
}

#[derive(Serialize)]
struct CreateReferenceRequest<'a> {
    #[serde(rename = "ref")]
    ref_path: &'a str,
    sha: &'a str,
}

#[derive(Serialize)]
struct CreateReleaseRequest<'a> {
    tag_name: &'a str,
    name: &'a str,
    body: &'a str,
    draft: bool,
    prerelease: bool,
}

// ── Response wire models ──

#[derive(Debug, Deserialize)]
struct CommitPayload {
    sha: String,
    comments_url: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<SignaturePayload>,
    committer: Option<SignaturePayload>,
}

#[derive(Debug, Deserialize)]
struct SignaturePayload {
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct TagPayload {
    name: String,
    commit: ObjectPayload,
}

#[derive(Debug, Deserialize)]
struct ObjectPayload {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ReleasePayload {
    id: u64,
    name: Option<String>,
    tag_name: String,
    created_at: DateTime<Utc>,
    body: Option<String>,
    draft: bool,
    prerelease: bool,
}

impl From<ReleasePayload> for Release {
    fn from(payload: ReleasePayload) -> Self {
        Release {
            id: payload.id,
            name: payload.name.unwrap_or_else(|| payload.tag_name.clone()),
            tag_name: payload.tag_name,
            created_at: payload.created_at,
            body: payload.body,
            draft: payload.draft,
            prerelease: payload.prerelease,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GitTagPayload {
    sha: String,
    tag: String,
}

#[derive(Debug, Deserialize)]
struct ReferencePayload {
    #[serde(rename = "ref")]
    ref_path: String,
    object: ObjectPayload,
}

#[derive(Debug, Deserialize)]
struct ComparisonPayload {
    html_url: String,
    #[serde(default)]
    files: Vec<FilePayload>,
}

#[derive(Debug, Deserialize)]
struct FilePayload {
    filename: String,
    status: String,
    additions: u64,
    deletions: u64,
    changes: u64,
    blob_url: String,
    patch: Option<String>,
}

impl From<FilePayload> for FileDelta {
    fn from(payload: FilePayload) -> Self {
        FileDelta {
            filename: payload.filename,
            status: payload.status,
            additions: payload.additions,
            deletions: payload.deletions,
            changes: payload.changes,
            blob_url: payload.blob_url,
            patch: payload.patch,
        }
    }
}
