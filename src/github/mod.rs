//! GitHub-backed repository service using octocrab.

pub mod auth;
pub mod client;

pub use auth::authenticate;
pub use client::GitHubService;
