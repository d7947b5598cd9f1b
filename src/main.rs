//! tagsmith - CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;

use tagsmith::github::auth::authenticate;
use tagsmith::github::client::GitHubService;
use tagsmith::reconcile::{ReleaseOutcome, ReleaseReconciler, TagOutcome};

/// Tag the latest commit and publish a GitHub release with diff notes.
#[derive(Parser, Debug)]
#[command(name = "tagsmith")]
#[command(about = "Tag the latest commit and publish a GitHub release with diff notes")]
#[command(version)]
struct Cli {
    /// GitHub account that owns the repository
    username: String,

    /// Personal access token used to authenticate (never echoed back)
    token: String,

    /// Repository name, without the owner prefix
    repo_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    println!("Reconciling {}/{}...", cli.username, cli.repo_name);

    // Step 1: Authenticate and verify the session up front
    let (octocrab, login) = authenticate(&cli.token)
        .await
        .context("GitHub authentication failed")?;

    println!("Authenticated as {}", login);

    let service = GitHubService::new(octocrab, cli.username.clone(), cli.repo_name.clone());
    let reconciler = ReleaseReconciler::new(service);

    // Step 2: Tag the latest commit if it is untagged
    match reconciler
        .tag_latest_commit()
        .await
        .context("Failed to tag the latest commit")?
    {
        TagOutcome::NoCommits => {
            println!("Repository has no commits. Nothing to do.");
            return Ok(());
        }
        TagOutcome::AlreadyTagged { sha } => {
            println!("Latest commit {} is already tagged", short(&sha));
        }
        TagOutcome::Created { name, commit_sha } => {
            println!("Tagged commit {} as {}", short(&commit_sha), name);
        }
    }

    // Step 3: Publish a release for the latest tag if it has none.
    // Tag state is re-fetched here, so a tag created in step 2 is observed.
    match reconciler
        .create_release(None)
        .await
        .context("Failed to create the release")?
    {
        ReleaseOutcome::NoTags => {
            println!("Repository has no tags. Nothing to release.");
        }
        ReleaseOutcome::AlreadyReleased { tag_name } => {
            println!("Tag {} already has a release", tag_name);
        }
        ReleaseOutcome::Created(release) => {
            println!("✓ Created release {} for tag {}", release.name, release.tag_name);
        }
    }

    Ok(())
}

/// Abbreviate a commit hash for display.
fn short(sha: &str) -> &str {
    &sha[..sha.len().min(7)]
}
