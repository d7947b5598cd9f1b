//! GitHub session construction and verification.
//!
//! Authentication happens once, up front: an invalid or expired token fails
//! the run immediately instead of midway through tagging.

use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;

use crate::error::ServiceError;

#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    login: String,
}

/// Build a token-authenticated client and verify the session.
///
/// Returns the client together with the authenticated login.
pub async fn authenticate(token: &str) -> Result<(Octocrab, String), ServiceError> {
    let octocrab = Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|e| ServiceError::Api(Box::new(e)))?;

    let login = verify_session(&octocrab).await?;
    Ok((octocrab, login))
}

/// Resolve the authenticated user for a pre-configured client.
///
/// This allows dependency injection for testing with mock servers.
pub async fn verify_session(octocrab: &Octocrab) -> Result<String, ServiceError> {
    let user: AuthenticatedUser = octocrab
        .get("/user", None::<&()>)
        .await
        .map_err(|e| {
            // Check error content using both Display and Debug output
            // to handle different octocrab error formats
            let err_lower = e.to_string().to_lowercase();
            let debug_lower = format!("{:?}", e).to_lowercase();

            if err_lower.contains("bad credentials")
                || debug_lower.contains("bad credentials")
                || err_lower.contains("requires authentication")
            {
                ServiceError::AuthenticationFailed
            } else {
                ServiceError::Api(Box::new(e))
            }
        })?;

    debug!(login = %user.login, "GitHub session verified");
    Ok(user.login)
}
