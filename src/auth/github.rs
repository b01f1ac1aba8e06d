//! GitHub authentication

use crate::auth::{AuthSource, cli_token, env_token};
use crate::error::{Error, Result};

/// GitHub authentication configuration
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Get GitHub authentication
///
/// Priority:
/// 1. `GH_FEEDBACK_TOKEN` environment variable
/// 2. gh CLI (`gh auth token`)
/// 3. `GITHUB_TOKEN` environment variable
/// 4. `GH_TOKEN` environment variable
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    if let Some((token, AuthSource::Override)) = env_token(&[]) {
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Override,
        });
    }

    if let Some(token) = cli_token("gh", &["auth", "status"], &["auth", "token"]).await {
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    env_token(&["GITHUB_TOKEN", "GH_TOKEN"])
        .map(|(token, source)| GitHubAuthConfig { token, source })
        .ok_or_else(|| {
            Error::Auth(
                "No GitHub authentication found. Run `gh auth login` or set GITHUB_TOKEN"
                    .to_string(),
            )
        })
}

/// Test GitHub authentication, returning the login of the token owner
pub async fn test_github_auth(config: &GitHubAuthConfig) -> Result<String> {
    let octocrab = octocrab::Octocrab::builder()
        .personal_token(config.token.clone())
        .build()
        .map_err(|e| Error::GitHubApi(e.to_string()))?;

    let user = octocrab
        .current()
        .user()
        .await
        .map_err(|e| Error::Auth(format!("Invalid token: {e}")))?;

    Ok(user.login)
}
