//! GitLab authentication

use crate::auth::{AuthSource, cli_token, env_token};
use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::env;

/// GitLab authentication configuration
#[derive(Debug, Clone)]
pub struct GitLabAuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
    /// GitLab host (e.g., "gitlab.com")
    pub host: String,
}

/// Get GitLab authentication
///
/// Priority:
/// 1. `GH_FEEDBACK_TOKEN` environment variable
/// 2. glab CLI (`glab auth token`)
/// 3. `GITLAB_TOKEN` environment variable
/// 4. `GL_TOKEN` environment variable
pub async fn get_gitlab_auth(host: Option<&str>) -> Result<GitLabAuthConfig> {
    let host = host
        .map(String::from)
        .or_else(|| env::var("GITLAB_HOST").ok())
        .unwrap_or_else(|| "gitlab.com".to_string());

    if let Some((token, AuthSource::Override)) = env_token(&[]) {
        return Ok(GitLabAuthConfig {
            token,
            source: AuthSource::Override,
            host,
        });
    }

    let status_args = ["auth", "status", "--hostname", host.as_str()];
    let token_args = ["auth", "token", "--hostname", host.as_str()];
    if let Some(token) = cli_token("glab", &status_args, &token_args).await {
        return Ok(GitLabAuthConfig {
            token,
            source: AuthSource::Cli,
            host,
        });
    }

    match env_token(&["GITLAB_TOKEN", "GL_TOKEN"]) {
        Some((token, source)) => Ok(GitLabAuthConfig {
            token,
            source,
            host,
        }),
        None => Err(Error::Auth(
            "No GitLab authentication found. Run `glab auth login` or set GITLAB_TOKEN"
                .to_string(),
        )),
    }
}

#[derive(Deserialize)]
struct GitLabUser {
    username: String,
}

/// Test GitLab authentication, returning the username of the token owner
pub async fn test_gitlab_auth(config: &GitLabAuthConfig) -> Result<String> {
    let url = format!("https://{}/api/v4/user", config.host);

    let user: GitLabUser = Client::new()
        .get(&url)
        .header("PRIVATE-TOKEN", &config.token)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("Invalid token: {e}")))?
        .json()
        .await?;

    Ok(user.username)
}
