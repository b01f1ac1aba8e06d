//! Issue service factory
//!
//! Creates issue services based on configuration.

use crate::auth::{get_github_auth, get_gitlab_auth};
use crate::error::Result;
use crate::platform::{GitHubIssueService, GitLabIssueService, IssueService};
use crate::types::{Platform, PlatformConfig};
use tracing::debug;

/// Create an issue service from configuration
///
/// Handles authentication and client construction for both GitHub and GitLab.
pub async fn create_issue_service(config: &PlatformConfig) -> Result<Box<dyn IssueService>> {
    match config.platform {
        Platform::GitHub => {
            let auth = get_github_auth().await?;
            debug!(source = ?auth.source, "using GitHub token");
            Ok(Box::new(GitHubIssueService::new(
                &auth.token,
                config.owner.clone(),
                config.repo.clone(),
                config.host.clone(),
            )?))
        }
        Platform::GitLab => {
            let auth = get_gitlab_auth(config.host.as_deref()).await?;
            debug!(source = ?auth.source, host = %auth.host, "using GitLab token");
            Ok(Box::new(GitLabIssueService::new(
                auth.token,
                config.owner.clone(),
                config.repo.clone(),
                Some(auth.host),
            )))
        }
    }
}
