//! Token discovery for GitHub and GitLab
//!
//! Tokens come from `GH_FEEDBACK_TOKEN`, the platform CLI (gh, glab) or the
//! platform's usual environment variables, in that order.

mod github;
mod gitlab;

pub use github::{GitHubAuthConfig, get_github_auth, test_github_auth};
pub use gitlab::{GitLabAuthConfig, get_gitlab_auth, test_gitlab_auth};

use std::env;
use tokio::process::Command;

/// Environment variable that overrides every other token source
pub const TOKEN_OVERRIDE_VAR: &str = "GH_FEEDBACK_TOKEN";

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from `GH_FEEDBACK_TOKEN`
    Override,
    /// Token from CLI tool (gh or glab)
    Cli,
    /// Token from a platform environment variable
    EnvVar,
}

/// First non-empty token among the override and the given variables
fn env_token(vars: &[&str]) -> Option<(String, AuthSource)> {
    if let Some(token) = non_empty_var(TOKEN_OVERRIDE_VAR) {
        return Some((token, AuthSource::Override));
    }
    vars.iter()
        .find_map(|var| non_empty_var(var))
        .map(|token| (token, AuthSource::EnvVar))
}

fn non_empty_var(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Ask a platform CLI for its token
///
/// Returns `None` when the tool is missing, not logged in, or prints nothing.
async fn cli_token(program: &str, status_args: &[&str], token_args: &[&str]) -> Option<String> {
    let status = Command::new(program).args(status_args).output().await.ok()?;
    if !status.status.success() {
        return None;
    }

    let output = Command::new(program).args(token_args).output().await.ok()?;
    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}
