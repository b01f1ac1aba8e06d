//! Error types for gh-feedback

use thiserror::Error;

/// Library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the tracker adapters, config layer and report builder
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitLab API error
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failure
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Git repository or remote lookup failure
    #[error("git error: {0}")]
    Git(String),

    /// Remote URL does not point at a supported tracker
    #[error("no supported remote found (expected a GitHub or GitLab URL)")]
    NoSupportedRemotes,

    /// Generic tracker failure
    #[error("platform error: {0}")]
    Platform(String),

    /// Parse failure
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unexpected internal state
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}
