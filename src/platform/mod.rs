//! Tracker services for GitHub and GitLab
//!
//! Provides a unified interface for the three issue operations the
//! submission decider needs: lookup, create and comment.

mod detection;
mod factory;
mod github;
mod gitlab;

pub use detection::{detect_platform, parse_repo_info};
pub use factory::create_issue_service;
pub use github::GitHubIssueService;
pub use gitlab::GitLabIssueService;

use crate::error::Result;
use crate::types::{CreatedIssue, ExistingIssue, NewIssue, PlatformConfig};
use async_trait::async_trait;
use std::time::Duration;

/// Timeout applied to every tracker request
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Issue tracker trait
///
/// This trait abstracts GitHub and GitLab issue operations, allowing the
/// same submission logic to work with either platform.
#[async_trait]
pub trait IssueService: Send + Sync {
    /// Find an auto-generated issue whose title equals `title` exactly
    ///
    /// Issues in any state are considered. When several match, the most
    /// recently created one wins.
    async fn find_auto_generated_issue_by_title(&self, title: &str)
    -> Result<Option<ExistingIssue>>;

    /// Create a new issue
    async fn submit_issue(&self, issue: &NewIssue) -> Result<CreatedIssue>;

    /// Add a comment to an issue
    async fn add_comment(&self, issue_number: u64, body: &str) -> Result<()>;

    /// Get the tracker configuration
    fn config(&self) -> &PlatformConfig;
}
