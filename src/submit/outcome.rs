//! Submission outcome and its user-facing messages

use crate::types::{CreatedIssue, ExistingIssue};
use serde::Serialize;
use std::fmt;

/// Message shown for every failed submission, whatever the cause
pub const COMMUNICATION_FAILURE_MESSAGE: &str = "Could not communicate with GitHub";

/// Final status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// A new issue was created
    NewIssue,
    /// The error was already reported (open, or fixed in a newer version)
    Duplicate,
    /// The tracker could not be reached or rejected a request
    Failed,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewIssue => write!(f, "new issue"),
            Self::Duplicate => write!(f, "duplicate"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of one submission, rendered verbatim by the host
///
/// `url` is `None` exactly when the status is [`SubmissionStatus::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    status: SubmissionStatus,
    link_text: String,
    url: Option<String>,
}

impl SubmissionOutcome {
    /// A new issue was created
    pub fn new_issue(issue: &CreatedIssue) -> Self {
        Self {
            status: SubmissionStatus::NewIssue,
            link_text: format!(
                "Created GitHub issue: {}.<br>Thank you for your feedback!",
                issue_link(&issue.html_url, issue.number)
            ),
            url: Some(issue.html_url.clone()),
        }
    }

    /// The error matches an open issue that just got a comment
    pub fn already_reported(issue: &ExistingIssue) -> Self {
        Self {
            status: SubmissionStatus::Duplicate,
            link_text: format!(
                "Issue was already reported on GitHub: {}.<br>Thank you for your feedback!",
                issue_link(&issue.html_url, issue.number)
            ),
            url: Some(issue.html_url.clone()),
        }
    }

    /// The error is fixed in a version newer than the running one
    pub fn already_fixed(issue: &ExistingIssue, fixed_version: &str) -> Self {
        Self {
            status: SubmissionStatus::Duplicate,
            link_text: format!(
                "Error is already fixed in version {fixed_version}. See GitHub issue: {}.<br>Please update plugin.",
                issue_link(&issue.html_url, issue.number)
            ),
            url: Some(issue.html_url.clone()),
        }
    }

    /// Any tracker failure
    pub fn failed() -> Self {
        Self {
            status: SubmissionStatus::Failed,
            link_text: COMMUNICATION_FAILURE_MESSAGE.to_string(),
            url: None,
        }
    }

    /// Final status
    pub const fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// HTML-ish message for the user
    pub fn link_text(&self) -> &str {
        &self.link_text
    }

    /// Issue link, absent for failures
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

fn issue_link(url: &str, number: u64) -> String {
    format!("<a href=\"{url}\">#{number}</a>")
}
