//! Core types for gh-feedback

use serde::{Deserialize, Serialize};

/// Label attached to every issue this tool creates
///
/// Lookups only match issues carrying it, so user-filed issues are never
/// treated as duplicates.
pub const AUTO_GENERATED_LABEL: &str = "auto-generated";

/// Identity and bodies of a captured failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Stable fingerprint title, used as the exact-match lookup key
    pub issue_title: String,
    /// Full report body, used when creating an issue
    pub issue_details: String,
    /// Report body without the exception dump, used for duplicate comments
    pub issue_details_without_exception: String,
}

/// An auto-generated issue found on the tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingIssue {
    /// Issue number (GitLab: iid)
    pub number: u64,
    /// Web URL for the issue
    pub html_url: String,
    /// Issue body, may carry a `fixed:<version>` marker
    pub body: String,
}

/// An issue as returned by the create call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Issue number (GitLab: iid)
    pub number: u64,
    /// Web URL for the issue
    pub html_url: String,
}

/// Draft of an issue to be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    /// Issue title
    pub title: String,
    /// Issue body
    pub body: String,
    /// Labels to attach
    pub labels: Vec<String>,
}

impl NewIssue {
    /// Build the draft for a fresh auto-generated issue
    pub fn from_report(report: &ErrorReport) -> Self {
        Self {
            title: report.issue_title.clone(),
            body: report.issue_details.clone(),
            labels: vec![AUTO_GENERATED_LABEL.to_string()],
        }
    }
}

/// A git remote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}

/// Detected platform type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// GitHub or GitHub Enterprise
    GitHub,
    /// GitLab or self-hosted GitLab
    GitLab,
}

/// Tracker repository configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Platform type
    pub platform: Platform,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com/gitlab.com)
    pub host: Option<String>,
}
