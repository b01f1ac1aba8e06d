//! Test data factories for gh-feedback types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use gh_feedback::types::{ErrorReport, ExistingIssue, Platform, PlatformConfig};

pub const TEST_ISSUE_NUMBER: u64 = 1;
pub const TEST_ISSUE_TITLE: &str = "Test error [hash]";
pub const TEST_ISSUE_BODY: &str = "Test issue body";
pub const TEST_ISSUE_SHORT_BODY: &str = "Test issue body without exception";
pub const TEST_ISSUE_URL: &str = "https://github.com/issues/1";

/// Error report with the standard test title and bodies
pub fn make_report() -> ErrorReport {
    ErrorReport {
        issue_title: TEST_ISSUE_TITLE.to_string(),
        issue_details: TEST_ISSUE_BODY.to_string(),
        issue_details_without_exception: TEST_ISSUE_SHORT_BODY.to_string(),
    }
}

/// Existing issue #1 with the given body
pub fn make_existing_issue(body: &str) -> ExistingIssue {
    ExistingIssue {
        number: TEST_ISSUE_NUMBER,
        html_url: TEST_ISSUE_URL.to_string(),
        body: body.to_string(),
    }
}

/// Create a GitHub platform config
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        platform: Platform::GitHub,
        owner: "testowner".to_string(),
        repo: "testrepo".to_string(),
        host: None,
    }
}
