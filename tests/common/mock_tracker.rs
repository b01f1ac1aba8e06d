//! Mock issue tracker for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use gh_feedback::error::{Error, Result};
use gh_feedback::platform::IssueService;
use gh_feedback::types::{CreatedIssue, ExistingIssue, NewIssue, PlatformConfig};
use gh_feedback::version::VersionOracle;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `add_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentCall {
    pub issue_number: u64,
    pub body: String,
}

/// Recording mock of `IssueService`
///
/// Features:
/// - Auto-incrementing issue numbers for created issues
/// - Call tracking for verification
/// - Configurable lookup responses per title
/// - Error injection per operation
pub struct MockIssueService {
    config: PlatformConfig,
    next_issue_number: AtomicU64,
    find_responses: Mutex<HashMap<String, ExistingIssue>>,
    // Call tracking
    find_calls: Mutex<Vec<String>>,
    submit_calls: Mutex<Vec<NewIssue>>,
    comment_calls: Mutex<Vec<AddCommentCall>>,
    // Error injection
    error_on_find: Mutex<Option<String>>,
    error_on_submit: Mutex<Option<String>>,
    error_on_comment: Mutex<Option<String>>,
}

impl MockIssueService {
    /// Create a new mock; created issues start at `first_issue_number`
    pub fn new(config: PlatformConfig, first_issue_number: u64) -> Self {
        Self {
            config,
            next_issue_number: AtomicU64::new(first_issue_number),
            find_responses: Mutex::new(HashMap::new()),
            find_calls: Mutex::new(Vec::new()),
            submit_calls: Mutex::new(Vec::new()),
            comment_calls: Mutex::new(Vec::new()),
            error_on_find: Mutex::new(None),
            error_on_submit: Mutex::new(None),
            error_on_comment: Mutex::new(None),
        }
    }

    // === Error injection methods ===

    /// Make `find_auto_generated_issue_by_title` return an error
    pub fn fail_find(&self, msg: &str) {
        *self.error_on_find.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `submit_issue` return an error
    pub fn fail_submit(&self, msg: &str) {
        *self.error_on_submit.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `add_comment` return an error
    pub fn fail_comment(&self, msg: &str) {
        *self.error_on_comment.lock().unwrap() = Some(msg.to_string());
    }

    /// Register an existing auto-generated issue under `title`
    pub fn set_existing_issue(&self, title: &str, issue: ExistingIssue) {
        self.find_responses
            .lock()
            .unwrap()
            .insert(title.to_string(), issue);
    }

    /// Remove the issue registered under `title`
    pub fn clear_existing_issue(&self, title: &str) {
        self.find_responses.lock().unwrap().remove(title);
    }

    // === Call verification methods ===

    pub fn get_find_calls(&self) -> Vec<String> {
        self.find_calls.lock().unwrap().clone()
    }

    pub fn get_submit_calls(&self) -> Vec<NewIssue> {
        self.submit_calls.lock().unwrap().clone()
    }

    pub fn get_comment_calls(&self) -> Vec<AddCommentCall> {
        self.comment_calls.lock().unwrap().clone()
    }

    /// Number of calls of any kind
    pub fn total_calls(&self) -> usize {
        self.get_find_calls().len() + self.get_submit_calls().len() + self.get_comment_calls().len()
    }

    /// Assert that `add_comment` was called exactly with these arguments
    pub fn assert_comment_called(&self, issue_number: u64, body: &str) {
        let calls = self.get_comment_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.issue_number == issue_number && c.body == body),
            "Expected add_comment({issue_number}, {body:?}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl IssueService for MockIssueService {
    async fn find_auto_generated_issue_by_title(
        &self,
        title: &str,
    ) -> Result<Option<ExistingIssue>> {
        self.find_calls.lock().unwrap().push(title.to_string());

        if let Some(msg) = self.error_on_find.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self.find_responses.lock().unwrap().get(title).cloned())
    }

    async fn submit_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        self.submit_calls.lock().unwrap().push(issue.clone());

        if let Some(msg) = self.error_on_submit.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let number = self.next_issue_number.fetch_add(1, Ordering::SeqCst);
        Ok(CreatedIssue {
            number,
            html_url: format!("https://github.com/issues/{number}"),
        })
    }

    async fn add_comment(&self, issue_number: u64, body: &str) -> Result<()> {
        self.comment_calls.lock().unwrap().push(AddCommentCall {
            issue_number,
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_comment.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

/// Version oracle with a fixed answer that records what it was asked
pub struct StubOracle {
    older: bool,
    asked: Mutex<Vec<String>>,
}

impl StubOracle {
    pub fn older(older: bool) -> Self {
        Self {
            older,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl VersionOracle for StubOracle {
    fn running_version_is_older_than(&self, version: &str) -> bool {
        self.asked.lock().unwrap().push(version.to_string());
        self.older
    }
}
