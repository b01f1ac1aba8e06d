//! Error report construction
//!
//! Turns a captured failure into the [`ErrorReport`] the submission decider
//! works with: a fingerprint title that is stable across identical failures,
//! a full body for new issues, and a trimmed body for duplicate comments.

use crate::types::ErrorReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Hex characters of the stack hash kept in the title
const FINGERPRINT_LEN: usize = 8;

/// Longest summary kept in the title, in characters
const MAX_SUMMARY_CHARS: usize = 80;

/// Host environment the error occurred in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Operating system name
    pub os: String,
    /// CPU architecture
    pub arch: String,
}

impl Environment {
    /// Environment of the current process
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

/// A failure captured on the user's machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedError {
    /// Error message shown to the user
    pub message: String,
    /// Exception dump / backtrace, possibly empty
    pub stack_trace: String,
    /// Version of the software that failed
    pub app_version: String,
    /// Free-form description typed by the user
    pub description: Option<String>,
    /// Action the user was performing
    pub last_action: Option<String>,
    /// Host environment
    pub environment: Environment,
    /// When the error was captured
    pub captured_at: DateTime<Utc>,
}

impl CapturedError {
    /// Capture an error in the current environment, timestamped now
    pub fn new(message: impl Into<String>, stack_trace: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack_trace: stack_trace.into(),
            app_version: String::new(),
            description: None,
            last_action: None,
            environment: Environment::current(),
            captured_at: Utc::now(),
        }
    }

    /// Set the failing software version
    #[must_use]
    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    /// Set the user description
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    /// Set the last user action
    #[must_use]
    pub fn with_last_action(mut self, action: Option<String>) -> Self {
        self.last_action = action.filter(|a| !a.trim().is_empty());
        self
    }

    /// Build the report submitted to the tracker
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            issue_title: self.issue_title(),
            issue_details: self.render_details(true),
            issue_details_without_exception: self.render_details(false),
        }
    }

    /// `"{summary} [{fingerprint}]"`
    pub fn issue_title(&self) -> String {
        format!("{} [{}]", self.summary(), self.fingerprint())
    }

    /// First 8 hex chars of the SHA-256 of the normalized stack trace
    ///
    /// Falls back to the message when there is no stack trace.
    pub fn fingerprint(&self) -> String {
        let normalized = normalize_trace(&self.stack_trace);
        let source = if normalized.is_empty() {
            self.message.trim()
        } else {
            normalized.as_str()
        };

        let digest = Sha256::digest(source.as_bytes());
        let mut hex = hex::encode(digest);
        hex.truncate(FINGERPRINT_LEN);
        hex
    }

    fn summary(&self) -> String {
        let first_line = self
            .stack_trace
            .lines()
            .chain(self.message.lines())
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("Unknown error");

        if first_line.chars().count() > MAX_SUMMARY_CHARS {
            let cut: String = first_line.chars().take(MAX_SUMMARY_CHARS - 3).collect();
            format!("{cut}...")
        } else {
            first_line.to_string()
        }
    }

    fn render_details(&self, with_exception: bool) -> String {
        let mut body = String::new();

        if let Some(description) = &self.description {
            let _ = writeln!(body, "{}\n", description.trim());
        }

        let _ = writeln!(body, "| Key | Value |");
        let _ = writeln!(body, "| --- | --- |");
        let version = if self.app_version.is_empty() {
            "unknown"
        } else {
            &self.app_version
        };
        let _ = writeln!(body, "| Version | {version} |");
        let _ = writeln!(
            body,
            "| OS | {} ({}) |",
            self.environment.os, self.environment.arch
        );
        if let Some(action) = &self.last_action {
            let _ = writeln!(body, "| Last action | {} |", action.trim());
        }
        let _ = writeln!(body, "| Captured at | {} |", self.captured_at.to_rfc3339());

        let _ = write!(body, "\n**Message:** {}\n", self.message.trim());

        if with_exception && !self.stack_trace.trim().is_empty() {
            let _ = write!(
                body,
                "\n**Exception:**\n```\n{}\n```\n",
                self.stack_trace.trim_end()
            );
        }

        body
    }
}

/// Strip trailing whitespace per line and drop blank lines
fn normalize_trace(trace: &str) -> String {
    trace
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
