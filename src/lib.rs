//! gh-feedback - deduplicated issue reporting for captured errors
//!
//! Given a captured error report, decides whether to open a new tracker
//! issue, comment on an existing open one, or tell the user the defect is
//! already fixed in a newer release.

pub mod auth;
pub mod config;
pub mod error;
pub mod platform;
pub mod repo;
pub mod report;
pub mod submit;
pub mod types;
pub mod version;
