//! CLI commands
//!
//! Command implementations for the `gh-feedback` binary.

mod auth;
mod progress;
mod report;
pub mod style;

pub use auth::{AuthAction, run_auth};
pub use report::{ReportArgs, run_report};
