//! Progress callback trait for interface-agnostic updates
//!
//! Lets a host (CLI spinner, IDE status bar) follow the tracker calls a
//! submission makes.

use async_trait::async_trait;

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Looking for an existing auto-generated issue
    LookingUp,
    /// Creating a new issue
    CreatingIssue,
    /// Commenting on an issue
    Commenting,
    /// Submission finished (successfully or not)
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LookingUp => write!(f, "Looking for existing issues"),
            Self::CreatingIssue => write!(f, "Creating issue"),
            Self::Commenting => write!(f, "Adding comment"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Progress callback trait
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
}
