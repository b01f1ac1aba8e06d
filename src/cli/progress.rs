//! Spinner progress for tracker calls

use crate::cli::style::spinner_style;
use async_trait::async_trait;
use gh_feedback::submit::{Phase, ProgressCallback};
use indicatif::ProgressBar;
use std::time::Duration;

/// Spinner that shows the current submission phase on stderr
///
/// Hidden when stderr is not a terminal (indicatif's default draw target).
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    /// Start a spinner mentioning the target repository
    pub fn start(repository: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message(format!("Contacting {repository}..."));
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }
}

#[async_trait]
impl ProgressCallback for SpinnerProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Complete => self.bar.finish_and_clear(),
            _ => self.bar.set_message(format!("{phase}...")),
        }
    }
}
