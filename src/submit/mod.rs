//! Feedback submission engine
//!
//! Decides what to do with a captured error report:
//! 1. Lookup - find an auto-generated issue with the same title
//! 2. Decide - new issue, comment on the open one, or already fixed
//! 3. Outcome - a terminal status and message for the host to render

mod execute;
mod marker;
mod outcome;
mod progress;

pub use execute::{submit_feedback, submit_feedback_with_progress};
pub use marker::{FIXED_MARKER_PREFIX, fixed_version};
pub use outcome::{COMMUNICATION_FAILURE_MESSAGE, SubmissionOutcome, SubmissionStatus};
pub use progress::{NoopProgress, Phase, ProgressCallback};
