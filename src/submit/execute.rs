//! Submission decision and execution
//!
//! Every tracker call can fail; any failure ends the submission with a
//! [`SubmissionOutcome::failed`] outcome. The cause is logged, never returned.

use crate::error::Result;
use crate::platform::IssueService;
use crate::submit::marker::fixed_version;
use crate::submit::{NoopProgress, Phase, ProgressCallback, SubmissionOutcome};
use crate::types::{CreatedIssue, ErrorReport, ExistingIssue, NewIssue};
use crate::version::VersionOracle;
use tracing::{debug, info, warn};

/// Submit a captured error report
///
/// - no matching issue: create one
/// - matching issue without a fixed marker: comment on it
/// - matching issue fixed in a newer version: tell the user to update
/// - matching issue fixed in the running version or earlier: create a new
///   issue and cross-reference the old one from it
pub async fn submit_feedback(
    versions: &dyn VersionOracle,
    issues: &dyn IssueService,
    report: &ErrorReport,
) -> SubmissionOutcome {
    submit_feedback_with_progress(versions, issues, report, &NoopProgress).await
}

/// [`submit_feedback`] with progress updates
pub async fn submit_feedback_with_progress(
    versions: &dyn VersionOracle,
    issues: &dyn IssueService,
    report: &ErrorReport,
    progress: &dyn ProgressCallback,
) -> SubmissionOutcome {
    let outcome = match decide(versions, issues, report, progress).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(error = %e, title = %report.issue_title, "feedback submission failed");
            SubmissionOutcome::failed()
        }
    };

    progress.on_phase(Phase::Complete).await;
    outcome
}

async fn decide(
    versions: &dyn VersionOracle,
    issues: &dyn IssueService,
    report: &ErrorReport,
    progress: &dyn ProgressCallback,
) -> Result<SubmissionOutcome> {
    progress.on_phase(Phase::LookingUp).await;
    let existing = issues
        .find_auto_generated_issue_by_title(&report.issue_title)
        .await?;

    let Some(existing) = existing else {
        debug!(title = %report.issue_title, "no existing issue");
        let created = create_issue(issues, report, progress).await?;
        return Ok(SubmissionOutcome::new_issue(&created));
    };

    match fixed_version(&existing.body) {
        Some(version) if versions.running_version_is_older_than(version) => {
            info!(issue = existing.number, %version, "error already fixed in a newer version");
            Ok(SubmissionOutcome::already_fixed(&existing, version))
        }
        Some(version) => {
            info!(
                issue = existing.number,
                %version,
                "error fixed in an older version recurred, reporting it again"
            );
            let created = create_issue(issues, report, progress).await?;
            link_to_original(issues, &created, &existing, progress).await?;
            Ok(SubmissionOutcome::new_issue(&created))
        }
        None => {
            info!(issue = existing.number, "error already reported, adding comment");
            progress.on_phase(Phase::Commenting).await;
            issues
                .add_comment(existing.number, &report.issue_details_without_exception)
                .await?;
            Ok(SubmissionOutcome::already_reported(&existing))
        }
    }
}

async fn create_issue(
    issues: &dyn IssueService,
    report: &ErrorReport,
    progress: &dyn ProgressCallback,
) -> Result<CreatedIssue> {
    progress.on_phase(Phase::CreatingIssue).await;
    let created = issues.submit_issue(&NewIssue::from_report(report)).await?;
    debug!(issue = created.number, url = %created.html_url, "created issue");
    Ok(created)
}

/// Comment on the new issue pointing back at the original one
async fn link_to_original(
    issues: &dyn IssueService,
    created: &CreatedIssue,
    original: &ExistingIssue,
    progress: &dyn ProgressCallback,
) -> Result<()> {
    progress.on_phase(Phase::Commenting).await;
    issues
        .add_comment(created.number, &format!("The same as in #{}.", original.number))
        .await
}
