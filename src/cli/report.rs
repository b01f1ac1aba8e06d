//! Report command - submit a captured error as feedback

use crate::cli::progress::SpinnerProgress;
use crate::cli::style::{Role, Stream, Stylize, hyperlink, mark};
use anstream::{eprintln, println};
use gh_feedback::config::{
    FileConfig, Overrides, default_config_path, load_file_config, resolve_app_version,
    resolve_settings,
};
use gh_feedback::error::{Error, Result};
use gh_feedback::platform::create_issue_service;
use gh_feedback::report::CapturedError;
use gh_feedback::submit::{
    NoopProgress, ProgressCallback, SubmissionOutcome, SubmissionStatus,
    submit_feedback_with_progress,
};
use gh_feedback::version::RunningVersion;
use regex::Regex;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="([^"]*)">([^<]*)</a>"#).expect("hardcoded regex is valid")
});

/// Arguments of the report command
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    /// Error message
    pub message: String,
    /// Stack trace file, `-` for stdin
    pub stack_trace: Option<PathBuf>,
    /// What the user was doing
    pub description: Option<String>,
    /// Last user action
    pub last_action: Option<String>,
    /// Config file override
    pub config: Option<PathBuf>,
    /// Flag overrides
    pub overrides: Overrides,
    /// Print the report without contacting the tracker
    pub dry_run: bool,
    /// Print the outcome as JSON
    pub json: bool,
}

/// Run the report command
///
/// Returns the submission status, or `None` for a dry run.
pub async fn run_report(args: ReportArgs, cwd: &Path) -> Result<Option<SubmissionStatus>> {
    let config_path = args.config.clone().or_else(default_config_path);
    let file = match &config_path {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };

    let trace_from_stdin = args.stack_trace.as_deref() == Some(Path::new("-"));
    let stack_trace = read_stack_trace(args.stack_trace.as_deref())?;

    let description = if args.description.is_none()
        && !args.dry_run
        && !args.json
        && !trace_from_stdin
        && std::io::stdin().is_terminal()
    {
        prompt_description()?
    } else {
        args.description.clone()
    };

    if args.dry_run {
        let error = CapturedError::new(&args.message, stack_trace)
            .with_app_version(resolve_app_version(&args.overrides, &file))
            .with_description(description)
            .with_last_action(args.last_action.clone());
        print_dry_run(&error);
        return Ok(None);
    }

    let settings = resolve_settings(&args.overrides, &file, config_path.as_deref(), cwd)?;
    let repository = format!("{}/{}", settings.platform.owner, settings.platform.repo);
    debug!(%repository, source = %settings.repo_source, version = %settings.app_version, "resolved settings");

    let error = CapturedError::new(&args.message, stack_trace)
        .with_app_version(&settings.app_version)
        .with_description(description)
        .with_last_action(args.last_action.clone());
    let report = error.to_report();

    let issues = create_issue_service(&settings.platform).await?;
    let versions = RunningVersion::new(&settings.app_version);

    let progress: Box<dyn ProgressCallback> = if args.json {
        Box::new(NoopProgress)
    } else {
        Box::new(SpinnerProgress::start(&repository))
    };
    let outcome =
        submit_feedback_with_progress(&versions, issues.as_ref(), &report, progress.as_ref())
            .await;

    if args.json {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| Error::Internal(format!("failed to serialize outcome: {e}")))?;
        println!("{json}");
    } else {
        print_outcome(&outcome);
    }

    Ok(Some(outcome.status()))
}

fn read_stack_trace(source: Option<&Path>) -> Result<String> {
    match source {
        None => Ok(String::new()),
        Some(path) if path == Path::new("-") => {
            let mut trace = String::new();
            std::io::stdin().read_to_string(&mut trace)?;
            Ok(trace)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn prompt_description() -> Result<Option<String>> {
    let input: String = dialoguer::Input::new()
        .with_prompt("What were you doing when the error happened? (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| Error::Internal(format!("prompt failed: {e}")))?;

    Ok(Some(input).filter(|d| !d.trim().is_empty()))
}

fn print_dry_run(error: &CapturedError) {
    let report = error.to_report();

    println!("{}", "Dry run - the tracker will not be contacted".muted());
    println!();
    println!("{} {}", "Title:".emphasis(), report.issue_title.accent());
    println!();
    println!("{}", "Body for a new issue:".emphasis());
    println!("{}", report.issue_details);
    println!("{}", "Comment for an open duplicate:".emphasis());
    println!("{}", report.issue_details_without_exception);
}

fn print_outcome(outcome: &SubmissionOutcome) {
    let text = render_link_text(outcome.link_text(), Stream::Stdout);

    match outcome.status() {
        SubmissionStatus::NewIssue => println!("{} {}", mark(Role::Success), text.success()),
        SubmissionStatus::Duplicate => println!("{} {}", mark(Role::Warn), text.warn()),
        SubmissionStatus::Failed => {
            eprintln!("{} {}", mark(Role::Error), text.error());
            eprintln!(
                "{}",
                "Run with -v for details, or `gh-feedback auth <platform> test`".muted()
            );
        }
    }
}

/// Turn the HTML-ish outcome text into terminal text
///
/// Anchors become hyperlinks and `<br>` becomes a line break.
pub fn render_link_text(text: &str, stream: Stream) -> String {
    ANCHOR
        .replace_all(text, |caps: &regex::Captures<'_>| {
            hyperlink(stream, &caps[2], &caps[1])
        })
        .replace("<br>", "\n  ")
}
