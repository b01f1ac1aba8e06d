//! gh-feedback - deduplicated issue reports for captured errors
//!
//! CLI binary that submits an error report to GitHub or GitLab.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gh_feedback::config::Overrides;
use gh_feedback::submit::SubmissionStatus;
use gh_feedback::types::Platform;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "gh-feedback")]
#[command(about = "Report captured errors as deduplicated GitHub/GitLab issues")]
#[command(version)]
struct Cli {
    /// Show debug logs on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an error report
    Report {
        /// Error message
        #[arg(short, long)]
        message: String,

        /// File containing the stack trace ("-" reads stdin)
        #[arg(long, value_name = "FILE")]
        stack_trace: Option<PathBuf>,

        /// What you were doing when the error happened
        #[arg(short, long)]
        description: Option<String>,

        /// Last action performed before the error
        #[arg(long)]
        last_action: Option<String>,

        /// Version of the software that failed
        #[arg(long)]
        app_version: Option<String>,

        /// Tracker repository (URL or owner/repo)
        #[arg(long)]
        repo: Option<String>,

        /// Config file (defaults to <config dir>/gh-feedback/config.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the report without contacting the tracker
        #[arg(long)]
        dry_run: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        platform: AuthPlatform,
    },
}

#[derive(Subcommand)]
enum AuthPlatform {
    /// GitHub authentication
    Github {
        #[command(subcommand)]
        action: AuthActionArg,
    },
    /// GitLab authentication
    Gitlab {
        #[command(subcommand)]
        action: AuthActionArg,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum AuthActionArg {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

impl From<AuthActionArg> for cli::AuthAction {
    fn from(action: AuthActionArg) -> Self {
        match action {
            AuthActionArg::Test => Self::Test,
            AuthActionArg::Setup => Self::Setup,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "gh_feedback=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Report {
            message,
            stack_trace,
            description,
            last_action,
            app_version,
            repo,
            config,
            dry_run,
            json,
        } => {
            let args = cli::ReportArgs {
                message,
                stack_trace,
                description,
                last_action,
                config,
                overrides: Overrides {
                    repository: repo,
                    app_version,
                },
                dry_run,
                json,
            };
            let cwd = std::env::current_dir()?;
            let status = cli::run_report(args, &cwd).await?;
            if status == Some(SubmissionStatus::Failed) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Auth { platform } => match platform {
            AuthPlatform::Github { action } => {
                cli::run_auth(Platform::GitHub, action.into()).await?;
            }
            AuthPlatform::Gitlab { action } => {
                cli::run_auth(Platform::GitLab, action.into()).await?;
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
