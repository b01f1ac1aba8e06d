//! Auth command - test and explain tracker authentication

use anstream::println;
use gh_feedback::auth::{
    TOKEN_OVERRIDE_VAR, get_github_auth, get_gitlab_auth, test_github_auth, test_gitlab_auth,
};
use gh_feedback::error::Result;
use gh_feedback::types::Platform;

use crate::cli::style::{Role, Stylize, mark};

/// Auth subcommand action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Verify the discovered token
    Test,
    /// Print setup instructions
    Setup,
}

/// Run an auth command
pub async fn run_auth(platform: Platform, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Test => run_auth_test(platform).await,
        AuthAction::Setup => {
            print_setup(platform);
            Ok(())
        }
    }
}

async fn run_auth_test(platform: Platform) -> Result<()> {
    match platform {
        Platform::GitHub => {
            println!("{}", "Testing GitHub authentication...".muted());
            let config = get_github_auth().await?;
            let username = test_github_auth(&config).await?;
            println!("{} Authenticated as {}", mark(Role::Success), username.accent());
            println!("  Token source: {:?}", config.source);
        }
        Platform::GitLab => {
            println!("{}", "Testing GitLab authentication...".muted());
            let config = get_gitlab_auth(None).await?;
            let username = test_gitlab_auth(&config).await?;
            println!("{} Authenticated as {}", mark(Role::Success), username.accent());
            println!("  Token source: {:?}", config.source);
            println!("  Host: {}", config.host);
        }
    }
    Ok(())
}

fn print_setup(platform: Platform) {
    let (name, cli, cli_url, login, env_vars, host_var) = match platform {
        Platform::GitHub => (
            "GitHub",
            "GitHub CLI",
            "https://cli.github.com/",
            "gh auth login",
            "GITHUB_TOKEN or GH_TOKEN",
            "GH_HOST",
        ),
        Platform::GitLab => (
            "GitLab",
            "GitLab CLI (glab)",
            "https://gitlab.com/gitlab-org/cli",
            "glab auth login",
            "GITLAB_TOKEN or GL_TOKEN",
            "GITLAB_HOST",
        ),
    };

    println!("{}", format!("{name} Authentication Setup").emphasis());
    println!();
    println!("Option 1: {TOKEN_OVERRIDE_VAR}");
    println!("  A token dedicated to feedback reports; used before anything else");
    println!();
    println!("Option 2: {cli}");
    println!("  Install: {}", cli_url.accent());
    println!("  Run: {}", login.accent());
    println!();
    println!("Option 3: Environment variable");
    println!("  Set {env_vars}");
    println!();
    println!("The token needs permission to read and create issues and comments.");
    println!("For self-hosted instances, set {host_var} to your instance hostname.");
}
