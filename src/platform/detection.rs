//! Tracker detection from repository URLs

use crate::error::{Error, Result};
use crate::types::{Platform, PlatformConfig};
use regex::Regex;
use std::env;
use std::sync::LazyLock;

/// `git@host:owner/repo(.git)`
static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@([^:/]+):(.+?)(?:\.git)?/?$").expect("hardcoded regex is valid")
});

/// Bare `owner/repo` shorthand, resolved against github.com
static SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w.-]+)/([\w.-]+)$").expect("hardcoded regex is valid")
});

/// `github.com`, `gitlab.com` or one of their subdomains (`www.github.com`)
fn public_platform(hostname: &str) -> Option<Platform> {
    let on = |base: &str| hostname == base || hostname.ends_with(&format!(".{base}"));

    if on("github.com") {
        Some(Platform::GitHub)
    } else if on("gitlab.com") {
        Some(Platform::GitLab)
    } else {
        None
    }
}

/// Detect platform (GitHub or GitLab) from a hostname
pub fn detect_platform(hostname: &str) -> Option<Platform> {
    public_platform(hostname).or_else(|| {
        if env::var("GH_HOST").is_ok_and(|h| h == hostname) {
            Some(Platform::GitHub)
        } else if env::var("GITLAB_HOST").is_ok_and(|h| h == hostname) {
            Some(Platform::GitLab)
        } else {
            None
        }
    })
}

/// Parse the target repository from a remote URL or `owner/repo` shorthand
///
/// Accepted forms:
/// - `owner/repo` (github.com)
/// - `git@host:owner/repo.git`
/// - `https://host/owner/repo(.git)` and `ssh://git@host/owner/repo.git`
pub fn parse_repo_info(input: &str) -> Result<PlatformConfig> {
    let input = input.trim();

    let (hostname, path) = if let Some(caps) = SHORTHAND.captures(input) {
        ("github.com".to_string(), format!("{}/{}", &caps[1], &caps[2]))
    } else if let Some(caps) = SCP_LIKE.captures(input) {
        (caps[1].to_string(), caps[2].to_string())
    } else {
        let url = url::Url::parse(input)
            .map_err(|e| Error::Parse(format!("cannot parse repository URL {input}: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::Parse(format!("repository URL has no host: {input}")))?;
        let path = url.path().trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        (host.to_string(), path.to_string())
    };

    let platform = detect_platform(&hostname).ok_or(Error::NoSupportedRemotes)?;

    // GitLab supports nested groups, so everything but the last segment is the owner
    let Some((owner, repo)) = path.rsplit_once('/') else {
        return Err(Error::Parse(format!("invalid repo path: {path}")));
    };
    if owner.is_empty() || repo.is_empty() {
        return Err(Error::Parse(format!("invalid repo path: {path}")));
    }

    // Subdomains of the public hosts still use the public API
    let host = public_platform(&hostname).is_none().then_some(hostname);

    Ok(PlatformConfig {
        platform,
        owner: owner.to_string(),
        repo: repo.to_string(),
        host,
    })
}
