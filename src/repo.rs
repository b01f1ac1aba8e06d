//! Git repository remote discovery
//!
//! Used as the last configuration fallback: when no tracker repository is
//! configured, issues go to the repository the user is working in.

use crate::error::{Error, Result};
use crate::types::GitRemote;
use gix::remote::Direction;
use std::path::Path;
use tracing::debug;

/// List the fetch remotes of the git repository containing `path`
pub fn git_remotes(path: &Path) -> Result<Vec<GitRemote>> {
    let repo = gix::discover(path).map_err(|e| Error::Git(e.to_string()))?;

    let mut remotes = Vec::new();
    for name in repo.remote_names() {
        let remote = repo
            .find_remote(&*name)
            .map_err(|e| Error::Git(e.to_string()))?;

        if let Some(url) = remote.url(Direction::Fetch) {
            remotes.push(GitRemote {
                name: name.to_string(),
                url: url.to_bstring().to_string(),
            });
        }
    }

    debug!(count = remotes.len(), "discovered git remotes");
    Ok(remotes)
}

/// Pick the remote issues should go to
///
/// `origin` if present, otherwise the first remote.
pub fn select_remote(remotes: &[GitRemote]) -> Option<&GitRemote> {
    remotes
        .iter()
        .find(|r| r.name == "origin")
        .or_else(|| remotes.first())
}
