//! Layered configuration
//!
//! Resolution order, highest first:
//! 1. command-line flags
//! 2. environment (`GH_FEEDBACK_REPO`, `GH_FEEDBACK_APP_VERSION`)
//! 3. config file (`<config dir>/gh-feedback/config.toml`)
//! 4. the `origin` remote of the git repository in the working directory
//!
//! The running version falls back to this binary's own version.

use crate::error::{Error, Result};
use crate::platform::parse_repo_info;
use crate::repo::{git_remotes, select_remote};
use crate::types::PlatformConfig;
use crate::version::RunningVersion;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the tracker repository
pub const REPO_ENV_VAR: &str = "GH_FEEDBACK_REPO";

/// Environment variable naming the running version
pub const APP_VERSION_ENV_VAR: &str = "GH_FEEDBACK_APP_VERSION";

/// Contents of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Tracker repository URL or `owner/repo`
    pub repository: Option<String>,
    /// Running version to compare fixed markers against
    pub app_version: Option<String>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--repo`
    pub repository: Option<String>,
    /// `--app-version`
    pub app_version: Option<String>,
}

/// Where the tracker repository came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
    /// `--repo` flag
    Flag,
    /// `GH_FEEDBACK_REPO`
    Env,
    /// Config file
    File(PathBuf),
    /// Git remote of the working directory, by remote name
    GitRemote(String),
}

impl fmt::Display for RepoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "--repo"),
            Self::Env => write!(f, "{REPO_ENV_VAR}"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::GitRemote(name) => write!(f, "git remote '{name}'"),
        }
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone)]
pub struct Settings {
    /// Tracker repository
    pub platform: PlatformConfig,
    /// Where the repository setting came from
    pub repo_source: RepoSource,
    /// Running version of the software that failed
    pub app_version: String,
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gh-feedback").join("config.toml"))
}

/// Load a config file; a missing file yields the empty config
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    match fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Resolve settings from all layers
///
/// `config_path` is the file `file` was loaded from, used for reporting.
pub fn resolve_settings(
    overrides: &Overrides,
    file: &FileConfig,
    config_path: Option<&Path>,
    cwd: &Path,
) -> Result<Settings> {
    let env_repo = env::var(REPO_ENV_VAR).ok().filter(|v| !v.trim().is_empty());

    let (repository, repo_source) = if let Some(repo) = &overrides.repository {
        (repo.clone(), RepoSource::Flag)
    } else if let Some(repo) = env_repo {
        (repo, RepoSource::Env)
    } else if let Some(repo) = &file.repository {
        let path = config_path.map(Path::to_path_buf).unwrap_or_default();
        (repo.clone(), RepoSource::File(path))
    } else {
        let remotes = git_remotes(cwd).map_err(|e| {
            Error::Config(format!(
                "no tracker repository configured (use --repo or {REPO_ENV_VAR}) and {e}"
            ))
        })?;
        let remote = select_remote(&remotes).ok_or_else(|| {
            Error::Config(format!(
                "no tracker repository configured (use --repo or {REPO_ENV_VAR}) and the git repository has no remotes"
            ))
        })?;
        (remote.url.clone(), RepoSource::GitRemote(remote.name.clone()))
    };

    let platform = parse_repo_info(&repository)?;

    Ok(Settings {
        platform,
        repo_source,
        app_version: resolve_app_version(overrides, file),
    })
}

/// Resolve the running version alone (no tracker repository needed)
pub fn resolve_app_version(overrides: &Overrides, file: &FileConfig) -> String {
    overrides
        .app_version
        .clone()
        .or_else(|| {
            env::var(APP_VERSION_ENV_VAR)
                .ok()
                .filter(|v| !v.trim().is_empty())
        })
        .or_else(|| file.app_version.clone())
        .unwrap_or_else(|| RunningVersion::of_this_crate().as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Platform;
    use serial_test::serial;
    use tempfile::TempDir;

    // SAFETY: tests touching the environment are serialized
    #[allow(unsafe_code)]
    fn set_env(var: &str, value: Option<&str>) {
        unsafe {
            match value {
                Some(v) => env::set_var(var, v),
                None => env::remove_var(var),
            }
        }
    }

    fn clear_env() {
        set_env(REPO_ENV_VAR, None);
        set_env(APP_VERSION_ENV_VAR, None);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = load_file_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "repository = \"https://gitlab.com/team/plugin\"\napp_version = \"1.2.0\"\n",
        )
        .unwrap();

        let config = load_file_config(&path).unwrap();
        assert_eq!(
            config.repository.as_deref(),
            Some("https://gitlab.com/team/plugin")
        );
        assert_eq!(config.app_version.as_deref(), Some("1.2.0"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "repo = \"owner/repo\"\n").unwrap();

        assert!(matches!(load_file_config(&path), Err(Error::Config(_))));
    }

    #[test]
    #[serial]
    fn test_flag_beats_env_and_file() {
        clear_env();
        set_env(REPO_ENV_VAR, Some("env/repo"));

        let dir = TempDir::new().unwrap();
        let file = FileConfig {
            repository: Some("file/repo".into()),
            app_version: Some("1.0.0".into()),
        };
        let overrides = Overrides {
            repository: Some("flag/repo".into()),
            app_version: None,
        };

        let settings = resolve_settings(&overrides, &file, None, dir.path()).unwrap();
        assert_eq!(settings.repo_source, RepoSource::Flag);
        assert_eq!(settings.platform.owner, "flag");
        assert_eq!(settings.app_version, "1.0.0");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_beats_file() {
        clear_env();
        set_env(REPO_ENV_VAR, Some("git@gitlab.com:env/repo.git"));
        set_env(APP_VERSION_ENV_VAR, Some("3.1.4"));

        let dir = TempDir::new().unwrap();
        let file = FileConfig {
            repository: Some("file/repo".into()),
            app_version: Some("1.0.0".into()),
        };

        let settings = resolve_settings(&Overrides::default(), &file, None, dir.path()).unwrap();
        assert_eq!(settings.repo_source, RepoSource::Env);
        assert_eq!(settings.platform.platform, Platform::GitLab);
        assert_eq!(settings.app_version, "3.1.4");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_file_source_and_default_version() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let file = FileConfig {
            repository: Some("owner/repo".into()),
            app_version: None,
        };

        let settings =
            resolve_settings(&Overrides::default(), &file, Some(&path), dir.path()).unwrap();
        assert_eq!(settings.repo_source, RepoSource::File(path));
        assert_eq!(settings.app_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    #[serial]
    fn test_nothing_configured_outside_git() {
        clear_env();
        let dir = TempDir::new().unwrap();

        let result =
            resolve_settings(&Overrides::default(), &FileConfig::default(), None, dir.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
