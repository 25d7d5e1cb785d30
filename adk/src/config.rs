//! Settings loading and per-invocation install configuration.
//!
//! Settings are stored in TOML and provide defaults for:
//! - the upstream repository and branch to pull components from
//! - the target platform to install for
//! - the code-hosting host and an optional download timeout
//!
//! Command-line flags override whatever the settings file says.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::platform::TargetPlatform;

/// Name of the settings file, both in the project and in the config directory.
pub const SETTINGS_FILE: &str = "adk.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    ValidationError(String),

    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),
}

/// Contents of an `adk.toml` settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Upstream repository as `owner/name`.
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Branch to pull components from.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Platform to install components for.
    #[serde(default)]
    pub target: TargetPlatform,

    /// Code-hosting host serving branch archives.
    #[serde(default = "default_host")]
    pub host: String,

    /// Optional download timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_repo() -> String {
    "LukasLeindals/agentic-dev-kit".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_host() -> String {
    "https://github.com".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            branch: default_branch(),
            target: TargetPlatform::default(),
            host: default_host(),
            timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load settings from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Find and load the settings file.
    ///
    /// Order: the explicit path (which must exist), `adk.toml` in
    /// `project_dir`, then `adk.toml` in the XDG config directory. Falls back
    /// to defaults when none exists.
    pub fn discover(explicit: Option<&Path>, project_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::PathNotFound(path.to_path_buf()));
            }
            return Self::load(path);
        }

        let local = project_dir.join(SETTINGS_FILE);
        if local.exists() {
            debug!(path = %local.display(), "loading settings");
            return Self::load(&local);
        }

        if let Some(dirs) = directories::ProjectDirs::from("dev", "agentic-dev-kit", "adk") {
            let xdg = dirs.config_dir().join(SETTINGS_FILE);
            if xdg.exists() {
                debug!(path = %xdg.display(), "loading settings");
                return Self::load(&xdg);
            }
        }

        Ok(Self::default())
    }

    /// Validate the settings (pure function).
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_repo(&self.repo)?;
        if self.branch.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "branch must not be empty".to_string(),
            ));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "host must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Download timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Apply command-line overrides and produce the install configuration.
    pub fn install_config(
        &self,
        repo: Option<String>,
        branch: Option<String>,
        target: Option<TargetPlatform>,
    ) -> Result<InstallConfig, ConfigError> {
        let config = InstallConfig {
            repo: repo.unwrap_or_else(|| self.repo.clone()),
            branch: branch.unwrap_or_else(|| self.branch.clone()),
            target: target.unwrap_or(self.target),
        };
        validate_repo(&config.repo)?;
        if config.branch.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "branch must not be empty".to_string(),
            ));
        }
        Ok(config)
    }
}

/// Check that `repo` looks like `owner/name`.
fn validate_repo(repo: &str) -> Result<(), ConfigError> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(ConfigError::ValidationError(format!(
            "repo '{repo}' must have the form owner/name"
        ))),
    }
}

/// Where to pull components from and what to install them for.
///
/// Supplied once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    pub repo: String,
    pub branch: String,
    pub target: TargetPlatform,
}
