//! Add, update, and remove components in a project.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::component::ComponentReference;
use crate::config::InstallConfig;
use crate::error::{AdkError, Result};
use crate::extract::extract;
use crate::resolve::{local_destination_path, remove_local};
use crate::snapshot::SnapshotSource;

/// Lifecycle operation performed on a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
    Add,
    Update,
    Remove,
}

impl fmt::Display for InstallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Update => write!(f, "update"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Outcome of a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    pub action: InstallAction,
    pub reference: ComponentReference,
    pub destination: PathBuf,
    pub files_written: usize,
    pub dry_run: bool,
}

/// Installer for components of one upstream repository.
///
/// There is no installed-state bookkeeping: a component is installed exactly
/// when its destination path exists.
#[derive(Debug, Clone)]
pub struct Installer<S> {
    source: S,
    config: InstallConfig,
    project_root: PathBuf,
    dry_run: bool,
}

impl<S: SnapshotSource> Installer<S> {
    /// Create an installer rooted at the current directory.
    pub fn new(source: S, config: InstallConfig) -> Self {
        Self {
            source,
            config,
            project_root: PathBuf::from("."),
            dry_run: false,
        }
    }

    /// Install relative to `root` instead of the current directory.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    /// Check preconditions only; never fetch, delete, or write.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Local path where `reference` is (or would be) installed.
    pub fn destination(&self, reference: &ComponentReference) -> PathBuf {
        self.project_root
            .join(local_destination_path(self.config.target, reference))
    }

    /// Install a component that is not installed yet.
    ///
    /// # Errors
    ///
    /// Returns [`AdkError::AlreadyExists`] without fetching if the destination
    /// exists, otherwise any fetch or extraction error.
    pub async fn add(&self, reference: &ComponentReference) -> Result<InstallResult> {
        let dest = self.destination(reference);
        if dest.exists() {
            return Err(AdkError::AlreadyExists {
                path: dest,
                reference: reference.to_string(),
            });
        }

        if self.dry_run {
            return Ok(self.result(InstallAction::Add, reference, dest, 0));
        }

        let mut archive = self
            .source
            .fetch(&self.config.repo, &self.config.branch)
            .await?;
        let files_written = extract(&mut archive, reference, &dest)?;

        info!(%reference, path = %dest.display(), files_written, "component added");
        Ok(self.result(InstallAction::Add, reference, dest, files_written))
    }

    /// Replace an installed component with a fresh copy.
    ///
    /// The snapshot is fetched before anything is deleted, so a failed
    /// download leaves the installed copy untouched. The old copy is fully
    /// removed before extraction starts.
    ///
    /// # Errors
    ///
    /// Returns [`AdkError::NotInstalled`] if the destination does not exist,
    /// otherwise any fetch, removal, or extraction error.
    pub async fn update(&self, reference: &ComponentReference) -> Result<InstallResult> {
        let dest = self.destination(reference);
        if !dest.exists() {
            return Err(AdkError::NotInstalled {
                hint: format!("Use 'adk add {reference}' first."),
                path: dest,
            });
        }

        if self.dry_run {
            return Ok(self.result(InstallAction::Update, reference, dest, 0));
        }

        let mut archive = self
            .source
            .fetch(&self.config.repo, &self.config.branch)
            .await?;
        remove_local(&dest)?;
        let files_written = extract(&mut archive, reference, &dest)?;

        info!(%reference, path = %dest.display(), files_written, "component updated");
        Ok(self.result(InstallAction::Update, reference, dest, files_written))
    }

    /// Delete an installed component.
    ///
    /// # Errors
    ///
    /// Returns [`AdkError::NotInstalled`] if the destination does not exist,
    /// or [`AdkError::Io`] if deletion fails.
    pub fn remove(&self, reference: &ComponentReference) -> Result<InstallResult> {
        let dest = self.destination(reference);
        if !dest.exists() {
            return Err(AdkError::NotInstalled {
                hint: "Nothing to remove.".to_string(),
                path: dest,
            });
        }

        if !self.dry_run {
            remove_local(&dest)?;
            info!(%reference, path = %dest.display(), "component removed");
        }
        Ok(self.result(InstallAction::Remove, reference, dest, 0))
    }

    /// Whether `reference` is currently installed.
    pub fn is_installed(&self, reference: &ComponentReference) -> bool {
        self.destination(reference).exists()
    }

    fn result(
        &self,
        action: InstallAction,
        reference: &ComponentReference,
        destination: PathBuf,
        files_written: usize,
    ) -> InstallResult {
        InstallResult {
            action,
            reference: reference.clone(),
            destination,
            files_written,
            dry_run: self.dry_run,
        }
    }
}

impl InstallResult {
    /// Destination relative to `root`, for display.
    pub fn display_path(&self, root: &Path) -> PathBuf {
        self.destination
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.destination.clone())
    }
}
