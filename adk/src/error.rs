//! Error types for component operations.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while resolving, fetching, or installing components.
#[derive(Debug, Error)]
pub enum AdkError {
    /// Reference string is malformed or names an unsafe path
    #[error("Invalid ref '{reference}'. {reason}")]
    InvalidReference { reference: String, reason: String },

    /// Reference uses a kind outside the known set
    #[error("Unknown component kind '{kind}'. Valid kinds: tool, skill, agent, command")]
    UnknownKind { kind: String },

    /// Snapshot download failed (transport error or HTTP error status)
    #[error("Failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Downloaded bytes are not a readable archive
    #[error("Snapshot from {url} is not a valid archive: {source}")]
    InvalidArchive {
        url: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// A single archive entry could not be opened
    #[error("Failed to read archive entry '{entry}': {source}")]
    Archive {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// The resolved remote path has no match in the snapshot
    #[error("Component path '{path}' not found in repository")]
    ComponentNotFound { path: String },

    /// Archive entry would escape the destination directory
    #[error("Refusing to extract unsafe archive entry '{entry}'")]
    UnsafeEntry { entry: String },

    /// Destination already exists on add
    #[error("{} already exists. Use 'adk update {reference}' to re-download.", .path.display())]
    AlreadyExists { path: PathBuf, reference: String },

    /// Destination is missing on update or remove
    #[error("{} does not exist. {hint}", .path.display())]
    NotInstalled { path: PathBuf, hint: String },

    /// Filesystem operation failed
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    /// Settings file could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Confirmation prompt could not be shown or answered
    #[error("Failed to read confirmation: {source}")]
    Prompt {
        #[source]
        source: dialoguer::Error,
    },
}

impl AdkError {
    /// Build a closure that wraps an [`std::io::Error`] with the path it concerns.
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Io { path, source }
    }
}

/// Result type for component operations.
pub type Result<T> = std::result::Result<T, AdkError>;
