//! Snapshot download from a code-hosting provider.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::{SnapshotArchive, ZipSnapshot};
use crate::error::{AdkError, Result};

/// Source of repository snapshots.
///
/// The installer only talks to this trait, so tests can hand it archives
/// built in memory instead of going over the network.
pub trait SnapshotSource {
    /// Archive type produced by this source.
    type Archive: SnapshotArchive;

    /// Retrieve the full snapshot of `repo` at `branch`.
    ///
    /// A failure is terminal; there is no retry at this layer.
    fn fetch(&self, repo: &str, branch: &str) -> impl Future<Output = Result<Self::Archive>>;
}

/// Downloads branch archives over HTTP(S), GitHub style.
///
/// The snapshot for `owner/name` at `main` lives at
/// `<host>/owner/name/archive/refs/heads/main.zip`.
#[derive(Debug, Clone)]
pub struct GithubSnapshotSource {
    client: reqwest::Client,
    host: String,
}

impl GithubSnapshotSource {
    /// Default code-hosting host.
    pub const DEFAULT_HOST: &'static str = "https://github.com";

    /// Create a source for `host` with an optional request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AdkError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(host: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("adk/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| AdkError::HttpClient { source })?;

        Ok(Self::with_client(client, host))
    }

    /// Create a source that uses an already configured client.
    pub fn with_client(client: reqwest::Client, host: impl Into<String>) -> Self {
        Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL of the branch archive for `repo`.
    pub fn snapshot_url(&self, repo: &str, branch: &str) -> String {
        format!("{}/{repo}/archive/refs/heads/{branch}.zip", self.host)
    }
}

impl SnapshotSource for GithubSnapshotSource {
    type Archive = ZipSnapshot;

    async fn fetch(&self, repo: &str, branch: &str) -> Result<ZipSnapshot> {
        let url = self.snapshot_url(repo, branch);
        let download_error = |source| AdkError::Download {
            url: url.clone(),
            source,
        };

        info!(%url, "downloading snapshot");
        let mut response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(download_error)?;

        let total_size = response.content_length().unwrap_or(0);
        let pb = if total_size > 0 {
            let bar = ProgressBar::new(total_size);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.cyan/blue} {bytes}/{total_bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            Some(bar)
        } else {
            None
        };

        let mut bytes = Vec::with_capacity(usize::try_from(total_size).unwrap_or(0));
        while let Some(chunk) = response.chunk().await.map_err(download_error)? {
            bytes.extend_from_slice(&chunk);
            if let Some(ref bar) = pb {
                bar.inc(chunk.len() as u64);
            }
        }

        if let Some(ref bar) = pb {
            bar.finish_and_clear();
        }
        debug!(%url, bytes = bytes.len(), "snapshot downloaded");

        ZipSnapshot::from_bytes(bytes).map_err(|source| AdkError::InvalidArchive {
            url: url.clone(),
            source,
        })
    }
}
