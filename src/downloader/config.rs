//! Configuration structures and defaults for the downloader.

use crate::download::ConflictPolicy;
use crate::progress::ProgressBarOpts;

use reqwest::header::HeaderMap;
use std::env::current_dir;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default number of concurrent range workers.
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Default output directory name, relative to the working directory.
pub const DEFAULT_DIRECTORY: &str = "downloads";

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Number of range workers running at once.
    pub max_workers: usize,
    /// What to do with a leftover working file.
    pub on_conflict: ConflictPolicy,
    /// Progress bar options.
    pub progress: ProgressBarOpts,
    /// Custom HTTP headers sent with every request.
    pub headers: Option<HeaderMap>,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Maximum time to establish a connection.
    pub connect_timeout: Option<Duration>,
    /// Cancelling this token interrupts running downloads.
    pub cancellation_token: CancellationToken,
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("max_workers", &self.max_workers)
            .field("on_conflict", &self.on_conflict)
            .field("progress", &self.progress)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy.is_some())
            .field("connect_timeout", &self.connect_timeout)
            .field("cancelled", &self.cancellation_token.is_cancelled())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default().join(DEFAULT_DIRECTORY),
            max_workers: DEFAULT_MAX_WORKERS,
            on_conflict: ConflictPolicy::default(),
            progress: ProgressBarOpts::default(),
            headers: None,
            proxy: None,
            connect_timeout: None,
            cancellation_token: CancellationToken::new(),
        }
    }
}
