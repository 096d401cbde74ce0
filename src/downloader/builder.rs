//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust
//! use ants::downloader::DownloaderBuilder;
//! use ants::ConflictPolicy;
//! use std::path::PathBuf;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .max_workers(8)
//!     .on_conflict(ConflictPolicy::Overwrite)
//!     .build();
//! assert_eq!(downloader.max_workers(), 8);
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::download::ConflictPolicy;
use crate::progress::ProgressBarOpts;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main()  {
/// use ants::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().max_workers(16).directory("downloads".into()).build();
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bar.
    pub fn hidden() -> Self {
        DownloaderBuilder::default().progress(ProgressBarOpts::hidden())
    }

    /// Sets the directory where to store the downloads.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of range workers. Zero is raised to one.
    pub fn max_workers(mut self, max_workers: usize) -> Self {
        self.config.max_workers = max_workers.max(1);
        self
    }

    /// Set the policy applied when a working file already exists.
    pub fn on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.config.on_conflict = policy;
        self
    }

    /// Set the progress bar options.
    pub fn progress(mut self, progress: ProgressBarOpts) -> Self {
        self.config.progress = progress;
        self
    }

    /// Route every request through `proxy`.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Limit the time spent establishing each connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Use `token` to interrupt downloads, for instance from a Ctrl-C handler.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.config.cancellation_token = token;
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue, HeaderMap};
    /// use ants::downloader::DownloaderBuilder;
    ///
    /// let ua = HeaderValue::from_static("curl/7.87");
    ///
    /// let downloader = DownloaderBuilder::new()
    ///     .headers(HeaderMap::from_iter([(header::USER_AGENT, ua)]))
    ///     .build();
    /// ```
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
