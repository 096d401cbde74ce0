//! Core downloader implementation.
//!
//! A download walks through the following steps:
//!
//! 1. a streaming `GET` reads the declared `Content-Length` and headers,
//! 2. the file name is resolved and the output directory created,
//! 3. the [`ConflictPolicy`] is applied to an existing final file and to a
//!    leftover `.part` file,
//! 4. the `.part` file is allocated to the full length,
//! 5. one range worker per segment runs, at most `max_workers` at once,
//!    while a [`ProgressAggregator`] sums their byte counts,
//! 6. the `.part` file is renamed onto the final path.
//!
//! A failing worker or a cancelled token stops the remaining workers, closes
//! the progress channel and removes the `.part` file. The final path is
//! only written by the last rename, so a failed run leaves it untouched.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ants::downloader::DownloaderBuilder;
//! use ants::download::DownloadRequest;
//! use std::convert::TryFrom;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().max_workers(8).build();
//! let request = DownloadRequest::try_from("https://example.com/image.iso")?;
//! let path = downloader.download(&request).await?;
//! println!("saved to {}", path.display());
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use super::worker::RangeWorker;
use crate::download::{plan_segments, ConflictPolicy, Destination, DownloadRequest};
use crate::error::Error;
use crate::http::{create_http_client, HttpClientConfig};
use crate::progress::{ProgressAggregator, ProgressSender};
use crate::utils::{declared_content_length, infer_filename};

use futures::future;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::header::HeaderMap;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Outcome of the steps before any byte is written.
enum Prepared {
    /// The conflict policy short-circuited the download.
    Skipped(PathBuf),
    /// Ready to allocate and fetch.
    Ready {
        destination: Destination,
        content_length: u64,
    },
}

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use ants::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of concurrent range workers.
    pub fn max_workers(&self) -> usize {
        self.config.max_workers
    }

    /// Gets the conflict policy.
    pub fn on_conflict(&self) -> ConflictPolicy {
        self.config.on_conflict
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets the token that interrupts this downloader.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.config.cancellation_token
    }

    /// Interrupt running downloads.
    ///
    /// The token stays cancelled: later calls to [`download`](Self::download)
    /// fail with [`Error::Cancelled`] straight away.
    pub fn cancel(&self) {
        self.config.cancellation_token.cancel();
    }

    /// Download `request` and return the path of the finished file.
    pub async fn download(&self, request: &DownloadRequest) -> Result<PathBuf, Error> {
        let token = self.config.cancellation_token.clone();

        let client = create_http_client(HttpClientConfig {
            proxy: self.config.proxy.clone(),
            headers: self.config.headers.clone(),
            connect_timeout: self.config.connect_timeout,
        })?;

        let prepared = tokio::select! {
            biased;
            _ = token.cancelled() => Err(Error::Cancelled),
            prepared = self.prepare(&client, request) => prepared,
        }?;

        match prepared {
            Prepared::Skipped(path) => Ok(path),
            Prepared::Ready {
                destination,
                content_length,
            } => {
                self.run(&client, request, &destination, content_length, &token)
                    .await
            }
        }
    }

    /// Discover the size, resolve the name and apply the conflict policy.
    async fn prepare(
        &self,
        client: &ClientWithMiddleware,
        request: &DownloadRequest,
    ) -> Result<Prepared, Error> {
        debug!("Probing {}", &request.url);
        let res = client
            .get(request.url.as_str())
            .headers(request.headers.clone())
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::ProbeFailed {
                status,
                url: request.url.to_string(),
            });
        }

        let content_length =
            declared_content_length(res.headers()).ok_or_else(|| Error::SizeUnknown {
                url: request.url.to_string(),
            })?;

        let filename = match request.filename {
            Some(ref name) => name.clone(),
            None => infer_filename(&request.url, res.headers())?,
        };

        // Only the headers were needed, the body is never read.
        drop(res);

        debug!("Creating destination directory {:?}", &self.config.directory);
        fs::create_dir_all(&self.config.directory).await?;
        let destination = Destination::new(&self.config.directory, &filename);

        // Only an explicit overwrite may replace a finished file.
        if destination.final_exists().await?
            && self.config.on_conflict != ConflictPolicy::Overwrite
        {
            return Err(Error::DestinationExists {
                path: destination.final_path().to_path_buf(),
            });
        }

        if destination.part_exists().await? {
            debug!(
                "Found {:?}, applying conflict policy {}",
                destination.part_path(),
                self.config.on_conflict
            );
            match self.config.on_conflict {
                ConflictPolicy::Raise => {
                    return Err(Error::AlreadyInProgress {
                        path: destination.part_path().to_path_buf(),
                    })
                }
                ConflictPolicy::Overwrite => destination.remove_part().await?,
                ConflictPolicy::Skip => {
                    info!(
                        "Skipping {}, only the working file {:?} exists",
                        &request.url,
                        destination.part_path()
                    );
                    return Ok(Prepared::Skipped(destination.final_path().to_path_buf()));
                }
                ConflictPolicy::Rename => {
                    return Err(Error::UnsupportedOperation(format!(
                        "cannot pick a new name for {:?}, renaming is not implemented",
                        destination.final_path()
                    )))
                }
            }
        }

        Ok(Prepared::Ready {
            destination,
            content_length,
        })
    }

    /// Allocate the working file, run the workers and finalize.
    async fn run(
        &self,
        client: &ClientWithMiddleware,
        request: &DownloadRequest,
        destination: &Destination,
        content_length: u64,
        token: &CancellationToken,
    ) -> Result<PathBuf, Error> {
        let allocated = tokio::select! {
            biased;
            _ = token.cancelled() => Err(Error::Cancelled),
            allocated = destination.allocate(content_length) => allocated,
        };
        if let Err(e) = allocated {
            return Err(self.abort(destination, e).await);
        }

        let (progress, progress_handle) =
            ProgressAggregator::new(content_length, self.config.progress.clone()).spawn();

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(Error::Cancelled),
            written = self.fetch_segments(client, request, destination, content_length, progress) => written,
        };

        // The worker futures are gone at this point, close the channel for good.
        let counted = progress_handle.close_and_join().await;

        let written = match result {
            Ok(written) => written,
            Err(e) => return Err(self.abort(destination, e).await),
        };

        match counted {
            Ok(counted) => debug!("{} bytes written, {} reported", written, counted),
            Err(e) => warn!("Progress reporting failed: {}", e),
        }

        match destination.finalize().await {
            Ok(path) => {
                info!("Downloaded {} to {:?} ({} bytes)", &request.url, &path, written);
                Ok(path)
            }
            Err(e) => Err(self.abort(destination, e).await),
        }
    }

    /// Run one worker per segment, at most `max_workers` at a time.
    ///
    /// The first failure drops every in-flight worker and no further segment
    /// is started.
    async fn fetch_segments(
        &self,
        client: &ClientWithMiddleware,
        request: &DownloadRequest,
        destination: &Destination,
        content_length: u64,
        progress: ProgressSender,
    ) -> Result<u64, Error> {
        let segments = plan_segments(content_length, self.config.max_workers);
        debug!(
            "Fetching {} bytes in {} segments with up to {} workers",
            content_length,
            segments.len(),
            self.config.max_workers
        );

        let worker = RangeWorker::new(client, request, destination, progress);
        stream::iter(segments)
            .map(|segment| worker.run(segment))
            .buffer_unordered(self.config.max_workers)
            .try_fold(0u64, |total, written| future::ready(Ok(total + written)))
            .await
    }

    /// Remove the working file, then hand back `error`.
    ///
    /// A cleanup failure is logged and never replaces `error`.
    async fn abort(&self, destination: &Destination, error: Error) -> Error {
        if error.is_cancelled() {
            debug!("Download cancelled, removing {:?}", destination.part_path());
        } else {
            debug!("Download failed ({}), removing {:?}", error, destination.part_path());
        }

        if let Err(e) = destination.cleanup().await {
            warn!("Cleanup after failure incomplete: {}", e);
        }
        error
    }
}

/// Download `request` with a one-off [`Downloader`].
///
/// `filename` overrides both the request's file name and inference.
pub async fn download_file(
    request: &DownloadRequest,
    max_workers: usize,
    output_dir: &Path,
    filename: Option<&str>,
    on_conflict: ConflictPolicy,
) -> Result<PathBuf, Error> {
    let downloader = super::DownloaderBuilder::new()
        .directory(output_dir.to_path_buf())
        .max_workers(max_workers)
        .on_conflict(on_conflict)
        .build();

    match filename {
        Some(name) => downloader.download(&request.clone().with_filename(name)).await,
        None => downloader.download(request).await,
    }
}
