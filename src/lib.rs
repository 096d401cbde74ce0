//! Ants downloads a single HTTP(S) resource with several concurrent range
//! requests, each writing straight into its own window of one pre-allocated
//! file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use ants::{DownloadRequest, DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let request = DownloadRequest::try_from("https://example.com/ubuntu.iso")?;
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("output"))
//!     .max_workers(8)
//!     .build();
//! let path = downloader.download(&request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`download`] - the request, segment planning, conflict policy and destination files
//! - [`downloader`] - the [`Downloader`] engine and its builder
//! - [`error`] - centralized error handling with the [`Error`] enum
//! - [`http`] - HTTP client construction
//! - [`output`] - classification of a user supplied output path
//! - [`progress`] - progress aggregation and bar styling
//! - [`utils`] - header parsing and file name inference

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod output;
pub mod progress;
pub mod utils;

pub use download::{plan_segments, ConflictPolicy, Destination, DownloadRequest, Segment};
pub use downloader::{download_file, Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use output::{resolve_output, OutputTarget};
pub use progress::{ProgressAggregator, ProgressBarOpts};
pub use utils::{declared_content_length, infer_filename};
