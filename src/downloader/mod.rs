//! Downloader module containing the download engine, its builder and configuration.
//!
//! # Overview
//!
//! - `downloader` - the [`Downloader`] orchestrating one segmented download
//! - `worker` - the range worker writing one segment into the working file
//! - `builder` - [`DownloaderBuilder`] for configuring a [`Downloader`]
//! - `config` - configuration structure and defaults
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use ants::downloader::DownloaderBuilder;
//! use ants::download::DownloadRequest;
//! use std::convert::TryFrom;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().build();
//! let request = DownloadRequest::try_from("https://example.com/file.zip")?;
//! let path = downloader.download(&request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Interrupting a Download
//!
//! ```rust,no_run
//! use ants::downloader::DownloaderBuilder;
//! use tokio_util::sync::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let downloader = DownloaderBuilder::hidden()
//!     .cancellation_token(token.clone())
//!     .build();
//! // Later, from another task:
//! token.cancel();
//! ```

pub mod builder;
pub mod config;
pub mod downloader;
pub(crate) mod worker;

pub use builder::DownloaderBuilder;
pub use config::{DownloaderConfig, DEFAULT_MAX_WORKERS};
pub use downloader::{download_file, Downloader};
pub use worker::CHUNK_SIZE;
