//! Error handling for the ants library.
//!
//! Every failure of a segmented download surfaces as one [`Error`] variant.
//! Callers can tell a user abort ([`Error::Cancelled`]) apart from a failed
//! fetch ([`Error::RangeFetch`]) and from a conflicting working file
//! ([`Error::AlreadyInProgress`]).

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen when using ants.
#[derive(Error, Debug)]
pub enum Error {
    /// The server did not declare a `Content-Length`.
    ///
    /// Segments cannot be planned without a known total length, so nothing is
    /// written to disk when this happens.
    #[error("{url} did not report a content length, cannot split it into ranges")]
    SizeUnknown { url: String },

    /// A working file from a previous download exists and the conflict policy
    /// is [`ConflictPolicy::Raise`](crate::ConflictPolicy::Raise).
    #[error("a download is already in progress at {}", path.display())]
    AlreadyInProgress { path: PathBuf },

    /// The requested behaviour is not implemented.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A range worker received a status other than 200 or 206.
    #[error("range request to {url} failed with status {status}")]
    RangeFetch { status: StatusCode, url: String },

    /// The size discovery request itself was rejected by the server.
    #[error("request to {url} failed with status {status}")]
    ProbeFailed { status: StatusCode, url: String },

    /// A range response ended before its byte window was filled.
    #[error("range {start}-{end} ended early after {received} bytes")]
    IncompleteRange { start: u64, end: u64, received: u64 },

    /// The download was interrupted by the operator.
    #[error("download cancelled")]
    Cancelled,

    /// A conflict policy name that is not one of overwrite, skip, rename, raise.
    #[error("unknown conflict policy \"{0}\", expected one of overwrite, skip, rename, raise")]
    InvalidConflictPolicy(String),

    /// The output path or the download's final path names an existing
    /// regular file.
    #[error("file {} already exists", path.display())]
    DestinationExists { path: PathBuf },

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value could not be parsed.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Error from an underlying system.
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O Error.
    ///
    /// Raised while creating, allocating, writing, renaming or removing the
    /// destination files.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error raised by the HTTP middleware stack.
    #[error("HTTP middleware error: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

impl Error {
    /// Return `true` if the download was stopped by the operator rather than
    /// by a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Result type alias for operations that can fail with an ants error.
pub type Result<T> = std::result::Result<T, Error>;
