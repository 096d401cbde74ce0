//! The download request handed to the engine.
//!
//! A [`DownloadRequest`] carries the target URL, the headers to send with every
//! request and an optional destination filename. The method is always `GET`.
//!
//! ```rust
//! use ants::download::DownloadRequest;
//! use std::convert::TryFrom;
//!
//! let request = DownloadRequest::try_from("https://example.com/archive.tar.gz")?
//!     .with_header("Authorization", "Bearer token")?
//!     .with_filename("renamed.tar.gz");
//! assert_eq!(request.filename.as_deref(), Some("renamed.tar.gz"));
//! # Ok::<(), ants::Error>(())
//! ```

use crate::error::Error;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RANGE};
use reqwest::Url;
use std::convert::TryFrom;

use super::segment::Segment;

/// Represents a resource to be downloaded in segments.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// URL of the resource.
    pub url: Url,
    /// Headers sent with the size probe and every range request.
    pub headers: HeaderMap,
    /// File name used to save the resource, inferred when `None`.
    pub filename: Option<String>,
}

impl DownloadRequest {
    /// Creates a new [`DownloadRequest`] without extra headers.
    pub fn new(url: &Url) -> Self {
        Self {
            url: url.clone(),
            headers: HeaderMap::new(),
            filename: None,
        }
    }

    /// Add a header, replacing any previous value under the same
    /// (case-insensitive) name.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, Error> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("{name}: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Merge a whole [`HeaderMap`] into the request headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Force the destination file name.
    pub fn with_filename(mut self, filename: &str) -> Self {
        self.filename = Some(String::from(filename));
        self
    }

    /// Build the header set for one segment.
    ///
    /// The request's own headers are copied so that every worker owns its
    /// `Range` value. Returns `None` for an empty segment.
    pub fn range_headers(&self, segment: &Segment) -> Option<HeaderMap> {
        let range = segment.range_header()?;
        let mut headers = self.headers.clone();
        let value = HeaderValue::from_str(&range).ok()?;
        headers.insert(RANGE, value);
        Some(headers)
    }
}

impl TryFrom<&Url> for DownloadRequest {
    type Error = crate::error::Error;

    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        match value.scheme() {
            "http" | "https" => Ok(DownloadRequest::new(value)),
            scheme => Err(Error::InvalidUrl(format!(
                "The url \"{}\" uses the unsupported scheme \"{}\"",
                value, scheme
            ))),
        }
    }
}

impl TryFrom<&str> for DownloadRequest {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| DownloadRequest::try_from(&u))
    }
}
