//! HTTP client setup and middleware configuration.
//!
//! One client is built per download and shared by the size probe and every
//! range worker. Requests go through [`TracingMiddleware`] so each range
//! request shows up as its own span. There is no retry layer, a failed
//! range fails the download.
//!
//! # Examples
//!
//! ```rust
//! use ants::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "MyDownloader/1.0".parse()?);
//!
//! let config = HttpClientConfig {
//!     headers: Some(headers),
//!     ..HttpClientConfig::default()
//! };
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// Maximum time to establish a connection.
    pub connect_timeout: Option<Duration>,
}

/// Creates an HTTP client with middleware configuration.
///
/// The underlying reqwest client keeps its connection pool, so range workers
/// hitting the same host reuse connections where the server allows it.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder();

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    if let Some(timeout) = config.connect_timeout {
        inner_client_builder = inner_client_builder.connect_timeout(timeout);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}
