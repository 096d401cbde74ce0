use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use ants::{DownloadRequest, DownloaderBuilder, HttpClientConfig, ProgressBarOpts};
use tokio_util::sync::CancellationToken;

// Common test constants
pub const TEST_DOMAIN: &str = "http://domain.com/file.zip";
pub const TEST_USER_AGENT: &str = "ants-test-agent";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size.
///
/// The pattern repeats every 251 bytes so that misplaced segments show up.
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that nothing exists at the given path
pub fn assert_file_missing(path: &Path) {
    assert!(!path.exists(), "File should not exist at path: {:?}", path);
}

/// Asserts that a file has the expected size
pub fn assert_file_size(path: &Path, expected_size: u64) {
    let metadata = fs::metadata(path).expect("Failed to get file metadata");
    assert_eq!(
        metadata.len(),
        expected_size,
        "File size mismatch at path: {:?}",
        path
    );
}

/// Asserts that a file holds exactly `expected`
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let actual = fs::read(path).expect("Failed to read file");
    assert_eq!(actual.len(), expected.len(), "Length mismatch at path: {:?}", path);
    assert!(actual == expected, "Content mismatch at path: {:?}", path);
}

/// Number of entries in a directory
pub fn count_entries(dir: &Path) -> usize {
    fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

// === Request Helpers ===

/// Creates a test request from the common test domain
pub fn create_test_request() -> DownloadRequest {
    DownloadRequest::try_from(TEST_DOMAIN).expect("Failed to create test request")
}

/// Creates a request for `url`
pub fn create_request(url: &str) -> DownloadRequest {
    DownloadRequest::try_from(url).expect("Failed to create request")
}

// === HTTP Configuration Helpers ===

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates test headers with custom user agent
pub fn create_test_headers_with_agent(agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(agent).expect("Invalid header value"));
    headers
}

/// Creates a test HTTP client configuration
pub fn create_test_http_config() -> HttpClientConfig {
    HttpClientConfig {
        headers: Some(create_test_headers()),
        ..HttpClientConfig::default()
    }
}

// === Downloader Builder Helpers ===

/// Creates a quiet downloader builder writing into `dir`
pub fn create_test_downloader_builder(dir: &Path, max_workers: usize) -> DownloaderBuilder {
    DownloaderBuilder::new()
        .directory(dir.to_path_buf())
        .max_workers(max_workers)
        .progress(ProgressBarOpts::hidden())
}

/// Same as [`create_test_downloader_builder`] with an external cancellation token
pub fn create_cancellable_downloader_builder(
    dir: &Path,
    max_workers: usize,
    token: CancellationToken,
) -> DownloaderBuilder {
    create_test_downloader_builder(dir, max_workers).cancellation_token(token)
}
