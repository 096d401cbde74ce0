//! Range worker: fetches one segment and writes it into the working file.
//!
//! Every worker opens its own handle on the pre-allocated `.part` file and
//! only ever writes inside its `start..end` window, so workers share the file
//! without any locking.

use crate::download::{Destination, DownloadRequest, Segment};
use crate::error::Error;
use crate::progress::ProgressSender;
use crate::utils::content_range_start;

use futures::StreamExt;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use std::io::SeekFrom;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

/// Size of a single write, and of a single progress event.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Everything a range worker needs, shared by all segments of a download.
pub(crate) struct RangeWorker<'a> {
    client: &'a ClientWithMiddleware,
    request: &'a DownloadRequest,
    destination: &'a Destination,
    progress: ProgressSender,
}

impl<'a> RangeWorker<'a> {
    pub(crate) fn new(
        client: &'a ClientWithMiddleware,
        request: &'a DownloadRequest,
        destination: &'a Destination,
        progress: ProgressSender,
    ) -> Self {
        Self {
            client,
            request,
            destination,
            progress,
        }
    }

    /// Download `segment` and return the number of bytes written.
    ///
    /// Empty segments return immediately without a request. A response
    /// status other than 200 or 206 fails with [`Error::RangeFetch`]; a body
    /// too short to fill the window fails with [`Error::IncompleteRange`].
    pub(crate) async fn run(&self, segment: Segment) -> Result<u64, Error> {
        let Some(headers) = self.request.range_headers(&segment) else {
            debug!("Segment {} is empty, nothing to fetch", segment);
            return Ok(0);
        };

        debug!("Fetching segment {} of {}", segment, &self.request.url);
        let res = self
            .client
            .get(self.request.url.as_str())
            .headers(headers)
            .send()
            .await?;

        let status = res.status();
        // A 200 carries the whole resource, a 206 starts where Content-Range says.
        let body_start = match status {
            StatusCode::PARTIAL_CONTENT => {
                content_range_start(res.headers()).unwrap_or(segment.start)
            }
            StatusCode::OK => 0,
            _ => {
                return Err(Error::RangeFetch {
                    status,
                    url: self.request.url.to_string(),
                })
            }
        };
        if body_start > segment.start {
            return Err(Error::IncompleteRange {
                start: segment.start,
                end: segment.end,
                received: 0,
            });
        }

        let mut skip = segment.start - body_start;
        let mut file = self.destination.open_writer().await?;
        let mut offset = segment.start;
        let mut buffer = Vec::with_capacity(segment.len().min(CHUNK_SIZE as u64) as usize);

        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let chunk = item?;
            let mut data = &chunk[..];

            if skip > 0 {
                let n = skip.min(data.len() as u64) as usize;
                data = &data[n..];
                skip -= n as u64;
            }

            // Never write past the window, whatever the server sends.
            let room = segment.end - offset - buffer.len() as u64;
            let take = room.min(data.len() as u64) as usize;
            buffer.extend_from_slice(&data[..take]);

            if buffer.len() >= CHUNK_SIZE {
                offset += self.write_chunk(&mut file, offset, &mut buffer).await?;
            }
            if offset + buffer.len() as u64 >= segment.end {
                break;
            }
        }

        if !buffer.is_empty() {
            offset += self.write_chunk(&mut file, offset, &mut buffer).await?;
        }
        file.flush().await?;

        let received = offset - segment.start;
        if received < segment.len() {
            return Err(Error::IncompleteRange {
                start: segment.start,
                end: segment.end,
                received,
            });
        }

        debug!("Segment {} done", segment);
        Ok(received)
    }

    async fn write_chunk(
        &self,
        file: &mut File,
        offset: u64,
        buffer: &mut Vec<u8>,
    ) -> Result<u64, Error> {
        file.seek(SeekFrom::Start(offset)).await?;
        file.write_all(buffer).await?;
        let written = buffer.len() as u64;
        buffer.clear();
        self.progress.send(written);
        Ok(written)
    }
}
