//! Aggregation of the byte counts reported by range workers.
//!
//! Workers push the size of every chunk they write through a
//! [`ProgressSender`]. A single [`ProgressAggregator`] task owns the running
//! total and the progress bar. It stops when the channel is closed, either
//! because every sender was dropped or because [`ProgressHandle::close`] was
//! called; events already queued at that point are still counted.
//!
//! ```rust
//! use ants::progress::{ProgressAggregator, ProgressBarOpts};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), ants::Error> {
//! let aggregator = ProgressAggregator::new(1024, ProgressBarOpts::hidden());
//! let (sender, handle) = aggregator.spawn();
//!
//! sender.send(512);
//! sender.send(512);
//! drop(sender);
//!
//! assert_eq!(handle.join().await?, 1024);
//! # Ok(())
//! # }
//! ```

use crate::error::Error;
use crate::progress::ProgressBarOpts;

use indicatif::ProgressBar;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Running byte count of one download, rendered as a progress bar.
///
/// The denominator is fixed at the content length and the numerator starts
/// at zero.
pub struct ProgressAggregator {
    bar: ProgressBar,
    total: u64,
    transferred: u64,
    clear: bool,
}

impl ProgressAggregator {
    /// Create an aggregator for a resource of `total` bytes.
    pub fn new(total: u64, opts: ProgressBarOpts) -> Self {
        let clear = opts.clear;
        Self {
            bar: opts.to_progress_bar(total),
            total,
            transferred: 0,
            clear,
        }
    }

    /// Expected number of bytes.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Bytes counted so far.
    pub fn transferred(&self) -> u64 {
        self.transferred
    }

    /// Count one chunk.
    pub fn record(&mut self, bytes: u64) {
        self.transferred += bytes;
        self.bar.inc(bytes);
    }

    /// Start consuming events on a dedicated task.
    pub fn spawn(self) -> (ProgressSender, ProgressHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let closed = CancellationToken::new();
        let task = tokio::spawn(self.run(rx, closed.clone()));
        (ProgressSender { tx }, ProgressHandle { closed, task })
    }

    async fn run(mut self, mut rx: UnboundedReceiver<u64>, closed: CancellationToken) -> u64 {
        loop {
            tokio::select! {
                biased;
                _ = closed.cancelled() => {
                    rx.close();
                    while let Ok(bytes) = rx.try_recv() {
                        self.record(bytes);
                    }
                    break;
                }
                event = rx.recv() => match event {
                    Some(bytes) => self.record(bytes),
                    None => break,
                },
            }
        }

        self.finish();
        debug!("Progress closed at {}/{} bytes", self.transferred, self.total);
        self.transferred
    }

    fn finish(&self) {
        match (self.clear, self.transferred >= self.total) {
            (true, _) => self.bar.finish_and_clear(),
            (false, true) => self.bar.finish(),
            (false, false) => self.bar.abandon(),
        }
    }
}

/// Producer side of the progress channel. Cloned once per worker.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: UnboundedSender<u64>,
}

impl ProgressSender {
    /// Report `bytes` freshly written.
    ///
    /// Returns `false` once the channel is closed. Progress is advisory, so
    /// callers are free to ignore it.
    pub fn send(&self, bytes: u64) -> bool {
        self.tx.send(bytes).is_ok()
    }

    /// `true` once the aggregator stopped listening.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Control side of a running [`ProgressAggregator`].
#[derive(Debug)]
pub struct ProgressHandle {
    closed: CancellationToken,
    task: JoinHandle<u64>,
}

impl ProgressHandle {
    /// Explicitly close the channel, even if senders are still alive.
    ///
    /// Events queued before the close are drained, later sends fail.
    pub fn close(&self) {
        self.closed.cancel();
    }

    /// Wait for the aggregator to stop and return the bytes it counted.
    pub async fn join(self) -> Result<u64, Error> {
        self.task
            .await
            .map_err(|e| Error::Internal(format!("progress task failed: {e}")))
    }

    /// [`close`](Self::close) then [`join`](Self::join).
    pub async fn close_and_join(self) -> Result<u64, Error> {
        self.close();
        self.join().await
    }
}
