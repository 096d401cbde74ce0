//! The working and final files of one download.
//!
//! Bytes land in `<dir>/<filename>.part`, which is pre-allocated to the full
//! content length so that every worker writes inside the file's bounds. Once
//! all segments are in, the working file is renamed onto `<dir>/<filename>`.

use crate::error::Error;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tracing::{debug, warn};

/// Suffix of the working file.
pub const PART_EXTENSION: &str = "part";

/// Paths owned by a single download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    final_path: PathBuf,
    part_path: PathBuf,
}

impl Destination {
    /// Creates the destination for `filename` inside `directory`.
    pub fn new(directory: &Path, filename: &str) -> Self {
        Self {
            final_path: directory.join(filename),
            part_path: directory.join(format!("{filename}.{PART_EXTENSION}")),
        }
    }

    /// Path of the finished file.
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// Path of the working file.
    pub fn part_path(&self) -> &Path {
        &self.part_path
    }

    /// `true` if a finished file is already on disk.
    pub async fn final_exists(&self) -> Result<bool, Error> {
        Ok(fs::try_exists(&self.final_path).await?)
    }

    /// `true` if a working file is already on disk.
    pub async fn part_exists(&self) -> Result<bool, Error> {
        Ok(fs::try_exists(&self.part_path).await?)
    }

    /// Delete the working file if there is one.
    pub async fn remove_part(&self) -> Result<(), Error> {
        remove_if_exists(&self.part_path).await
    }

    /// Create the working file with exactly `len` bytes.
    pub async fn allocate(&self, len: u64) -> Result<(), Error> {
        debug!("Allocating {} bytes for {:?}", len, &self.part_path);
        let file = File::create(&self.part_path).await?;
        file.set_len(len).await?;
        file.sync_all().await?;
        Ok(())
    }

    /// Open an independent write handle on the working file.
    ///
    /// The file must already be allocated; it is never created nor truncated
    /// here.
    pub async fn open_writer(&self) -> Result<File, Error> {
        Ok(OpenOptions::new()
            .write(true)
            .open(&self.part_path)
            .await?)
    }

    /// Move the working file onto the final path and return it.
    pub async fn finalize(&self) -> Result<PathBuf, Error> {
        debug!("Renaming {:?} to {:?}", &self.part_path, &self.final_path);
        fs::rename(&self.part_path, &self.final_path).await?;
        Ok(self.final_path.clone())
    }

    /// Best-effort removal of the working file after a failed download.
    ///
    /// The final path is only ever written by the rename in
    /// [`finalize`](Self::finalize), so a failed run never leaves a partial
    /// final file and whatever sits there is left alone.
    pub async fn cleanup(&self) -> Result<(), Error> {
        remove_if_exists(&self.part_path).await.inspect_err(|e| {
            warn!("Failed to remove {:?}: {}", &self.part_path, e);
        })
    }
}

async fn remove_if_exists(path: &Path) -> Result<(), Error> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
