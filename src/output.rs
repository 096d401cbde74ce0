//! Resolution of the user supplied output path.
//!
//! An existing directory receives a file whose name is inferred from the
//! response. Any path that does not exist yet is taken as the exact
//! destination file. An existing regular file is refused before any request
//! is made.

use crate::error::Error;

use std::path::{Path, PathBuf};

/// Where the engine should write, as derived from an output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write into this directory under an inferred name.
    Directory(PathBuf),
    /// Write exactly `dir/filename`.
    File { dir: PathBuf, filename: String },
}

impl OutputTarget {
    /// Directory the file will be written to.
    pub fn directory(&self) -> &Path {
        match self {
            OutputTarget::Directory(dir) => dir,
            OutputTarget::File { dir, .. } => dir,
        }
    }

    /// Forced file name, if any.
    pub fn filename(&self) -> Option<&str> {
        match self {
            OutputTarget::Directory(_) => None,
            OutputTarget::File { filename, .. } => Some(filename),
        }
    }
}

/// Classify `output`.
///
/// ```rust
/// use ants::output::{resolve_output, OutputTarget};
///
/// let dir = tempfile::tempdir()?;
/// assert_eq!(
///     resolve_output(dir.path())?,
///     OutputTarget::Directory(dir.path().to_path_buf())
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn resolve_output(output: &Path) -> Result<OutputTarget, Error> {
    if output.is_dir() {
        return Ok(OutputTarget::Directory(output.to_path_buf()));
    }
    if output.exists() {
        return Err(Error::DestinationExists {
            path: output.to_path_buf(),
        });
    }

    let filename = output
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::Internal(format!("{} does not name a file", output.display()))
        })?;
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok(OutputTarget::File {
        dir,
        filename: filename.to_string(),
    })
}
