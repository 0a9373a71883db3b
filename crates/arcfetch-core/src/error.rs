//! Errors that stop a run.
//!
//! Unreachable sources and rejected transfers are not errors; they are
//! reported as outcomes by the pipeline. Everything here propagates to the
//! caller and halts the batch.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Local filesystem failure (directory creation, archive write, extraction, removal).
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a readable zip container.
    #[error("invalid archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Configured URL cannot be used as a source locator.
    #[error("invalid source URL '{url}': {reason}")]
    InvalidLocator { url: String, reason: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
