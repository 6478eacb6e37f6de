//! Errors from file-level operations.

use std::io;
use std::path::PathBuf;

use hydro_decode::DecodeError;
use thiserror::Error;

/// Errors that can occur while converting a model file.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be read.
    #[error("failed to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input was read but is not a supported model.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

impl Error {
    /// The decode failure, if that is what went wrong.
    #[must_use]
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for file-level operations.
pub type Result<T> = std::result::Result<T, Error>;
