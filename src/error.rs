//! Error types for the notedown library.
//!
//! The conversion core itself is total and never fails; these errors
//! belong to the surrounding plumbing (reading, writing and discovering
//! files).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for notedown operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around a conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotADirectory(PathBuf::from("/tmp/missing"));
        assert_eq!(err.to_string(), "Not a directory: /tmp/missing");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
