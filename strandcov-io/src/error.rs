use std::io;

use strandcov_core::CoreError;
use thiserror::Error;

/// Error type for strandcov-io operations.
#[derive(Error, Debug)]
pub enum GffError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input file could not be opened.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A region row could not be parsed.
    #[error("Malformed region at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

/// Result type alias for strandcov-io operations.
pub type Result<T> = std::result::Result<T, GffError>;
