use std::io;
use std::path::PathBuf;

use strandcov_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error(
        "Interval end {end} on reference {reference} exceeds its track length {length}. \
         Check the reference length in the header, or raise the default chromosome size for references without one"
    )]
    OutOfBounds {
        reference: String,
        end: usize,
        length: usize,
    },

    #[error("Record refers to reference index {0}, which the header does not declare")]
    UnknownReference(usize),

    #[error("Malformed alignment record: {0}")]
    MalformedRecord(String),

    #[error("Alignment source has no index, indexed accumulation is unavailable")]
    MissingIndex,

    #[error("Unsupported alignment input (expected .sam or .bam): {0}")]
    UnsupportedInput(PathBuf),

    #[error("Can't build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CoverageError>;
