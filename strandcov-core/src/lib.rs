//! # Core models and utilities for strandcov.
//!
//! Everything the other crates of the workspace share lives here: the small data models
//! (regions, strands, reference sequences), the error type for file handling, and helpers
//! for opening (optionally gzipped) inputs and deriving output paths.
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::CoreError;
