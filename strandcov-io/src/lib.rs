//! # Input/Output utilities for strandcov.
//!
//! This small crate owns the tab separated, 9 column feature format that every strandcov
//! conversion writes, and the region list (BED-like) to feature format reformatter.
//!
pub mod bed;
pub mod consts;
pub mod error;
pub mod gff;

// re-expose core functions
pub use bed::*;
pub use consts::*;
pub use error::*;
pub use gff::*;
