//! SAM and BAM backed [`AlignmentSource`]s.
mod bam_source;
mod fields;
mod sam_source;

use std::path::Path;

use strandcov_core::utils::{FileType, get_file_info};

use crate::errors::{CoverageError, Result};
use crate::record::AlignmentSource;

pub use self::bam_source::BamSource;
pub use self::sam_source::SamSource;

///
/// Open an alignment file by its extension: `.bam` (indexed when `<file>.bam.bai` exists)
/// or `.sam`.
///
pub fn open_alignment_source(path: &Path) -> Result<Box<dyn AlignmentSource>> {
    match get_file_info(path).file_type {
        FileType::BAM => Ok(Box::new(BamSource::open(path)?)),
        FileType::SAM => Ok(Box::new(SamSource::open(path)?)),
        _ => Err(CoverageError::UnsupportedInput(path.to_path_buf())),
    }
}
