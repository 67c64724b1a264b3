use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use flate2::read::MultiGzDecoder;

use crate::consts::{
    BAI_FILE_EXTENSION, BAM_FILE_EXTENSION, GFF_FILE_EXTENSION, GZ_FILE_EXTENSION,
    SAM_FILE_EXTENSION, STDIN_PATH,
};
use crate::errors::CoreError;

#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum FileType {
    BAM,
    SAM,
    UNKNOWN, // anything we have no reader for
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            BAM_FILE_EXTENSION => Ok(FileType::BAM),
            SAM_FILE_EXTENSION => Ok(FileType::SAM),
            _ => Ok(FileType::UNKNOWN),
        }
    }
}

pub struct FileInfo {
    pub file_type: FileType,
    pub is_gzipped: bool,
}

pub fn get_file_info(path: &Path) -> FileInfo {
    let is_gzipped = path.extension() == Some(OsStr::new(GZ_FILE_EXTENSION));
    let base = match is_gzipped {
        true => path.with_extension(""),
        false => path.to_path_buf(),
    };

    let file_type = base
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| FileType::from_str(ext).ok())
        .unwrap_or(FileType::UNKNOWN);

    FileInfo {
        file_type,
        is_gzipped,
    }
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>, CoreError> {
    let is_gzipped = get_file_info(path).is_gzipped;
    let file = File::open(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
pub fn get_dynamic_reader_w_stdin(
    file_path_str: &str,
) -> Result<BufReader<Box<dyn Read>>, CoreError> {
    if file_path_str == STDIN_PATH {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

///
/// Derive the default output path of an alignment conversion.
///
/// The `.sam`/`.bam` extension of `alignment_path` is replaced by `.gff`. Existing files
/// are never overwritten: if the derived path is already taken this fails with
/// [`CoreError::OutputCollision`].
///
pub fn derive_output_path(alignment_path: &Path) -> Result<PathBuf, CoreError> {
    let extension = alignment_path.extension().and_then(|e| e.to_str());

    match extension {
        Some(SAM_FILE_EXTENSION) | Some(BAM_FILE_EXTENSION) => {
            let derived = alignment_path.with_extension(GFF_FILE_EXTENSION);
            if derived.exists() {
                return Err(CoreError::OutputCollision(derived));
            }
            Ok(derived)
        }
        _ => Err(CoreError::UnderivableOutputPath(alignment_path.to_path_buf())),
    }
}

///
/// Path of the BAM index (`<file>.bam.bai`) that would sit next to `alignment_path`.
///
pub fn bam_index_path(alignment_path: &Path) -> PathBuf {
    let mut index = alignment_path.as_os_str().to_owned();
    index.push(".");
    index.push(BAI_FILE_EXTENSION);
    PathBuf::from(index)
}

///
/// File name component of a path, used to label output tracks.
///
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
