use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("File {0} already exists")]
    OutputCollision(PathBuf),

    #[error("Can't derive an output path from {0}: expected a .sam or .bam extension")]
    UnderivableOutputPath(PathBuf),

    #[error("Can't read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
