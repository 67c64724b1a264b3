pub const DELIMITER: char = '\t';

pub const BAM_FILE_EXTENSION: &str = "bam";
pub const SAM_FILE_EXTENSION: &str = "sam";
pub const GFF_FILE_EXTENSION: &str = "gff";
pub const GZ_FILE_EXTENSION: &str = "gz";
pub const BAI_FILE_EXTENSION: &str = "bai";

pub const STDIN_PATH: &str = "-";
