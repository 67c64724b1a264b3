/// Source label written by the region list reformatter.
pub const DEFAULT_BED_SOURCE: &str = "MACE";

/// Score written when a region row carries none.
pub const DEFAULT_BED_SCORE: &str = "1";

/// Filler written into unused reformatter columns.
pub const BED_BLANK_FIELD: &str = " ";

/// Filler written into the trailing columns of coverage records.
pub const GFF_EMPTY_FIELD: &str = ".";
