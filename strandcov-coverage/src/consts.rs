/// Track length used for references that declare no length. Must exceed every coordinate
/// on such a reference.
pub const DEFAULT_CHROMOSOME_SIZE: usize = 6_000_000;

/// Sequence identifier written into the first output column unless configured otherwise.
pub const DEFAULT_SEQID: &str = "NC_000913";

pub const DEFAULT_THREADS: usize = 1;

/// Third column of coverage records.
pub const COVERAGE_FEATURE_FIELD: &str = "";
