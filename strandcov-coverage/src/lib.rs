//! # Strand-specific coverage tracks from alignments.
//!
//! Aligned reads are folded into two dense per-base arrays per reference sequence (plus
//! and minus strand), then written out sparsely, one feature record per covered base.
//!
//! Paired-end fragments are inferred from the first read of each proper pair: a forward
//! first mate covers `[start, start + template_length)`, a reverse first mate covers
//! `[mate_start, alignment_end)`. Second mates contribute nothing, and reads outside of
//! proper pairs cover their own span on their own strand.
//!
//! Two accumulation strategies produce identical tracks: [`EagerStrategy`] does one pass
//! over every record while holding all references in memory, [`IndexedStrategy`] fetches
//! one reference at a time through the alignment index.
//!
pub mod accumulator;
pub mod alignment;
pub mod consts;
pub mod conversion;
pub mod errors;
pub mod parallel;
pub mod record;
pub mod strand;
pub mod strategy;
pub mod writer;

// re-exports
pub use accumulator::*;
pub use alignment::{BamSource, SamSource, open_alignment_source};
pub use conversion::*;
pub use errors::*;
pub use record::*;
pub use strand::*;
pub use strategy::*;
pub use writer::*;
