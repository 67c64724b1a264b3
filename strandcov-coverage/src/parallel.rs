//! Fan-out of indexed accumulation over a thread pool.
//!
//! Every reference is an independent unit of work: a worker opens its own indexed
//! reader, fills the track it owns and hands it back. Tracks are collected in chunks of
//! `threads` references and passed to the sink in reference order before the next chunk
//! starts, so at most `threads` tracks are alive at once.
use std::path::Path;

use log::info;
use rayon::prelude::*;

use crate::accumulator::{CoverageTrack, TrackSizing};
use crate::alignment::BamSource;
use crate::errors::{CoverageError, Result};
use crate::record::AlignmentSource;
use crate::strategy::{TrackSink, fill_indexed_track};

/// Accumulate an indexed BAM file with `threads` workers.
pub fn par_indexed_bam_coverage(
    path: &Path,
    sizing: &TrackSizing,
    threads: usize,
    sink: &mut TrackSink<'_>,
) -> Result<()> {
    let threads = threads.max(1);

    // Must create a Rayon thread pool in which to run our iterators
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;

    let source = BamSource::open(path)?;
    if !source.has_index() {
        return Err(CoverageError::MissingIndex);
    }
    let reference_indices: Vec<usize> = (0..source.references().len()).collect();
    drop(source);

    info!(
        "Accumulating {} references on {} threads",
        reference_indices.len(),
        threads
    );

    for chunk in reference_indices.chunks(threads) {
        let tracks: Vec<CoverageTrack> = pool.install(|| {
            chunk
                .par_iter()
                .map(|&reference_index| {
                    let mut source = BamSource::open(path)?;
                    fill_indexed_track(&mut source, reference_index, sizing)
                })
                .collect::<Result<Vec<CoverageTrack>>>()
        })?;

        for track in tracks {
            sink(track)?;
        }
    }

    Ok(())
}
