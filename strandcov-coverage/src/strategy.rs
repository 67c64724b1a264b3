use std::fmt::{self, Display};
use std::str::FromStr;

use log::{debug, info};

use crate::accumulator::{CoverageTrack, TrackSizing};
use crate::errors::{CoverageError, Result};
use crate::record::AlignmentSource;
use crate::strand::StrandPolicy;

/// Receives each finished track, in reference order.
pub type TrackSink<'a> = dyn FnMut(CoverageTrack) -> Result<()> + 'a;

///
/// A way of folding the records of an alignment source into coverage tracks.
///
/// Every implementation applies [`crate::contribution`] to each record and must produce
/// identical tracks for the same input.
///
pub trait CoverageStrategy {
    fn accumulate(
        &self,
        source: &mut dyn AlignmentSource,
        sizing: &TrackSizing,
        sink: &mut TrackSink<'_>,
    ) -> Result<()>;
}

///
/// Allocates the tracks of every reference up front and fills them in a single pass
/// over all records, in whatever reference order they arrive.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct EagerStrategy;

impl CoverageStrategy for EagerStrategy {
    fn accumulate(
        &self,
        source: &mut dyn AlignmentSource,
        sizing: &TrackSizing,
        sink: &mut TrackSink<'_>,
    ) -> Result<()> {
        let mut tracks: Vec<CoverageTrack> = source
            .references()
            .iter()
            .map(|reference| CoverageTrack::new(&reference.name, sizing.length_of(reference)))
            .collect();

        let mut seen: u64 = 0;
        for record in source.records()? {
            let record = record?;
            seen += 1;
            if record.is_unmapped {
                continue;
            }

            tracks
                .get_mut(record.reference_index)
                .ok_or(CoverageError::UnknownReference(record.reference_index))?
                .add_record(&record)?;
        }
        debug!("Folded {} records into {} tracks", seen, tracks.len());

        for track in tracks {
            sink(track)?;
        }

        Ok(())
    }
}

///
/// Fills one reference at a time from the alignment index, so only a single track is
/// held in memory. Needs a source that reports an index.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedStrategy;

impl CoverageStrategy for IndexedStrategy {
    fn accumulate(
        &self,
        source: &mut dyn AlignmentSource,
        sizing: &TrackSizing,
        sink: &mut TrackSink<'_>,
    ) -> Result<()> {
        if !source.has_index() {
            return Err(CoverageError::MissingIndex);
        }

        for reference_index in 0..source.references().len() {
            let track = fill_indexed_track(source, reference_index, sizing)?;
            sink(track)?;
        }

        Ok(())
    }
}

///
/// Build the track of a single reference from the records `fetch` returns for it.
///
pub fn fill_indexed_track(
    source: &mut dyn AlignmentSource,
    reference_index: usize,
    sizing: &TrackSizing,
) -> Result<CoverageTrack> {
    let reference = source
        .references()
        .get(reference_index)
        .ok_or(CoverageError::UnknownReference(reference_index))?;
    let mut track = CoverageTrack::new(&reference.name, sizing.length_of(reference));

    let mut seen: u64 = 0;
    for record in source.fetch(reference_index)? {
        let record = record?;
        // queries may hand back records placed elsewhere, e.g. unmapped mates
        if record.is_unmapped || record.reference_index != reference_index {
            continue;
        }
        seen += 1;
        track.add_record(&record)?;
    }
    debug!("Folded {} records into track {}", seen, track.name());

    Ok(track)
}

///
/// Which strategy a conversion should use.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrategyChoice {
    /// Indexed when the source has an index, eager otherwise.
    #[default]
    Auto,
    Eager,
    Indexed,
}

impl FromStr for StrategyChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(StrategyChoice::Auto),
            "eager" => Ok(StrategyChoice::Eager),
            "indexed" => Ok(StrategyChoice::Indexed),
            _ => Err(format!("Invalid strategy: {}", s)),
        }
    }
}

impl Display for StrategyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyChoice::Auto => "auto",
            StrategyChoice::Eager => "eager",
            StrategyChoice::Indexed => "indexed",
        };
        write!(f, "{}", name)
    }
}

///
/// Resolve a [`StrategyChoice`] against a concrete source.
///
pub fn select_strategy(
    choice: StrategyChoice,
    source: &dyn AlignmentSource,
) -> Result<Box<dyn CoverageStrategy>> {
    let strategy: Box<dyn CoverageStrategy> = match (choice, source.has_index()) {
        (StrategyChoice::Eager, _) | (StrategyChoice::Auto, false) => {
            info!("Accumulating coverage in a single pass over all records");
            Box::new(EagerStrategy)
        }
        (StrategyChoice::Indexed, true) | (StrategyChoice::Auto, true) => {
            info!("Accumulating coverage one reference at a time through the index");
            Box::new(IndexedStrategy)
        }
        (StrategyChoice::Indexed, false) => return Err(CoverageError::MissingIndex),
    };

    Ok(strategy)
}

///
/// Count strand-specific coverage of every reference of `source`.
///
/// The strategy is picked automatically and `flip` swaps the strand labels of every
/// track once it is complete. Tracks are returned in reference order.
///
pub fn count_coverage(
    source: &mut dyn AlignmentSource,
    sizing: &TrackSizing,
    flip: bool,
) -> Result<Vec<CoverageTrack>> {
    let strategy = select_strategy(StrategyChoice::Auto, source)?;
    let policy = StrandPolicy::new(flip);

    let mut tracks = Vec::with_capacity(source.references().len());
    strategy.accumulate(source, sizing, &mut |track| {
        tracks.push(policy.apply(track));
        Ok(())
    })?;

    Ok(tracks)
}
