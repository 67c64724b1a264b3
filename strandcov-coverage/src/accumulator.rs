use strandcov_core::models::{ReferenceSequence, Strand};

use crate::consts::DEFAULT_CHROMOSOME_SIZE;
use crate::errors::{CoverageError, Result};
use crate::record::AlignedRecord;

///
/// A half-open interval `[start, end)` that one record adds to one strand.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub strand: Strand,
    pub start: usize,
    pub end: usize,
}

///
/// The interval a record contributes to coverage, if any.
///
/// - unmapped records contribute nothing
/// - reads outside of a proper pair cover `[start, alignment_end)` on their own strand
/// - second mates of a proper pair contribute nothing, the first mate stands in for the
///   whole fragment
/// - a reverse first mate covers `[mate_position, alignment_end)` on the minus strand
/// - a forward first mate covers `[start, start + insert_size)` on the plus strand
///
/// Empty or reversed spans contribute nothing.
///
pub fn contribution(record: &AlignedRecord) -> Option<Contribution> {
    if record.is_unmapped {
        return None;
    }

    let (strand, start, end) = if !record.is_proper_pair {
        let strand = match record.is_reverse_strand {
            true => Strand::Minus,
            false => Strand::Plus,
        };
        (strand, record.start as i64, record.alignment_end as i64)
    } else if !record.is_first_in_pair {
        return None;
    } else if record.is_reverse_strand {
        (
            Strand::Minus,
            record.mate_position? as i64,
            record.alignment_end as i64,
        )
    } else {
        let start = record.start as i64;
        (Strand::Plus, start, start + record.insert_size)
    };

    (end > start).then_some(Contribution {
        strand,
        start: start as usize,
        end: end as usize,
    })
}

///
/// How long the coverage arrays of each reference are.
///
/// References with a declared length get that length plus one. SAM/BAM headers always
/// declare one, so `fallback` only sizes references of sources that leave it out, such as
/// an [`crate::InMemorySource`].
///
#[derive(Debug, Clone)]
pub struct TrackSizing {
    /// Array length for references without a declared length.
    pub fallback: usize,
}

impl Default for TrackSizing {
    fn default() -> Self {
        TrackSizing {
            fallback: DEFAULT_CHROMOSOME_SIZE,
        }
    }
}

impl TrackSizing {
    pub fn with_fallback(fallback: usize) -> Self {
        TrackSizing { fallback }
    }

    pub fn length_of(&self, reference: &ReferenceSequence) -> usize {
        reference.track_length(self.fallback)
    }
}

///
/// Per-base coverage of one reference sequence, one array per strand.
///
/// Tracks only grow while their reference is being accumulated; afterwards they are
/// handed out read-only. Counts saturate at `u32::MAX`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageTrack {
    name: String,
    plus: Vec<u32>,
    minus: Vec<u32>,
}

impl CoverageTrack {
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        CoverageTrack {
            name: name.into(),
            plus: vec![0; length],
            minus: vec![0; length],
        }
    }

    ///
    /// Wrap already computed dense arrays.
    ///
    /// # Panics
    /// if the two arrays differ in length
    ///
    pub fn from_counts(name: impl Into<String>, plus: Vec<u32>, minus: Vec<u32>) -> Self {
        assert_eq!(plus.len(), minus.len(), "strand arrays must be equally long");
        CoverageTrack {
            name: name.into(),
            plus,
            minus,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.plus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plus.is_empty()
    }

    pub fn counts(&self, strand: Strand) -> &[u32] {
        match strand {
            Strand::Plus => &self.plus,
            Strand::Minus => &self.minus,
        }
    }

    ///
    /// Covered positions of one strand with their counts, in increasing position order
    ///
    pub fn nonzero(&self, strand: Strand) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts(strand)
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(position, count)| (position, *count))
    }

    /// Sum of all counts on one strand.
    pub fn total(&self, strand: Strand) -> u64 {
        self.counts(strand).iter().map(|c| *c as u64).sum()
    }

    pub(crate) fn add(&mut self, contribution: Contribution) -> Result<()> {
        let length = self.len();
        if contribution.end > length {
            return Err(CoverageError::OutOfBounds {
                reference: self.name.clone(),
                end: contribution.end,
                length,
            });
        }

        let counts = match contribution.strand {
            Strand::Plus => &mut self.plus,
            Strand::Minus => &mut self.minus,
        };
        for count in &mut counts[contribution.start..contribution.end] {
            *count = count.saturating_add(1);
        }

        Ok(())
    }

    pub(crate) fn add_record(&mut self, record: &AlignedRecord) -> Result<()> {
        match contribution(record) {
            Some(contribution) => self.add(contribution),
            None => Ok(()),
        }
    }

    pub(crate) fn swap_strands(&mut self) {
        std::mem::swap(&mut self.plus, &mut self.minus);
    }
}
