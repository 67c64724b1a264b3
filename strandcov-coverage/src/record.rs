use strandcov_core::models::ReferenceSequence;

use crate::errors::{CoverageError, Result};

///
/// The fields of one alignment record that coverage accumulation looks at.
///
/// Coordinates are 0-based; `alignment_end` is exclusive. For unmapped records the
/// positional fields carry no meaning.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignedRecord {
    pub is_unmapped: bool,
    pub is_proper_pair: bool,
    pub is_first_in_pair: bool,
    pub is_reverse_strand: bool,
    pub start: u64,
    pub alignment_end: u64,
    pub mate_position: Option<u64>,
    pub insert_size: i64,
    pub reference_index: usize,
}

pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<AlignedRecord>> + 'a>;

///
/// Anything that can hand out alignment records.
///
/// Every source supports a full sequential pass. Sources that carry a positional index
/// additionally report [`AlignmentSource::has_index`] and implement
/// [`AlignmentSource::fetch`], which yields the records of a single reference.
///
pub trait AlignmentSource {
    /// Reference sequences in header order; record reference indices point into this.
    fn references(&self) -> &[ReferenceSequence];

    /// All records, in file order.
    fn records(&mut self) -> Result<RecordIter<'_>>;

    fn has_index(&self) -> bool {
        false
    }

    /// Records placed on the reference at `reference_index`.
    fn fetch(&mut self, reference_index: usize) -> Result<RecordIter<'_>> {
        let _ = reference_index;
        Err(CoverageError::MissingIndex)
    }
}

///
/// An alignment source backed by records held in memory.
///
/// Useful when records come from somewhere other than a SAM/BAM file. Whether it
/// behaves as indexed is up to the caller.
///
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    references: Vec<ReferenceSequence>,
    records: Vec<AlignedRecord>,
    indexed: bool,
}

impl InMemorySource {
    pub fn new(references: Vec<ReferenceSequence>, records: Vec<AlignedRecord>) -> Self {
        InMemorySource {
            references,
            records,
            indexed: false,
        }
    }

    pub fn with_index(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AlignmentSource for InMemorySource {
    fn references(&self) -> &[ReferenceSequence] {
        &self.references
    }

    fn records(&mut self) -> Result<RecordIter<'_>> {
        Ok(Box::new(self.records.iter().copied().map(Ok)))
    }

    fn has_index(&self) -> bool {
        self.indexed
    }

    fn fetch(&mut self, reference_index: usize) -> Result<RecordIter<'_>> {
        if !self.indexed {
            return Err(CoverageError::MissingIndex);
        }
        if reference_index >= self.references.len() {
            return Err(CoverageError::UnknownReference(reference_index));
        }

        Ok(Box::new(
            self.records
                .iter()
                .filter(move |record| {
                    !record.is_unmapped && record.reference_index == reference_index
                })
                .copied()
                .map(Ok),
        ))
    }
}
