use noodles::sam;
use noodles::sam::alignment::Record as SamRecord;

use strandcov_core::models::ReferenceSequence;

use crate::errors::{CoverageError, Result};
use crate::record::AlignedRecord;

/// Reference sequences announced by a SAM/BAM header, in header order.
pub(crate) fn reference_sequences(header: &sam::Header) -> Vec<ReferenceSequence> {
    header
        .reference_sequences()
        .iter()
        .map(|(name, reference_sequence)| {
            ReferenceSequence::new(name.to_string(), Some(reference_sequence.length().get()))
        })
        .collect()
}

///
/// Pull the fields coverage needs out of a SAM or BAM record.
///
/// noodles positions are 1-based and closed, they are turned into 0-based half-open
/// coordinates here.
///
pub(crate) fn to_aligned_record<R>(record: &R, header: &sam::Header) -> Result<AlignedRecord>
where
    R: SamRecord + ?Sized,
{
    let flags = record.flags()?;
    if flags.is_unmapped() {
        return Ok(AlignedRecord {
            is_unmapped: true,
            ..Default::default()
        });
    }

    let reference_index = record
        .reference_sequence_id(header)
        .transpose()?
        .ok_or_else(|| {
            CoverageError::MalformedRecord("mapped record without a reference sequence".into())
        })?;

    let start = record
        .alignment_start()
        .transpose()?
        .ok_or_else(|| CoverageError::MalformedRecord("mapped record without a position".into()))?
        .get() as u64
        - 1;

    let alignment_end = match record.alignment_end().transpose()? {
        Some(end) => (end.get() as u64).max(start),
        None => start,
    };

    let mate_position = record
        .mate_alignment_start()
        .transpose()?
        .map(|position| position.get() as u64 - 1);

    Ok(AlignedRecord {
        is_unmapped: false,
        is_proper_pair: flags.is_properly_segmented(),
        is_first_in_pair: flags.is_first_segment(),
        is_reverse_strand: flags.is_reverse_complemented(),
        start,
        alignment_end,
        mate_position,
        insert_size: i64::from(record.template_length()?),
        reference_index,
    })
}
