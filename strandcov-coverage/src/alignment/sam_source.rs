use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use noodles::sam;

use strandcov_core::models::ReferenceSequence;

use super::fields::{reference_sequences, to_aligned_record};
use crate::errors::Result;
use crate::record::{AlignmentSource, RecordIter};

///
/// A plain text SAM file as an [`AlignmentSource`]. SAM files carry no index, so only
/// sequential passes are supported.
///
pub struct SamSource {
    reader: sam::io::Reader<BufReader<File>>,
    header: sam::Header,
    references: Vec<ReferenceSequence>,
}

impl SamSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = File::open(path.as_ref())
            .map(BufReader::new)
            .map(sam::io::Reader::new)?;
        let header = reader.read_header()?;
        let references = reference_sequences(&header);

        Ok(SamSource {
            reader,
            header,
            references,
        })
    }
}

impl AlignmentSource for SamSource {
    fn references(&self) -> &[ReferenceSequence] {
        &self.references
    }

    fn records(&mut self) -> Result<RecordIter<'_>> {
        let SamSource { reader, header, .. } = self;
        let mut record = sam::Record::default();

        Ok(Box::new(std::iter::from_fn(move || {
            match reader.read_record(&mut record) {
                Ok(0) => None,
                Ok(_) => Some(to_aligned_record(&record, header)),
                Err(e) => Some(Err(e.into())),
            }
        })))
    }
}
