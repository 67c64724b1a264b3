use std::fs::File;
use std::path::Path;

use log::debug;
use noodles::bam;
use noodles::bgzf::Reader;
use noodles::core::Region;
use noodles::sam;

use strandcov_core::models::ReferenceSequence;
use strandcov_core::utils::bam_index_path;

use super::fields::{reference_sequences, to_aligned_record};
use crate::errors::{CoverageError, Result};
use crate::record::{AlignmentSource, RecordIter};

enum BamReader {
    Sequential(bam::io::Reader<Reader<File>>),
    Indexed(bam::io::IndexedReader<Reader<File>>),
}

///
/// A BAM file as an [`AlignmentSource`].
///
/// When a `<file>.bam.bai` index sits next to the file the source reports an index and
/// supports per-reference fetches.
///
pub struct BamSource {
    reader: BamReader,
    header: sam::Header,
    references: Vec<ReferenceSequence>,
}

impl BamSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let index_path = bam_index_path(path);

        let mut reader = if index_path.exists() {
            debug!("Using BAM index {}", index_path.display());
            BamReader::Indexed(
                bam::io::indexed_reader::Builder::default().build_from_path(path)?,
            )
        } else {
            debug!("No BAM index found for {}", path.display());
            BamReader::Sequential(File::open(path).map(bam::io::Reader::new)?)
        };

        let header = match &mut reader {
            BamReader::Sequential(reader) => reader.read_header()?,
            BamReader::Indexed(reader) => reader.read_header()?,
        };
        let references = reference_sequences(&header);

        Ok(BamSource {
            reader,
            header,
            references,
        })
    }
}

impl AlignmentSource for BamSource {
    fn references(&self) -> &[ReferenceSequence] {
        &self.references
    }

    fn records(&mut self) -> Result<RecordIter<'_>> {
        let header = &self.header;
        let records: Box<dyn Iterator<Item = std::io::Result<bam::Record>> + '_> =
            match &mut self.reader {
                BamReader::Sequential(reader) => Box::new(reader.records()),
                BamReader::Indexed(reader) => Box::new(reader.records()),
            };

        Ok(Box::new(records.map(move |result| {
            let record = result?;
            to_aligned_record(&record, header)
        })))
    }

    fn has_index(&self) -> bool {
        matches!(self.reader, BamReader::Indexed(_))
    }

    fn fetch(&mut self, reference_index: usize) -> Result<RecordIter<'_>> {
        let name = self
            .references
            .get(reference_index)
            .ok_or(CoverageError::UnknownReference(reference_index))?
            .name
            .clone();

        let BamReader::Indexed(reader) = &mut self.reader else {
            return Err(CoverageError::MissingIndex);
        };

        let header = &self.header;
        let region = Region::new(name, ..);
        let query = reader.query(header, &region)?;

        Ok(Box::new(query.map(move |result| {
            let record = result?;
            to_aligned_record(&record, header)
        })))
    }
}
