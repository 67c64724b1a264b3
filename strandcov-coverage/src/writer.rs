use std::borrow::Cow;
use std::io::{self, Write};

use strandcov_core::models::Strand;
use strandcov_io::{GFF_EMPTY_FIELD, GffRecord, Score};

use crate::accumulator::CoverageTrack;
use crate::consts::{COVERAGE_FEATURE_FIELD, DEFAULT_SEQID};

///
/// What goes into the sequence identifier column.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeqId {
    /// The same identifier on every line.
    Fixed(String),
    /// The name of the reference the track belongs to.
    Reference,
}

impl Default for SeqId {
    fn default() -> Self {
        SeqId::Fixed(DEFAULT_SEQID.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GffOptions {
    pub seqid: SeqId,
    /// Write `log2(count)` instead of the count.
    pub log_scale: bool,
    /// Label every line with its strand, `<name>_(+)`, so each strand becomes its own track.
    pub separate_strand: bool,
}

///
/// Writes coverage tracks sparsely: one feature record per base with a non-zero count.
///
/// Within a track, plus strand lines come before minus strand lines and positions
/// increase. Adjacent bases with equal counts are not merged.
///
pub struct CoverageGffWriter<W: Write> {
    writer: W,
    name: String,
    options: GffOptions,
    lines: u64,
}

impl<W: Write> CoverageGffWriter<W> {
    ///
    /// # Arguments
    /// - writer: the sink to write to
    /// - name: label of the tracks, usually the file name of the alignment input
    /// - options: formatting options
    pub fn new(writer: W, name: impl Into<String>, options: GffOptions) -> Self {
        CoverageGffWriter {
            writer,
            name: name.into(),
            options,
            lines: 0,
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    ///
    /// Write every covered base of `track`, returns the number of lines written
    ///
    pub fn write_track(&mut self, track: &CoverageTrack) -> io::Result<u64> {
        let seqid = match &self.options.seqid {
            SeqId::Fixed(seqid) => seqid.as_str(),
            SeqId::Reference => track.name(),
        };

        let mut written = 0;
        for strand in Strand::BOTH {
            let label: Cow<str> = match self.options.separate_strand {
                true => Cow::Owned(format!("{}_({})", self.name, strand)),
                false => Cow::Borrowed(&self.name),
            };

            for (position, count) in track.nonzero(strand) {
                let value = match self.options.log_scale {
                    true => (count as f64).log2(),
                    false => count as f64,
                };

                GffRecord {
                    seqid,
                    source: &label,
                    feature: COVERAGE_FEATURE_FIELD,
                    start: position as u64,
                    end: position as u64,
                    score: Score::Value(value),
                    strand: strand.symbol(),
                    frame: GFF_EMPTY_FIELD,
                    attribute: GFF_EMPTY_FIELD,
                }
                .write_to(&mut self.writer)?;
                written += 1;
            }
        }

        self.lines += written;
        Ok(written)
    }

    ///
    /// Flush and hand back the underlying writer
    ///
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
