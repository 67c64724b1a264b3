use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use log::info;

use strandcov_core::models::Region;
use strandcov_core::utils::get_dynamic_reader_w_stdin;

use crate::consts::{BED_BLANK_FIELD, DEFAULT_BED_SCORE};
use crate::error::{GffError, Result};
use crate::gff::{GffRecord, Score};

pub trait GffWrite {
    ///
    /// Write the region as one feature record labelled with `source`
    ///
    /// # Arguments
    /// - writer: the sink to write to
    /// - source: the label written into the second column
    fn write_gff<W: Write + ?Sized>(&self, writer: &mut W, source: &str) -> std::io::Result<()>;
}

impl GffWrite for Region {
    fn write_gff<W: Write + ?Sized>(&self, writer: &mut W, source: &str) -> std::io::Result<()> {
        // 4th column is the feature id, 5th the score
        let mut extra = self.rest_fields();
        let id = extra.next().unwrap_or(BED_BLANK_FIELD);
        let score = extra.next().unwrap_or(DEFAULT_BED_SCORE);

        GffRecord {
            seqid: &self.chr,
            source,
            feature: BED_BLANK_FIELD,
            start: self.start as u64,
            end: self.end as u64,
            score: Score::Text(score),
            strand: BED_BLANK_FIELD,
            frame: BED_BLANK_FIELD,
            attribute: id,
        }
        .write_to(writer)
    }
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("track")
        || trimmed.starts_with("browser")
}

///
/// Rewrite every row of a region list into the feature format, row by row.
///
/// Returns the number of records written.
///
pub fn convert_regions_to_gff<R: BufRead, W: Write + ?Sized>(
    reader: R,
    writer: &mut W,
    source: &str,
) -> Result<usize> {
    let mut written = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if is_skippable(&line) {
            continue;
        }

        let region = Region::from_bed_line(line.trim_end_matches('\r')).map_err(|reason| {
            GffError::MalformedRow {
                line: index + 1,
                reason,
            }
        })?;

        region.write_gff(writer, source)?;
        written += 1;
    }

    Ok(written)
}

///
/// Convert a region list file (optionally gzipped, or `-` for stdin) into a feature file.
///
/// # Arguments
/// - input: the region list to read
/// - output: the path to write to, parent directories are created
/// - source: the label written into the second column
pub fn bed_to_gff<P: AsRef<Path>>(input: &str, output: P, source: &str) -> Result<usize> {
    let output = output.as_ref();
    let reader = get_dynamic_reader_w_stdin(input)?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(output)?);
    let written = convert_regions_to_gff(reader, &mut writer, source)?;
    writer.flush()?;

    info!("Wrote {} features to {}", written, output.display());

    Ok(written)
}
