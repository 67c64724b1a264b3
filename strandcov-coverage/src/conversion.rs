use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use strandcov_core::utils::{FileType, derive_output_path, display_name, get_file_info};

use crate::accumulator::{CoverageTrack, TrackSizing};
use crate::alignment::open_alignment_source;
use crate::consts::DEFAULT_THREADS;
use crate::errors::Result;
use crate::parallel::par_indexed_bam_coverage;
use crate::record::AlignmentSource;
use crate::strand::StrandPolicy;
use crate::strategy::{CoverageStrategy, StrategyChoice, select_strategy};
use crate::writer::{CoverageGffWriter, GffOptions};

///
/// Everything that shapes an alignment to feature file conversion.
///
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub sizing: TrackSizing,
    pub flip: bool,
    pub strategy: StrategyChoice,
    /// Worker threads for indexed BAM input; 1 keeps everything on the calling thread.
    pub threads: usize,
    pub gff: GffOptions,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            sizing: TrackSizing::default(),
            flip: false,
            strategy: StrategyChoice::Auto,
            threads: DEFAULT_THREADS,
            gff: GffOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub references: usize,
    pub lines: u64,
}

/// Relabels finished tracks and writes them out as they arrive.
struct TrackEmitter<W: Write> {
    policy: StrandPolicy,
    writer: CoverageGffWriter<W>,
    bar: ProgressBar,
    references: usize,
}

impl<W: Write> TrackEmitter<W> {
    fn emit(&mut self, track: CoverageTrack) -> Result<()> {
        let track = self.policy.apply(track);
        self.writer.write_track(&track)?;
        self.references += 1;
        self.bar.inc(1);
        Ok(())
    }

    fn finish(self) -> Result<(W, ConversionSummary)> {
        self.bar.finish_and_clear();
        let summary = ConversionSummary {
            references: self.references,
            lines: self.writer.lines_written(),
        };
        Ok((self.writer.finish()?, summary))
    }
}

///
/// Accumulate coverage from `source` and write it to `writer`.
///
/// # Arguments
/// - source: the alignment records
/// - name: label of the output tracks
/// - config: conversion options
/// - writer: the sink, already open
pub fn convert_source_to_gff<W: Write>(
    source: &mut dyn AlignmentSource,
    name: &str,
    config: &ConversionConfig,
    writer: W,
) -> Result<ConversionSummary> {
    let mut emitter = TrackEmitter {
        policy: StrandPolicy::new(config.flip),
        writer: CoverageGffWriter::new(writer, name, config.gff.clone()),
        bar: ProgressBar::hidden(),
        references: 0,
    };

    let strategy = select_strategy(config.strategy, source)?;
    strategy.accumulate(source, &config.sizing, &mut |track| emitter.emit(track))?;

    let (_, summary) = emitter.finish()?;
    Ok(summary)
}

///
/// Convert a SAM/BAM file into a feature file.
///
/// Without `output_path` the output goes next to the input with its extension replaced
/// by `.gff`; an existing file there aborts the conversion before anything is read. An
/// explicit `output_path` is overwritten.
///
/// The input is opened and the strategy resolved before the output is created. A run
/// that fails after that removes the output again.
///
/// Returns the path written to along with a summary.
pub fn convert_alignment_file(
    alignment_path: &Path,
    output_path: Option<&Path>,
    config: &ConversionConfig,
) -> Result<(PathBuf, ConversionSummary)> {
    let output_path = match output_path {
        Some(path) => path.to_path_buf(),
        None => derive_output_path(alignment_path)?,
    };

    let source = open_alignment_source(alignment_path)?;
    let strategy = select_strategy(config.strategy, source.as_ref())?;

    let parallel = config.threads > 1
        && config.strategy != StrategyChoice::Eager
        && source.has_index()
        && get_file_info(alignment_path).file_type == FileType::BAM;
    let plan = match parallel {
        true => Plan::Parallel {
            references: source.references().len(),
        },
        false => Plan::Sequential(source, strategy),
    };

    let summary = match write_coverage(alignment_path, plan, &output_path, config) {
        Ok(summary) => summary,
        Err(e) => {
            if let Err(remove_error) = fs::remove_file(&output_path) {
                warn!(
                    "Could not remove incomplete output {}: {}",
                    output_path.display(),
                    remove_error
                );
            }
            return Err(e);
        }
    };

    info!(
        "Wrote {} lines for {} references to {}",
        summary.lines,
        summary.references,
        output_path.display()
    );

    Ok((output_path, summary))
}

enum Plan {
    Sequential(Box<dyn AlignmentSource>, Box<dyn CoverageStrategy>),
    /// Indexed BAM input fanned out over `threads` workers, each opening its own reader.
    Parallel { references: usize },
}

fn write_coverage(
    alignment_path: &Path,
    plan: Plan,
    output_path: &Path,
    config: &ConversionConfig,
) -> Result<ConversionSummary> {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let mut emitter = TrackEmitter {
        policy: StrandPolicy::new(config.flip),
        writer: CoverageGffWriter::new(
            BufWriter::new(File::create(output_path)?),
            display_name(alignment_path),
            config.gff.clone(),
        ),
        bar,
        references: 0,
    };

    match plan {
        Plan::Parallel { references } => {
            emitter.bar.set_length(references as u64);
            par_indexed_bam_coverage(alignment_path, &config.sizing, config.threads, &mut |track| {
                emitter.emit(track)
            })?;
        }
        Plan::Sequential(mut source, strategy) => {
            emitter.bar.set_length(source.references().len() as u64);
            strategy.accumulate(source.as_mut(), &config.sizing, &mut |track| emitter.emit(track))?;
        }
    }

    let (_, summary) = emitter.finish()?;
    Ok(summary)
}
