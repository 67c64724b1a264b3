use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use strandcov_coverage::{
    ConversionConfig, GffOptions, SeqId, StrategyChoice, TrackSizing, convert_alignment_file,
};

pub fn run_sam2gff(matches: &ArgMatches) -> Result<()> {
    // get arguments from CLI
    let alignment_path = matches
        .get_one::<String>("alignment_path")
        .expect("A path to an alignment file is required.");
    let output_path = matches.get_one::<String>("output_path");

    let chromosome_size = *matches
        .get_one::<usize>("chromosome_size")
        .expect("chromosome_size has a default");
    let threads = *matches
        .get_one::<usize>("threads")
        .expect("threads has a default");

    let strategy = matches
        .get_one::<String>("strategy")
        .expect("strategy has a default");
    let strategy = match StrategyChoice::from_str(strategy) {
        Ok(strategy) => strategy,
        Err(_err) => anyhow::bail!("Unknown strategy supplied: {}", strategy),
    };

    let seqid = match matches.get_flag("reference_seqid") {
        true => SeqId::Reference,
        false => SeqId::Fixed(
            matches
                .get_one::<String>("seqid")
                .expect("seqid has a default")
                .to_owned(),
        ),
    };

    // coerce arguments to types
    let config = ConversionConfig {
        sizing: TrackSizing::with_fallback(chromosome_size),
        flip: matches.get_flag("flip"),
        strategy,
        threads,
        gff: GffOptions {
            seqid,
            log_scale: matches.get_flag("log_scale"),
            separate_strand: matches.get_flag("separate_strand"),
        },
    };

    let (output, summary) = convert_alignment_file(
        Path::new(alignment_path),
        output_path.map(Path::new),
        &config,
    )
    .with_context(|| format!("Failed to convert {}", alignment_path))?;

    info!(
        "Coverage of {} references written to {}",
        summary.references,
        output.display()
    );

    Ok(())
}
