use anyhow::{Context, Result};
use clap::ArgMatches;

use strandcov_io::bed_to_gff;

pub fn run_bed2gff(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input_path")
        .expect("A path to a BED file is required.");

    let output = matches
        .get_one::<String>("output_path")
        .expect("An output path is required.");

    let source = matches
        .get_one::<String>("source")
        .expect("source has a default");

    bed_to_gff(input, output, source)
        .with_context(|| format!("Failed to convert {} to {}", input, output))?;

    Ok(())
}
