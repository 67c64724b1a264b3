use clap::{Arg, Command, arg};

use strandcov_io::DEFAULT_BED_SOURCE;

pub const BED2GFF_CMD: &str = "bed2gff";

pub fn create_bed2gff_cli() -> Command {
    Command::new(BED2GFF_CMD)
        .author("Databio")
        .about("Reformat a BED region list (optionally gzipped, '-' for stdin) into 9 column feature records.")
        .arg(Arg::new("input_path").required(true))
        .arg(Arg::new("output_path").required(true))
        .arg(
            arg!(--source <source>)
                .help("Label for the second column")
                .default_value(DEFAULT_BED_SOURCE),
        )
}
