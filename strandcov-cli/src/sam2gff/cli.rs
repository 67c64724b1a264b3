use clap::{Arg, ArgAction, Command, arg};

use strandcov_coverage::consts::{DEFAULT_CHROMOSOME_SIZE, DEFAULT_SEQID, DEFAULT_THREADS};

pub const SAM2GFF_CMD: &str = "sam2gff";

pub fn create_sam2gff_cli() -> Command {
    Command::new(SAM2GFF_CMD)
        .author("Databio")
        .about("Count strand-specific per-base coverage of a SAM/BAM file and write it as feature records.")
        .arg(
            Arg::new("alignment_path")
                .required(true)
                .help("Path to a .sam or .bam file, a .bam.bai next to it enables indexed access"),
        )
        .arg(
            Arg::new("output_path")
                .required(false)
                .help("Defaults to the input path with a .gff extension, which must not exist yet"),
        )
        .arg(
            Arg::new("chromosome_size")
                .long("chromosome_size")
                .value_parser(clap::value_parser!(usize))
                .default_value(DEFAULT_CHROMOSOME_SIZE.to_string())
                .help("Track length for references that declare no length. SAM/BAM headers always declare one, so file input never uses it"),
        )
        .arg(
            arg!(--flip)
                .help("Swap plus and minus strand labels, for libraries read off the opposite strand")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("separate_strand")
                .long("separate_strand")
                .action(ArgAction::SetTrue)
                .help("Label each strand as its own track"),
        )
        .arg(
            Arg::new("log_scale")
                .long("log_scale")
                .action(ArgAction::SetTrue)
                .help("Write log2 of the counts"),
        )
        .arg(
            arg!(--seqid <seqid>)
                .help("Sequence identifier written on every line")
                .default_value(DEFAULT_SEQID)
                .conflicts_with("reference_seqid"),
        )
        .arg(
            Arg::new("reference_seqid")
                .long("reference-seqid")
                .action(ArgAction::SetTrue)
                .help("Use the reference name of each track as sequence identifier"),
        )
        .arg(
            arg!(--strategy <strategy>)
                .help("Accumulation strategy: auto, eager or indexed")
                .default_value("auto"),
        )
        .arg(
            arg!(--threads <threads>)
                .help("Worker threads for indexed BAM input")
                .value_parser(clap::value_parser!(usize))
                .default_value(DEFAULT_THREADS.to_string()),
        )
}
