mod bed2gff;
mod sam2gff;

use anyhow::Result;
use clap::Command;
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "strandcov";
    pub const BIN_NAME: &str = "strandcov";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Strand-specific per-base coverage tracks from SAM/BAM alignments, written as 9 column feature records.")
        .subcommand_required(true)
        .subcommand(bed2gff::cli::create_bed2gff_cli())
        .subcommand(sam2gff::cli::create_sam2gff_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // BED REFORMATTING
        //
        Some((bed2gff::cli::BED2GFF_CMD, matches)) => {
            bed2gff::handlers::run_bed2gff(matches)?;
        }

        //
        // ALIGNMENT COVERAGE
        //
        Some((sam2gff::cli::SAM2GFF_CMD, matches)) => {
            sam2gff::handlers::run_sam2gff(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
