mod chrom_interval_index;
mod cli;
mod cnloh_overlay;
mod event_classifier;
mod genome_region;
mod globals;
mod int_range;
mod log_utils;
mod logger;
mod os_utils;
mod overlap;
mod paired;
mod prob_utils;
mod read_inputs;
mod region_filter;
mod run_stats;
mod scored_region;
mod single;
mod stratify;
mod summary_stats;
mod write_outputs;

use std::{error, process};

use hhmmss::Hhmmss;
use log::info;

use crate::cli::Commands;
use crate::globals::{PROGRAM_NAME, PROGRAM_VERSION};
use crate::logger::setup_output_dir_and_logger;
use crate::paired::run_paired;
use crate::single::run_single;

fn run(settings: &cli::Settings) -> Result<(), Box<dyn error::Error>> {
    info!("Starting {PROGRAM_NAME} {PROGRAM_VERSION}");
    info!(
        "cmdline: {}",
        std::env::args().collect::<Vec<_>>().join(" ")
    );
    info!("Running on {} threads", settings.shared.thread_count);

    let start = std::time::Instant::now();

    match &settings.command {
        Commands::Single(x) => {
            run_single(&settings.shared, x)?;
        }
        Commands::Paired(x) => {
            run_paired(&settings.shared, x)?;
        }
    }

    info!(
        "{PROGRAM_NAME} completed. Total Runtime: {}",
        start.elapsed().hhmmssxxx()
    );
    Ok(())
}

fn main() {
    let settings = cli::validate_and_fix_settings(cli::parse_settings());

    // Setup logger, including creation of the output directory for the log file:
    setup_output_dir_and_logger(
        settings.get_output_dir(),
        settings.shared.clobber,
        settings.shared.debug,
    );

    if let Err(err) = run(&settings) {
        eprintln!("{err}");
        process::exit(2);
    }
}
