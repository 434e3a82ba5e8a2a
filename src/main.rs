//! exp_violin command-line interface

use clap::Parser;
use log::{info, LevelFilter};

use exp_violin::cli::Cli;
use exp_violin::run_report;

fn main() {
    // A missing required flag exits here with clap's usage message
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let config = cli.into_config();
    match run_report(&config) {
        Ok(outputs) => info!("Done! {} figures in {}", outputs.len(), config.output_dir.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
