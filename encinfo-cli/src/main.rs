// encinfo-cli/src/main.rs
//
// Entry point of the encinfo binary.
//
// Responsibilities:
// - Parsing command-line arguments.
// - Installing the logger.
// - Dispatching to the selected command.
// - Mapping failures to an error message on stderr and exit status 1.

use clap::Parser;
use encinfo_cli::{Cli, Commands, logging, run_report, run_sequences};
use log::debug;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    debug!("Parsed arguments: {cli:?}");

    let result = match &cli.command {
        Commands::Report(args) => run_report(args).map(|_| ()),
        Commands::Sequences(args) => run_sequences(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
