//! Implementation of the 'report' subcommand.
//!
//! Turns the parsed arguments into a `ReportConfig` and hands the run to
//! `encinfo_core::generate_report`.

use crate::cli::ReportArgs;
use crate::error::{CliErrorContext, CliResult};

use encinfo_core::{
    CoreError, ReportConfig, ReportConfigBuilder, ReportOutcome, format_duration, generate_report,
};

use std::time::Instant;

use log::{info, warn};

/// Builds the core configuration from the command-line arguments.
pub fn build_config(args: &ReportArgs) -> CliResult<ReportConfig> {
    ReportConfigBuilder::new()
        .input_dir(args.input_dir.clone())
        .input_extension(&args.input_type)
        .output_dir(args.output_dir.clone())
        .output_name(&args.output_name)
        .output_format(args.output_type)
        .encoder(args.encoder)
        .standard(args.standard)
        .log_level(args.log_level)
        .parallel(!args.sequential)
        .build()
        .cli_context("Invalid report settings")
}

/// Runs the report command and logs a short summary of the run.
pub fn run_report(args: &ReportArgs) -> CliResult<ReportOutcome> {
    let started = Instant::now();
    let config = build_config(args)?;

    info!("========================================");
    info!("encinfo report: {} logs, {} order", config.encoder, config.standard);
    info!("Input directory: {}", config.input_dir.display());
    info!("Output: {}", config.output_dir.join(format!("{}{}", config.output_name, config.output_format)).display());
    info!("========================================");

    if !config.input_dir.is_dir() {
        return Err(CoreError::PathError(format!(
            "Input directory '{}' does not exist",
            config.input_dir.display()
        )));
    }

    let outcome = generate_report(&config)
        .cli_with_context(|| format!("Report for {} failed", config.input_dir.display()))?;

    if outcome.files_found == 0 {
        warn!("No '{}' files found under {}", config.input_extension, config.input_dir.display());
    }
    match &outcome.output_path {
        Some(path) => info!("Report written: {}", path.display()),
        None => info!("No report file written for {}", config.output_format),
    }
    info!(
        "Files: {}, records: {}, report rows: {}",
        outcome.files_found, outcome.records_parsed, outcome.records_reported
    );
    info!("Elapsed: {}", format_duration(started.elapsed()));

    Ok(outcome)
}
