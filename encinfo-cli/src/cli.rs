// encinfo-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use encinfo_core::config::{DEFAULT_INPUT_EXTENSION, DEFAULT_OUTPUT_NAME};
use encinfo_core::{Encoder, OutputFormat, Standard};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "encinfo: Encoder log metrics extractor",
    long_about = "Extracts bitrate, PSNR, encode time and per-frame statistics from \
                  HM, VTM, VVenC and x265 logs and writes summary reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG overrides this when set)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parses encoder logs from a directory and writes a report
    Report(ReportArgs),
    /// Prints the canonical sequence list of a test-condition standard
    Sequences(SequencesArgs),
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Directory searched recursively for encoder logs
    #[arg(short = 'i', long = "input", required = true, value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Extension of the log files (e.g. log, txt, csv)
    #[arg(long = "input-type", value_name = "EXT", default_value = DEFAULT_INPUT_EXTENSION)]
    pub input_type: String,

    /// Directory where the report is written (created if missing)
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Report file name without extension
    #[arg(long = "output-name", value_name = "NAME", default_value = DEFAULT_OUTPUT_NAME)]
    pub output_name: String,

    /// Report format: log, txt, csv (writes nothing) or xlsx
    #[arg(long = "output-type", value_name = "TYPE", default_value = "log", value_parser = parse_output_format)]
    pub output_type: OutputFormat,

    /// Encoder that produced the logs: HM, VTM, VVENC or X265
    #[arg(short = 'e', long = "encoder", required = true, value_name = "ENCODER", value_parser = parse_encoder)]
    pub encoder: Encoder,

    /// Common test conditions whose sequence list orders the report: HEVC or VVC
    #[arg(long = "ctc", value_name = "STANDARD", default_value = "HEVC", value_parser = parse_standard)]
    pub standard: Standard,

    /// 0 = no metrics, 1 = summary, 2 = summary and per-frame detail
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub log_level: u8,

    /// Parse files one at a time instead of in parallel
    #[arg(long, default_value_t = false)]
    pub sequential: bool,
}

#[derive(Args, Debug)]
pub struct SequencesArgs {
    /// Standard whose list is printed: HEVC or VVC
    #[arg(long = "ctc", value_name = "STANDARD", default_value = "HEVC", value_parser = parse_standard)]
    pub standard: Standard,
}

fn parse_encoder(value: &str) -> Result<Encoder, String> {
    value.parse().map_err(|e: encinfo_core::CoreError| e.to_string())
}

fn parse_standard(value: &str) -> Result<Standard, String> {
    value.parse().map_err(|e: encinfo_core::CoreError| e.to_string())
}

fn parse_output_format(value: &str) -> Result<OutputFormat, String> {
    value.parse().map_err(|e: encinfo_core::CoreError| e.to_string())
}
