// ============================================================================
// encinfo-core/src/pipeline.rs
// ============================================================================
//
// REPORT PIPELINE: Discovery to Rendered Report
//
// Runs one report end to end:
//
//   discover -> parse -> filter -> order -> render
//
// Parsing may run on the rayon pool; ordering and rendering only start once
// every file has been parsed. The first error from any stage aborts the run.
//
// KEY COMPONENTS:
// - generate_report: the whole run for one ReportConfig
// - ReportOutcome: counts and the report path for the caller to display

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- External crate imports ----
use log::info;

// ---- Internal crate imports ----
use crate::config::ReportConfig;
use crate::discovery::find_log_files;
use crate::error::CoreResult;
use crate::ordering::{filter_named, order_records};
use crate::parsing::parse_logs;
use crate::reporting::render_report;
use crate::utils::count_noun;

/// Summary of a finished report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Log files discovered under the input directory
    pub files_found: usize,
    /// Records left after dropping those without a sequence name
    pub records_parsed: usize,
    /// Entries in the ordered report (placeholders included)
    pub records_reported: usize,
    /// Report file written, `None` for the csv selector
    pub output_path: Option<PathBuf>,
}

/// Generates the report described by `config`.
///
/// # Errors
///
/// * `CoreError::Config` - if the configuration is invalid
/// * `CoreError::Walkdir` - if the input directory cannot be walked
/// * parse errors (`MalformedLine`, `MissingFrameField`, `InvalidNumber`,
///   `EmptyRecord`) for the first offending file
/// * `CoreError::PathError` / `OutputNotCreated` / `Spreadsheet` from rendering
pub fn generate_report(config: &ReportConfig) -> CoreResult<ReportOutcome> {
    config.validate()?;

    info!(
        "Scanning {} for '{}' logs ({} layout, {} sequences)",
        config.input_dir.display(),
        config.input_extension,
        config.encoder,
        config.standard
    );
    let files = find_log_files(&config.input_dir, &config.input_extension)?;
    info!("Found {}", count_noun(files.len(), "log file"));

    let records = parse_logs(&files, config.encoder, config.log_level, config.parallel)?;
    let records = filter_named(records);
    info!("Parsed {} with a sequence name", count_noun(records.len(), "record"));

    let ordered = order_records(&records, config.standard);
    info!(
        "{} in {} order",
        count_noun(ordered.len(), "report row"),
        config.standard
    );

    let output_path = render_report(
        &ordered,
        &config.output_dir,
        &config.output_name,
        config.output_format,
        config.log_level,
    )?;

    Ok(ReportOutcome {
        files_found: files.len(),
        records_parsed: records.len(),
        records_reported: ordered.len(),
        output_path,
    })
}
