//! Report rendering.
//!
//! Turns the ordered record list into a report file. Every format shares
//! the same contract: the target file is created (or truncated) before any
//! data is written, and a failure to create it aborts the run.
//!
//! `log_level` 1 writes the summary table, 2 adds one per-frame detail
//! table per record. Level 0 leaves an empty report file.

pub mod spreadsheet;
pub mod text;

use crate::error::{CoreError, CoreResult};
use crate::metrics::MetricsRecord;

use log::{info, warn};

use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Summary table columns, in output order. `AvgGradient` is spreadsheet-only.
pub const SUMMARY_COLUMNS: [&str; 9] = [
    "Qp",
    "BitRate",
    "AvgPsnr",
    "YPsnr",
    "UPsnr",
    "VPsnr",
    "EncTime",
    "Sequence",
    "AvgGradient",
];

/// Per-frame detail columns, in output order. `Gradient` is present when
/// the frames carry it (always present in spreadsheets).
pub const DETAIL_COLUMNS: [&str; 8] = [
    "SliceType",
    "QP",
    "BitRate",
    "AvgPsnr",
    "YPsnr",
    "UPsnr",
    "VPsnr",
    "Gradient",
];

/// Report file format, selected by output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Tab-aligned text with a `.log` extension.
    Log,
    /// Tab-aligned text with a `.txt` extension.
    Txt,
    /// Accepted as a selector but writes nothing.
    Csv,
    /// Multi-sheet spreadsheet.
    Xlsx,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Log,
        OutputFormat::Txt,
        OutputFormat::Csv,
        OutputFormat::Xlsx,
    ];

    /// File extension including the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Log => ".log",
            OutputFormat::Txt => ".txt",
            OutputFormat::Csv => ".csv",
            OutputFormat::Xlsx => ".xlsx",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('.');
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.extension()[1..].eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownOutputFormat(s.to_string()))
    }
}

/// Full path of the report file: `<output_dir>/<output_name><ext>`.
#[must_use]
pub fn report_path(output_dir: &Path, output_name: &str, format: OutputFormat) -> PathBuf {
    output_dir.join(format!("{output_name}{}", format.extension()))
}

/// Creates the output directory if needed and the (truncated) report file.
fn create_report_file(path: &Path) -> CoreResult<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CoreError::PathError(format!(
                "Failed to create output directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }
    let file = File::create(path).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to create report file '{}': {}",
            path.display(),
            e
        ))
    })?;
    ensure_created(path)?;
    Ok(file)
}

fn ensure_created(path: &Path) -> CoreResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CoreError::OutputNotCreated(path.to_path_buf()))
    }
}

/// Writes the report for `records` and returns the file written.
///
/// The csv selector is a deliberate no-op: nothing is created and `None`
/// is returned.
pub fn render_report(
    records: &[MetricsRecord],
    output_dir: &Path,
    output_name: &str,
    format: OutputFormat,
    log_level: u8,
) -> CoreResult<Option<PathBuf>> {
    let path = report_path(output_dir, output_name, format);

    match format {
        OutputFormat::Csv => {
            warn!(
                "CSV output is not supported; no report written for {}",
                path.display()
            );
            return Ok(None);
        }
        OutputFormat::Log | OutputFormat::Txt => {
            let file = create_report_file(&path)?;
            let mut writer = BufWriter::new(file);
            text::write_text_report(&mut writer, records, log_level)?;
        }
        OutputFormat::Xlsx => {
            // The workbook is assembled in memory; creating the file first
            // keeps the create-then-write contract and surfaces path errors
            // before any work is done.
            create_report_file(&path)?;
            spreadsheet::write_workbook(&path, records, log_level)?;
            ensure_created(&path)?;
        }
    }

    info!("Report written to {}", path.display());
    Ok(Some(path))
}
