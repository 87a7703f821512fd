//! Error types for the encinfo-core library.
//!
//! Every fallible operation in the crate returns [`CoreResult`]. Most
//! variants abort a run: a malformed line or an empty parse result means the
//! wrong encoder layout was selected for the logs, which is a configuration
//! problem rather than something to recover from per file.

use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for encinfo-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory traversal error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error(
        "Malformed line {line_number} in '{}': offset {offset} requested but line has {token_count} tokens: {line:?}",
        .path.display()
    )]
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        offset: usize,
        token_count: usize,
        line: String,
    },

    #[error("Malformed frame line {line_number} in '{}': missing {field}", .path.display())]
    MissingFrameField {
        path: PathBuf,
        line_number: usize,
        field: &'static str,
    },

    #[error("Invalid number '{value}' on line {line_number} in '{}'", .path.display())]
    InvalidNumber {
        path: PathBuf,
        line_number: usize,
        value: String,
    },

    #[error(
        "No metrics extracted from '{}' (is the {encoder} layout the right one for this log?)",
        .path.display()
    )]
    EmptyRecord { path: PathBuf, encoder: String },

    #[error("Unknown encoder '{0}' (expected one of HM, VTM, VVENC, X265)")]
    UnknownEncoder(String),

    #[error("Unknown test-condition standard '{0}' (expected HEVC or VVC)")]
    UnknownStandard(String),

    #[error("Unknown output format '{0}' (expected .log, .txt, .csv or .xlsx)")]
    UnknownOutputFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Report file was not created: {}", .0.display())]
    OutputNotCreated(PathBuf),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for encinfo-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
