//! Core library for extracting metrics from video encoder logs.
//!
//! Parses HM, VTM, VVenC and x265 logs into per-sequence records (bitrate,
//! PSNR, encode time, per-frame statistics), orders them against the HEVC or
//! VVC common-test-condition sequence lists and renders text or spreadsheet
//! reports.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use encinfo_core::config::ReportConfigBuilder;
//! use encinfo_core::{Encoder, OutputFormat, Standard, generate_report};
//!
//! let config = ReportConfigBuilder::new()
//!     .input_dir("/path/to/logs")
//!     .input_extension("txt")
//!     .encoder(Encoder::Vtm)
//!     .standard(Standard::Vvc)
//!     .output_format(OutputFormat::Xlsx)
//!     .log_level(2)
//!     .build()
//!     .unwrap();
//!
//! let outcome = generate_report(&config).unwrap();
//! println!("{} logs -> {:?}", outcome.files_found, outcome.output_path);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod metrics;
pub mod ordering;
pub mod parsing;
pub mod pipeline;
pub mod reporting;
pub mod utils;

// Re-exports for public API
pub use config::{ReportConfig, ReportConfigBuilder};
pub use discovery::find_log_files;
pub use error::{CoreError, CoreResult};
pub use metrics::{FrameSample, MetricsRecord};
pub use ordering::{Standard, filter_named, order_records};
pub use parsing::{Encoder, parse_log, parse_logs};
pub use pipeline::{ReportOutcome, generate_report};
pub use reporting::{OutputFormat, render_report};
pub use utils::format_duration;
