//! Run configuration for the encinfo-core library.
//!
//! A `ReportConfig` describes one report run: where the logs are, which
//! encoder wrote them, which test-condition list orders them and where the
//! report goes.

mod builder;

use std::path::PathBuf;

pub use builder::ReportConfigBuilder;

use crate::error::{CoreError, CoreResult};
use crate::ordering::Standard;
use crate::parsing::Encoder;
use crate::reporting::OutputFormat;

// Default constants

/// Default directory scanned for logs and receiving the report.
pub const DEFAULT_DIR: &str = ".";

/// Default extension of the encoder logs.
pub const DEFAULT_INPUT_EXTENSION: &str = "log";

/// Default report file name, without extension.
pub const DEFAULT_OUTPUT_NAME: &str = "result";

/// Default verbosity: summary table only.
pub const DEFAULT_LOG_LEVEL: u8 = 1;

/// Highest verbosity: summary plus per-frame detail.
pub const MAX_LOG_LEVEL: u8 = 2;

/// Configuration of one report run.
///
/// # Examples
///
/// ```rust
/// use encinfo_core::config::ReportConfigBuilder;
/// use encinfo_core::{Encoder, OutputFormat, Standard};
/// use std::path::PathBuf;
///
/// let config = ReportConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/logs"))
///     .encoder(Encoder::Vtm)
///     .standard(Standard::Vvc)
///     .output_format(OutputFormat::Xlsx)
///     .log_level(2)
///     .build()
///     .unwrap();
/// assert_eq!(config.output_name, "result");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Directory searched recursively for encoder logs
    pub input_dir: PathBuf,

    /// Extension of the log files, with or without the leading dot
    pub input_extension: String,

    /// Directory receiving the report (created if missing)
    pub output_dir: PathBuf,

    /// Report file name without extension
    pub output_name: String,

    pub output_format: OutputFormat,

    /// Encoder whose log layout is parsed
    pub encoder: Encoder,

    /// Standard whose canonical sequence list orders the report
    pub standard: Standard,

    /// 0 = no metrics, 1 = summary, 2 = summary and per-frame detail
    pub log_level: u8,

    /// Parse files on the rayon thread pool
    pub parallel: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_DIR),
            input_extension: DEFAULT_INPUT_EXTENSION.to_string(),
            output_dir: PathBuf::from(DEFAULT_DIR),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            output_format: OutputFormat::Log,
            encoder: Encoder::Hm,
            standard: Standard::Hevc,
            log_level: DEFAULT_LOG_LEVEL,
            parallel: true,
        }
    }
}

impl ReportConfig {
    /// Checks the values the type system cannot.
    pub fn validate(&self) -> CoreResult<()> {
        if self.log_level > MAX_LOG_LEVEL {
            return Err(CoreError::Config(format!(
                "log level must be between 0 and {}, got {}",
                MAX_LOG_LEVEL, self.log_level
            )));
        }
        if self.output_name.trim().is_empty() {
            return Err(CoreError::Config("output name must not be empty".to_string()));
        }
        if self.output_name.contains(['/', '\\']) {
            return Err(CoreError::Config(format!(
                "output name '{}' must not contain a path separator",
                self.output_name
            )));
        }
        if self.input_extension.trim_start_matches('.').is_empty() {
            return Err(CoreError::Config("input extension must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.input_extension, "log");
        assert_eq!(config.output_format, OutputFormat::Log);
        assert_eq!(config.encoder, Encoder::Hm);
        assert_eq!(config.standard, Standard::Hevc);
        assert_eq!(config.log_level, 1);
        assert!(config.parallel);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            ReportConfig { log_level: 3, ..ReportConfig::default() },
            ReportConfig { output_name: " ".to_string(), ..ReportConfig::default() },
            ReportConfig { output_name: "out/result".to_string(), ..ReportConfig::default() },
            ReportConfig { output_name: "out\\result".to_string(), ..ReportConfig::default() },
            ReportConfig { input_extension: ".".to_string(), ..ReportConfig::default() },
        ];
        for config in &bad {
            assert!(
                matches!(config.validate(), Err(CoreError::Config(_))),
                "expected {config:?} to be rejected"
            );
        }
    }
}
