// ============================================================================
// encinfo-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ReportConfig
//
// Fluent construction of a ReportConfig. Every field starts at its default,
// so callers only set what differs; build() validates the result.
//
// KEY COMPONENTS:
// - ReportConfigBuilder: chained setters over a ReportConfig
// - build(): validation and hand-off

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::ReportConfig;
use crate::error::CoreResult;
use crate::ordering::Standard;
use crate::parsing::Encoder;
use crate::reporting::OutputFormat;

/// Builder for creating ReportConfig instances.
///
/// # Examples
///
/// ```rust
/// use encinfo_core::config::ReportConfigBuilder;
/// use encinfo_core::Encoder;
///
/// let config = ReportConfigBuilder::new()
///     .input_dir("logs")
///     .input_extension(".txt")
///     .encoder(Encoder::Vvenc)
///     .output_name("vvenc_ra")
///     .build()
///     .unwrap();
/// assert_eq!(config.input_extension, ".txt");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory searched for logs.
    pub fn input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = input_dir.into();
        self
    }

    /// Sets the log file extension (`log` or `.log`).
    pub fn input_extension(mut self, extension: &str) -> Self {
        self.config.input_extension = extension.to_string();
        self
    }

    /// Sets the directory receiving the report.
    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    /// Sets the report file name, without extension.
    pub fn output_name(mut self, name: &str) -> Self {
        self.config.output_name = name.to_string();
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    pub fn encoder(mut self, encoder: Encoder) -> Self {
        self.config.encoder = encoder;
        self
    }

    pub fn standard(mut self, standard: Standard) -> Self {
        self.config.standard = standard;
        self
    }

    /// Sets the verbosity (0-2).
    pub fn log_level(mut self, level: u8) -> Self {
        self.config.log_level = level;
        self
    }

    /// Enables or disables parsing files in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// * `CoreError::Config` if a value is out of range
    pub fn build(self) -> CoreResult<ReportConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
