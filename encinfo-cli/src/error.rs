// ============================================================================
// encinfo-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses the core error type; this module only adds a way to wrap
// lower-level failures with a message naming what the CLI was doing.
//
// KEY COMPONENTS:
// - CliResult: Type alias for CLI operations
// - CliErrorContext: prefixes a failed step's error with what the CLI was doing

// ---- Internal crate imports ----
use encinfo_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Prefixes the error of a failed report step with a description of the
/// step. The result is `CoreError::OperationFailed("<context>: <error>")`.
pub trait CliErrorContext<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;

    /// Like `cli_context`, but only builds the message on failure.
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{context}: {core_error}"))
        })
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", f(), core_error))
        })
    }
}
