//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Parses a directory of encoder logs and writes the report.
pub mod report;

/// Prints the canonical sequence list of a standard.
pub mod sequences;
