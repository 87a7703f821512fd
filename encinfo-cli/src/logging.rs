// ============================================================================
// encinfo-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Initialization for the CLI
//
// The library only talks to the `log` facade; this module installs the
// env_logger backend for the binary. Lines are written to stderr so that
// command output on stdout stays clean.
//
// USAGE:
// - default: Info
// - -v/--verbose: Debug
// - RUST_LOG=...: overrides both when set

use log::LevelFilter;
use std::io::Write;

/// Returns the current local time formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Level used when RUST_LOG is not set.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let default_filter = default_level(verbose).to_string().to_lowercase();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                get_timestamp(),
                record.level(),
                record.args()
            )
        })
        .try_init();
}
