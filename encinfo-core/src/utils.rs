//! Small formatting helpers shared by the library and the CLI.

use std::time::Duration;

/// Formats an elapsed time for log output.
///
/// Runs under a minute are shown in seconds with two decimals ("4.27s"),
/// longer ones as HH:MM:SS (3725s -> "01:02:05").
#[must_use]
pub fn format_duration(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    if seconds < 60.0 {
        return format!("{seconds:.2}s");
    }

    let total_seconds = elapsed.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Pluralizes `noun` for log messages ("1 file", "3 files").
#[must_use]
pub fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
