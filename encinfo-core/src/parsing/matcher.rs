//! Line matcher: marker detection and fixed-offset token extraction.
//!
//! Encoder logs are free-form text where a marker word (`Frames`, `Time`,
//! `POC`, ...) identifies a line and the interesting value sits at a fixed
//! word position. Tokens come from splitting on runs of whitespace with the
//! empty leading/trailing pieces kept, so an indented line has an empty
//! token at offset 0. Every layout offset in this crate counts that way.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace split pattern is valid"));

/// A marker matched but the line has no token at the requested offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetOutOfRange {
    pub offset: usize,
    pub token_count: usize,
}

impl fmt::Display for OffsetOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "offset {} out of range for {} tokens",
            self.offset, self.token_count
        )
    }
}

impl std::error::Error for OffsetOutOfRange {}

/// Splits a line on runs of whitespace, keeping empty edge tokens.
#[must_use]
pub fn split_tokens(line: &str) -> Vec<&str> {
    WHITESPACE_RUN.split(line).collect()
}

/// Splits a line with a layout-specific delimiter pattern.
#[must_use]
pub fn split_with<'a>(line: &'a str, delimiter: &Regex) -> Vec<&'a str> {
    delimiter.split(line).collect()
}

/// Returns the token at `offset`, or an error naming the short line.
pub fn token_at<'a>(tokens: &[&'a str], offset: usize) -> Result<&'a str, OffsetOutOfRange> {
    tokens.get(offset).copied().ok_or(OffsetOutOfRange {
        offset,
        token_count: tokens.len(),
    })
}

/// Tests `line` for `pattern` and, when present, returns the whitespace
/// token at `offset`.
///
/// `Ok(None)` means the marker is absent. A present marker with a short
/// line is an error: the layout assumes marker lines are always
/// well-shaped, so a short one means the wrong layout was chosen.
pub fn match_token<'a>(
    line: &'a str,
    pattern: &Regex,
    offset: usize,
) -> Result<Option<&'a str>, OffsetOutOfRange> {
    if !pattern.is_match(line) {
        return Ok(None);
    }
    let tokens = split_tokens(line);
    token_at(&tokens, offset).map(Some)
}
