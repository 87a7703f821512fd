// ============================================================================
// encinfo-core/src/parsing/layout.rs
// ============================================================================
//
// ENCODER LAYOUTS: Per-Encoder Log Layout Tables
//
// Each supported encoder prints its statistics in its own undocumented text
// layout. Rather than one parser per encoder, this module describes every
// layout as data: filename patterns, marker keywords and fixed word offsets.
// The shared scanning algorithm in `parsing::mod` is driven entirely by
// these tables.
//
// KEY COMPONENTS:
// - Encoder: closed set of supported encoders (HM, VTM, VVenC, x265)
// - EncoderLayout: filename patterns plus the body layout of one encoder
// - TextLayout / CsvLayout: the two body layout families
//
// The offsets below are tied 1:1 to the encoders' output. They are covered
// entry by entry in the tests at the bottom of this file.

// ---- External crate imports ----
use once_cell::sync::Lazy;
use regex::Regex;

// ---- Standard library imports ----
use std::fmt;
use std::str::FromStr;

// ---- Internal crate imports ----
use crate::error::CoreError;

// ============================================================================
// ENCODER SELECTOR
// ============================================================================

/// Video encoders whose logs can be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoder {
    /// HEVC reference encoder (HM), with gradient statistics.
    Hm,
    /// VVC reference encoder (VTM), with gradient statistics.
    Vtm,
    /// Fraunhofer VVenC.
    Vvenc,
    /// x265, reading its CSV statistics output.
    X265,
}

impl Encoder {
    /// All supported encoders in selector order.
    pub const ALL: [Encoder; 4] = [Encoder::Hm, Encoder::Vtm, Encoder::Vvenc, Encoder::X265];

    /// Selector name as accepted on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Encoder::Hm => "HM",
            Encoder::Vtm => "VTM",
            Encoder::Vvenc => "VVENC",
            Encoder::X265 => "X265",
        }
    }

    /// Layout table used to parse this encoder's logs.
    #[must_use]
    pub fn layout(self) -> &'static EncoderLayout {
        match self {
            Encoder::Hm => &HM_LAYOUT,
            Encoder::Vtm => &VTM_LAYOUT,
            Encoder::Vvenc => &VVENC_LAYOUT,
            Encoder::X265 => &X265_LAYOUT,
        }
    }
}

impl fmt::Display for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoder::ALL
            .into_iter()
            .find(|encoder| encoder.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownEncoder(s.to_string()))
    }
}

// ============================================================================
// LAYOUT TABLES
// ============================================================================

/// Word offsets of the summary values on a summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOffsets {
    pub bit_rate: usize,
    pub y_psnr: usize,
    pub u_psnr: usize,
    pub v_psnr: usize,
    pub yuv_psnr: usize,
}

/// Layout of a whitespace-separated text log (HM, VTM, VVenC).
#[derive(Debug)]
pub struct TextLayout {
    /// Marker of the line that precedes the summary values line.
    pub frame_count_marker: Regex,
    /// Offsets on the line following the frame-count marker.
    pub summary: SummaryOffsets,
    /// Token that must sit at the given offset before the offsets are
    /// trusted (HM prints one summary row per slice type; `a` is all frames).
    pub summary_guard: Option<(usize, &'static str)>,
    /// Marker of the total encode time line.
    pub time_marker: Regex,
    pub time_offset: usize,
    /// Marker of a per-frame detail line.
    pub frame_marker: Regex,
    /// VVenC prints `QP 37,` so the QP value carries a trailing delimiter.
    pub qp_has_trailing_delimiter: bool,
    /// Whether detail lines carry `Gradient <v>` and `Avg <v>` pairs.
    pub has_gradient: bool,
}

/// Column positions of a per-frame CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFrameColumns {
    pub frame_type: usize,
    pub qp: usize,
    pub bit_rate: usize,
    pub y_psnr: usize,
    pub u_psnr: usize,
    pub v_psnr: usize,
}

/// Layout of a CSV statistics log (x265).
#[derive(Debug)]
pub struct CsvLayout {
    pub delimiter: Regex,
    /// Columns of the summary row, which is always the last line.
    pub summary: SummaryOffsets,
    pub time_column: usize,
    /// Lines containing any of these words are headers or command echoes.
    pub skip_markers: &'static [&'static str],
    pub frame: CsvFrameColumns,
}

/// Body layout family of an encoder log.
#[derive(Debug)]
pub enum BodyLayout {
    Text(TextLayout),
    Csv(CsvLayout),
}

/// Everything needed to parse one encoder's logs.
#[derive(Debug)]
pub struct EncoderLayout {
    pub encoder: Encoder,
    /// Tried in order against the full file path; the first match wins and
    /// its first capture group is the sequence name.
    pub filename_patterns: Vec<Regex>,
    pub body: BodyLayout,
}

impl EncoderLayout {
    /// Whether this layout reports per-frame gradient values.
    #[must_use]
    pub fn has_gradient(&self) -> bool {
        matches!(&self.body, BodyLayout::Text(text) if text.has_gradient)
    }
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("layout pattern is a valid regex")
}

fn filename_patterns(sources: &[&str]) -> Vec<Regex> {
    sources.iter().map(|source| pattern(source)).collect()
}

/// Summary offsets shared by the three text layouts.
const TEXT_SUMMARY: SummaryOffsets = SummaryOffsets {
    bit_rate: 3,
    y_psnr: 4,
    u_psnr: 5,
    v_psnr: 6,
    yuv_psnr: 7,
};

const TEXT_TIME_OFFSET: usize = 3;

fn text_layout(
    frame_marker: &str,
    summary_guard: Option<(usize, &'static str)>,
    qp_has_trailing_delimiter: bool,
    has_gradient: bool,
) -> BodyLayout {
    BodyLayout::Text(TextLayout {
        frame_count_marker: pattern(r"\sFrames"),
        summary: TEXT_SUMMARY,
        summary_guard,
        time_marker: pattern(r"\sTime"),
        time_offset: TEXT_TIME_OFFSET,
        frame_marker: pattern(frame_marker),
        qp_has_trailing_delimiter,
        has_gradient,
    })
}

static HM_LAYOUT: Lazy<EncoderLayout> = Lazy::new(|| EncoderLayout {
    encoder: Encoder::Hm,
    filename_patterns: filename_patterns(&[
        r"^.*[/\\](.+?)\.txt",
        r"^.*[/\\](.*_\d+)\.log",
        r"^.*[/\\](\D+_\d+).*\.csv",
    ]),
    body: text_layout("Gradient", Some((2, "a")), false, true),
});

static VTM_LAYOUT: Lazy<EncoderLayout> = Lazy::new(|| EncoderLayout {
    encoder: Encoder::Vtm,
    filename_patterns: filename_patterns(&[
        r"^.*[/\\](\D+_\d+)\.txt",
        r"^.*[/\\](.*_\d+)\.log",
        r"^.*[/\\](\D+_\d+)\.csv",
    ]),
    body: text_layout("Gradient", None, false, true),
});

static VVENC_LAYOUT: Lazy<EncoderLayout> = Lazy::new(|| EncoderLayout {
    encoder: Encoder::Vvenc,
    filename_patterns: filename_patterns(&[
        r"^.*[/\\](\D+_-?\d+).*\.txt",
        r"^.*[/\\](\D+_\d+).*\.log",
        r"^.*[/\\](\D+_\d+).*\.csv",
    ]),
    body: text_layout("POC", None, true, false),
});

static X265_LAYOUT: Lazy<EncoderLayout> = Lazy::new(|| EncoderLayout {
    encoder: Encoder::X265,
    filename_patterns: filename_patterns(&[
        r"^.*[/\\](.+?)\.txt",
        r"^.*[/\\](\D+_\d+).*\.log",
        r"^.*[/\\](\D+_\d+).*\.csv",
    ]),
    body: BodyLayout::Csv(CsvLayout {
        delimiter: pattern(r",\s*"),
        summary: SummaryOffsets {
            bit_rate: 4,
            y_psnr: 5,
            u_psnr: 6,
            v_psnr: 7,
            yuv_psnr: 8,
        },
        time_column: 2,
        skip_markers: &["Encode", "Summary", "Command"],
        frame: CsvFrameColumns {
            frame_type: 1,
            qp: 3,
            bit_rate: 4,
            y_psnr: 7,
            u_psnr: 8,
            v_psnr: 9,
        },
    }),
});

// ============================================================================
// TESTS
// ============================================================================
