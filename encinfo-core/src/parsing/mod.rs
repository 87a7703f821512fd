//! Encoder log parsing.
//!
//! One scanning algorithm per layout family (whitespace text and CSV),
//! driven by the per-encoder tables in [`layout`]. A parse consumes one log
//! file and produces one [`MetricsRecord`].
//!
//! `log_level` selects how much is read: 0 reads only the sequence name,
//! 1 adds the summary values and encode time, 2 adds per-frame rows.

pub mod layout;
pub mod matcher;

pub use layout::{BodyLayout, CsvLayout, Encoder, EncoderLayout, SummaryOffsets, TextLayout};
pub use matcher::{OffsetOutOfRange, match_token, split_tokens};

use crate::error::{CoreError, CoreResult};
use crate::metrics::{FrameSample, MetricsRecord, weighted_yuv_psnr};
use matcher::{split_with, token_at};

use log::debug;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

use std::fs;
use std::path::{Path, PathBuf};

static SEQUENCE_QP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*_(\d+)").expect("sequence QP pattern is valid"));

/// Derives the sequence name from a log path using the layout's filename
/// patterns. Returns an empty string when no pattern matches.
#[must_use]
pub fn sequence_name(path: &Path, layout: &EncoderLayout) -> String {
    let path_str = path.to_string_lossy();
    layout
        .filename_patterns
        .iter()
        .find_map(|pattern| pattern.captures(&path_str))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Trailing number after the last underscore of a sequence name.
#[must_use]
pub fn sequence_qp(sequence_name: &str) -> String {
    SEQUENCE_QP
        .captures(sequence_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Parses one encoder log into a metrics record.
///
/// A missing file yields an empty record, which the record filter drops
/// later. When metrics are requested, an existing file that yields nothing
/// at all is an error: it almost always means the wrong encoder was
/// selected.
pub fn parse_log(path: &Path, encoder: Encoder, log_level: u8) -> CoreResult<MetricsRecord> {
    if !path.is_file() {
        debug!("Skipping missing log file: {}", path.display());
        return Ok(MetricsRecord::default());
    }

    let layout = encoder.layout();
    let mut record = MetricsRecord::default();
    record.sequence_name = sequence_name(path, layout);
    record.sequence_qp = sequence_qp(&record.sequence_name);

    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);

    match &layout.body {
        BodyLayout::Text(text) => scan_text(path, &content, text, log_level, &mut record)?,
        BodyLayout::Csv(csv) => scan_csv(path, &content, csv, log_level, &mut record)?,
    }

    if log_level > 0 && record.is_empty() {
        return Err(CoreError::EmptyRecord {
            path: path.to_path_buf(),
            encoder: encoder.to_string(),
        });
    }

    debug!(
        "Parsed {} as '{}' ({} frames)",
        path.display(),
        record.sequence_name,
        record.frames.len()
    );
    Ok(record)
}

/// Parses every log in `paths`, preserving order. Files are independent,
/// so they may be parsed on the rayon pool; the first error aborts.
pub fn parse_logs(
    paths: &[PathBuf],
    encoder: Encoder,
    log_level: u8,
    parallel: bool,
) -> CoreResult<Vec<MetricsRecord>> {
    if parallel {
        paths
            .par_iter()
            .map(|path| parse_log(path, encoder, log_level))
            .collect()
    } else {
        paths
            .iter()
            .map(|path| parse_log(path, encoder, log_level))
            .collect()
    }
}

/// Position of a line inside the file being parsed, for error reporting.
struct LineContext<'a> {
    path: &'a Path,
    line_number: usize,
    line: &'a str,
}

impl LineContext<'_> {
    fn token<'t>(&self, tokens: &[&'t str], offset: usize) -> CoreResult<&'t str> {
        token_at(tokens, offset).map_err(|err| self.malformed(err))
    }

    fn malformed(&self, err: OffsetOutOfRange) -> CoreError {
        CoreError::MalformedLine {
            path: self.path.to_path_buf(),
            line_number: self.line_number,
            offset: err.offset,
            token_count: err.token_count,
            line: self.line.trim_end().to_string(),
        }
    }

    fn missing(&self, field: &'static str) -> CoreError {
        CoreError::MissingFrameField {
            path: self.path.to_path_buf(),
            line_number: self.line_number,
            field,
        }
    }

    fn number(&self, value: &str) -> CoreResult<f64> {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::InvalidNumber {
                path: self.path.to_path_buf(),
                line_number: self.line_number,
                value: value.to_string(),
            })
    }
}

fn read_summary(
    tokens: &[&str],
    offsets: &SummaryOffsets,
    ctx: &LineContext<'_>,
    record: &mut MetricsRecord,
) -> CoreResult<()> {
    record.avg_bit_rate = ctx.token(tokens, offsets.bit_rate)?.to_string();
    record.avg_y_psnr = ctx.token(tokens, offsets.y_psnr)?.to_string();
    record.avg_u_psnr = ctx.token(tokens, offsets.u_psnr)?.to_string();
    record.avg_v_psnr = ctx.token(tokens, offsets.v_psnr)?.to_string();
    record.avg_yuv_psnr = ctx.token(tokens, offsets.yuv_psnr)?.to_string();
    Ok(())
}

/// Fills in the plane PSNR values and the derived YUV-PSNR of a frame.
fn finish_frame(
    mut frame: FrameSample,
    y_psnr: Option<&str>,
    u_psnr: Option<&str>,
    v_psnr: Option<&str>,
    ctx: &LineContext<'_>,
) -> CoreResult<FrameSample> {
    let y_psnr = y_psnr.ok_or_else(|| ctx.missing("Y-PSNR"))?;
    let u_psnr = u_psnr.ok_or_else(|| ctx.missing("U-PSNR"))?;
    let v_psnr = v_psnr.ok_or_else(|| ctx.missing("V-PSNR"))?;

    frame.yuv_psnr = weighted_yuv_psnr(ctx.number(y_psnr)?, ctx.number(u_psnr)?, ctx.number(v_psnr)?);
    frame.y_psnr = y_psnr.to_string();
    frame.u_psnr = u_psnr.to_string();
    frame.v_psnr = v_psnr.to_string();
    Ok(frame)
}

fn without_trailing_char(token: &str) -> &str {
    let mut chars = token.chars();
    chars.next_back();
    chars.as_str()
}

// ============================================================================
// TEXT LAYOUT (HM, VTM, VVenC)
// ============================================================================

fn scan_text(
    path: &Path,
    content: &str,
    layout: &TextLayout,
    log_level: u8,
    record: &mut MetricsRecord,
) -> CoreResult<()> {
    // Keep the newline on each line so edge tokens count like the encoders'
    // own column positions.
    let mut lines = content.split_inclusive('\n').enumerate();

    while let Some((index, first_line)) = lines.next() {
        let mut ctx = LineContext {
            path,
            line_number: index + 1,
            line: first_line,
        };

        if log_level > 0 {
            if layout.frame_count_marker.is_match(ctx.line) {
                // Summary values sit on the line after the marker; the
                // remaining checks of this iteration apply to that line.
                ctx = match lines.next() {
                    Some((next_index, next_line)) => LineContext {
                        path,
                        line_number: next_index + 1,
                        line: next_line,
                    },
                    None => LineContext {
                        path,
                        line_number: index + 2,
                        line: "",
                    },
                };

                let tokens = split_tokens(ctx.line);
                let trusted = match layout.summary_guard {
                    Some((offset, expected)) => ctx.token(&tokens, offset)? == expected,
                    None => true,
                };
                if trusted {
                    read_summary(&tokens, &layout.summary, &ctx, record)?;
                }
            }

            if let Some(time) = match_token(ctx.line, &layout.time_marker, layout.time_offset)
                .map_err(|err| ctx.malformed(err))?
            {
                record.encode_time = time.to_string();
            }
        }

        if log_level > 1 && layout.frame_marker.is_match(ctx.line) {
            parse_keyed_frame(layout, &ctx, record)?;
        }
    }

    Ok(())
}

/// Parses a `POC ...` / `... Gradient ...` detail line where each value
/// follows (or, for `bits`, precedes) its keyword.
fn parse_keyed_frame(
    layout: &TextLayout,
    ctx: &LineContext<'_>,
    record: &mut MetricsRecord,
) -> CoreResult<()> {
    let tokens = split_tokens(ctx.line);
    let next = |index: usize| ctx.token(&tokens, index + 1);

    let mut frame = FrameSample::default();
    let mut is_frame = false;
    let (mut y_psnr, mut u_psnr, mut v_psnr) = (None, None, None);

    for (index, token) in tokens.iter().enumerate() {
        if token.contains("SLICE") {
            frame.frame_type = without_trailing_char(token).to_string();
            is_frame = true;
            continue;
        }
        match *token {
            "QP" => {
                let qp = next(index)?;
                frame.qp = if layout.qp_has_trailing_delimiter {
                    without_trailing_char(qp).to_string()
                } else {
                    qp.to_string()
                };
            }
            "bits" => {
                let bits = index
                    .checked_sub(1)
                    .map(|prev| tokens[prev])
                    .ok_or_else(|| ctx.missing("bit count"))?;
                frame.bit_rate = bits.to_string();
            }
            "[Y" => y_psnr = Some(next(index)?),
            "U" => u_psnr = Some(next(index)?),
            "V" => v_psnr = Some(next(index)?),
            "Gradient" if layout.has_gradient => {
                frame.gradient = Some(next(index)?.to_string());
            }
            "Avg" if layout.has_gradient => {
                record.avg_gradient = next(index)?.to_string();
            }
            _ => {}
        }
    }

    // A marker line without slice type or plane values (e.g. the average
    // gradient line) contributes only what was read above.
    if !is_frame && y_psnr.is_none() && u_psnr.is_none() && v_psnr.is_none() {
        return Ok(());
    }

    let frame = finish_frame(frame, y_psnr, u_psnr, v_psnr, ctx)?;
    record.frames.push(frame);
    Ok(())
}

// ============================================================================
// CSV LAYOUT (x265)
// ============================================================================

fn scan_csv(
    path: &Path,
    content: &str,
    layout: &CsvLayout,
    log_level: u8,
    record: &mut MetricsRecord,
) -> CoreResult<()> {
    let lines: Vec<&str> = content.lines().collect();
    let last_index = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .unwrap_or_default();

    for (index, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let ctx = LineContext {
            path,
            line_number: index + 1,
            line,
        };

        if log_level > 0 && index == last_index {
            let fields = split_with(line, &layout.delimiter);
            read_summary(&fields, &layout.summary, &ctx, record)?;
            record.encode_time = ctx.token(&fields, layout.time_column)?.to_string();
            continue;
        }

        if log_level > 1 {
            if layout.skip_markers.iter().any(|marker| line.contains(marker)) {
                continue;
            }
            let fields = split_with(line, &layout.delimiter);
            let columns = &layout.frame;
            let frame = FrameSample {
                frame_type: ctx.token(&fields, columns.frame_type)?.to_string(),
                qp: ctx.token(&fields, columns.qp)?.to_string(),
                bit_rate: ctx.token(&fields, columns.bit_rate)?.to_string(),
                ..FrameSample::default()
            };
            let frame = finish_frame(
                frame,
                Some(ctx.token(&fields, columns.y_psnr)?),
                Some(ctx.token(&fields, columns.u_psnr)?),
                Some(ctx.token(&fields, columns.v_psnr)?),
                &ctx,
            )?;
            record.frames.push(frame);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    const HM_LOG: &str = "\
HM software: Encoder Version [16.20]
POC    0 TId: 0 ( I-SLICE, nQP 37 QP 37 )     123456 bits [Y 40.0000 dB    U 42.0000 dB    V 44.0000 dB] [ET     1 ] Gradient 12.5
POC    8 TId: 0 ( B-SLICE, nQP 40 QP 40 )      23456 bits [Y 38.0000 dB    U 41.0000 dB    V 43.0000 dB] [ET     1 ] Gradient 10.5
Frame Gradient Avg 11.5


SUMMARY --------------------------------------------------------
\tTotal Frames |   Bitrate     Y-PSNR    U-PSNR    V-PSNR    YUV-PSNR
\t        2    a    1234.5600   39.0000   41.5000   43.5000   40.0000


I Slices--------------------------------------------------------
\tTotal Frames |   Bitrate     Y-PSNR    U-PSNR    V-PSNR    YUV-PSNR
\t        1    i    9999.0000   40.0000   42.0000   44.0000   41.0000

 Total Time:       12.345 sec. [user]       12.001 sec. [elapsed]
";

    const VVENC_LOG: &str = "\
vvencapp: Fraunhofer VVC Encoder ver. 1.9.0
POC    0 TId: 0 ( IDR_W_RADL, I-SLICE, QP 37, TL 0 )     100000 bits [Y 40.0000 dB    U 40.0000 dB    V 40.0000 dB]
POC    4 TId: 1 ( TRAIL, B-SLICE, QP 38, TL 1 )      2000 bits [Y 36.0000 dB    U 38.0000 dB    V 38.0000 dB]

\tTotal Frames |   Bitrate     Y-PSNR    U-PSNR    V-PSNR    YUV-PSNR
\t        2    a     1234 37.5 38.1 39.0 37.9
 Total Time:       55.000 sec.
";

    const X265_CSV: &str = "\
Command, x265 --input Johnny.yuv --csv Johnny_32_x265.csv
Encode Order, Type, POC, QP, Bits, Scenecut, RateFactor, Y PSNR, U PSNR, V PSNR, YUV PSNR
0, I-SLICE, 0, 32.00, 40000, 1, 0.00, 42.000, 44.000, 46.000, 42.750

1, P-SLICE, 4, 34.00, 8000, 0, 0.00, 40.000, 43.000, 45.000, 41.000
Summary, 12.5, 1.75, 31.99, 880.32, 41.100, 43.500, 45.500, 42.000
";

    #[test]
    fn test_sequence_qp() {
        assert_eq!(sequence_qp("Cactus_1920x1080_50_22"), "22");
        assert_eq!(sequence_qp("Cactus_1920x1080"), "1920");
        assert_eq!(sequence_qp("Cactus"), "");
        assert_eq!(sequence_qp(""), "");
    }

    #[test]
    fn test_sequence_name_is_stable() {
        let path = Path::new("logs/BQMall_832x480_60_37.log");
        let first = sequence_name(path, Encoder::Hm.layout());
        let second = sequence_name(path, Encoder::Hm.layout());
        assert_eq!(first, "BQMall_832x480_60_37");
        assert_eq!(first, second);
        assert_eq!(sequence_qp(&first), sequence_qp(&second));
    }

    #[test]
    fn test_missing_file_yields_empty_record() {
        let record = parse_log(Path::new("/surely/not/here/Cactus_22.log"), Encoder::Hm, 2).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_hm_summary_uses_all_frames_row() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "Cactus_1920x1080_50_37.log", HM_LOG);
        let record = parse_log(&path, Encoder::Hm, 1).unwrap();

        assert_eq!(record.sequence_name, "Cactus_1920x1080_50_37");
        assert_eq!(record.sequence_qp, "37");
        assert_eq!(record.avg_bit_rate, "1234.5600");
        assert_eq!(record.avg_y_psnr, "39.0000");
        assert_eq!(record.avg_u_psnr, "41.5000");
        assert_eq!(record.avg_v_psnr, "43.5000");
        assert_eq!(record.avg_yuv_psnr, "40.0000");
        assert_eq!(record.encode_time, "12.345");
        assert!(record.frames.is_empty());
        assert_eq!(record.avg_gradient, "");
    }

    #[test]
    fn test_hm_frames_and_gradient() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "Cactus_1920x1080_50_37.log", HM_LOG);
        let record = parse_log(&path, Encoder::Hm, 2).unwrap();

        assert_eq!(record.frames.len(), 2);
        let first = &record.frames[0];
        assert_eq!(first.frame_type, "I-SLICE");
        assert_eq!(first.qp, "37");
        assert_eq!(first.bit_rate, "123456");
        assert_eq!(first.y_psnr, "40.0000");
        assert_eq!(first.u_psnr, "42.0000");
        assert_eq!(first.v_psnr, "44.0000");
        assert_eq!(first.yuv_psnr, (6.0 * 40.0 + 42.0 + 44.0) / 8.0);
        assert_eq!(first.gradient.as_deref(), Some("12.5"));
        assert_eq!(record.frames[1].frame_type, "B-SLICE");
        assert_eq!(record.avg_gradient, "11.5");
    }

    #[test]
    fn test_vvenc_round_trip_summary() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "Campfire_37_enc.log", VVENC_LOG);
        let record = parse_log(&path, Encoder::Vvenc, 1).unwrap();

        assert_eq!(record.avg_bit_rate, "1234");
        assert_eq!(record.avg_y_psnr, "37.5");
        assert_eq!(record.avg_u_psnr, "38.1");
        assert_eq!(record.avg_v_psnr, "39.0");
        assert_eq!(record.avg_yuv_psnr, "37.9");
        assert_eq!(record.encode_time, "55.000");
    }

    #[test]
    fn test_text_summary_offsets() {
        let dir = TempDir::new().unwrap();
        let log = "\tTotal Frames |   Bitrate     Y-PSNR\n      33    a     1234 37.5 38.1 39.0 37.9\n";
        let path = write_log(&dir, "BQMall_37.txt", log);
        let record = parse_log(&path, Encoder::Vtm, 1).unwrap();

        assert_eq!(record.avg_bit_rate, "1234");
        assert_eq!(record.avg_y_psnr, "37.5");
        assert_eq!(record.avg_u_psnr, "38.1");
        assert_eq!(record.avg_v_psnr, "39.0");
        assert_eq!(record.avg_yuv_psnr, "37.9");
    }

    #[test]
    fn test_vvenc_frames_strip_delimiters() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "Campfire_37_enc.log", VVENC_LOG);
        let record = parse_log(&path, Encoder::Vvenc, 2).unwrap();

        assert_eq!(record.frames.len(), 2);
        assert_eq!(record.frames[0].frame_type, "I-SLICE");
        assert_eq!(record.frames[0].qp, "37");
        assert_eq!(record.frames[0].bit_rate, "100000");
        assert_eq!(record.frames[0].yuv_psnr, 40.0);
        assert_eq!(record.frames[1].qp, "38");
        assert_eq!(record.frames[1].yuv_psnr, (6.0 * 36.0 + 38.0 + 38.0) / 8.0);
        assert!(record.frames.iter().all(|frame| frame.gradient.is_none()));
    }

    #[test]
    fn test_x265_csv() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "Johnny_32_x265.csv", X265_CSV);
        let record = parse_log(&path, Encoder::X265, 2).unwrap();

        assert_eq!(record.sequence_name, "Johnny_32");
        assert_eq!(record.sequence_qp, "32");
        assert_eq!(record.encode_time, "1.75");
        assert_eq!(record.avg_bit_rate, "880.32");
        assert_eq!(record.avg_y_psnr, "41.100");
        assert_eq!(record.avg_u_psnr, "43.500");
        assert_eq!(record.avg_v_psnr, "45.500");
        assert_eq!(record.avg_yuv_psnr, "42.000");

        assert_eq!(record.frames.len(), 2);
        assert_eq!(record.frames[0].frame_type, "I-SLICE");
        assert_eq!(record.frames[0].qp, "32.00");
        assert_eq!(record.frames[0].bit_rate, "40000");
        assert_eq!(record.frames[0].yuv_psnr, (6.0 * 42.0 + 44.0 + 46.0) / 8.0);
        assert_eq!(record.frames[1].frame_type, "P-SLICE");
    }

    #[test]
    fn test_x265_csv_trailing_blank_lines() {
        let dir = TempDir::new().unwrap();
        let content = format!("{X265_CSV}\n  \n");
        let path = write_log(&dir, "Johnny_32_x265.csv", &content);

        let record = parse_log(&path, Encoder::X265, 1).unwrap();
        assert_eq!(record.avg_bit_rate, "880.32");
        assert_eq!(record.encode_time, "1.75");
        assert_eq!(record.avg_yuv_psnr, "42.000");

        let record = parse_log(&path, Encoder::X265, 2).unwrap();
        assert_eq!(record.avg_bit_rate, "880.32");
        assert_eq!(record.frames.len(), 2);
    }

    #[test]
    fn test_level_zero_reads_only_the_name() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "Cactus_1920x1080_50_37.log", HM_LOG);
        let record = parse_log(&path, Encoder::Hm, 0).unwrap();

        assert_eq!(record.sequence_name, "Cactus_1920x1080_50_37");
        assert!(!record.has_metrics());
    }

    #[test]
    fn test_empty_result_is_an_error() {
        let dir = TempDir::new().unwrap();
        // No `_<digits>` suffix, so VTM cannot name it, and no markers.
        let path = write_log(&dir, "notes.txt", "nothing useful here\n");
        let result = parse_log(&path, Encoder::Vtm, 2);
        assert!(matches!(result, Err(CoreError::EmptyRecord { .. })));
    }

    #[test]
    fn test_short_summary_line_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "BQMall_37.txt", "\tTotal Frames |\n 33 a 12\n");
        let result = parse_log(&path, Encoder::Vtm, 1);
        match result {
            Err(CoreError::MalformedLine { line_number, offset, .. }) => {
                assert_eq!(line_number, 2);
                // The trailing newline leaves an empty token at offset 4.
                assert_eq!(offset, 5);
            }
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn test_marker_on_last_line_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, "BQMall_37.txt", "\tTotal Frames |");
        let result = parse_log(&path, Encoder::Vtm, 1);
        assert!(matches!(result, Err(CoreError::MalformedLine { .. })));
    }

    #[test]
    fn test_frame_without_psnr_is_an_error() {
        let dir = TempDir::new().unwrap();
        let log = "POC 0 ( I-SLICE, QP 37, ) 1000 bits\n";
        let path = write_log(&dir, "Campfire_37.log", log);
        let result = parse_log(&path, Encoder::Vvenc, 2);
        assert!(matches!(
            result,
            Err(CoreError::MissingFrameField { field: "Y-PSNR", .. })
        ));
    }

    #[test]
    fn test_parse_logs_preserves_order() {
        let dir = TempDir::new().unwrap();
        let first = write_log(&dir, "BQMall_22.txt", "\tTotal Frames\n 1 a 10 30 31 32 33\n");
        let second = write_log(&dir, "BQMall_37.txt", "\tTotal Frames\n 1 a 20 30 31 32 33\n");

        for parallel in [true, false] {
            let records =
                parse_logs(&[first.clone(), second.clone()], Encoder::Vtm, 1, parallel).unwrap();
            assert_eq!(records.len(), 2);
            assert_eq!(records[0].sequence_name, "BQMall_22");
            assert_eq!(records[1].sequence_name, "BQMall_37");
            assert_eq!(records[1].avg_bit_rate, "20");
        }
    }
}
