//! Multi-sheet `.xlsx` report.
//!
//! A `Summary` sheet with one row per record, followed at log level 2 by one
//! sheet per record holding its per-frame rows. Values that parse as finite
//! numbers are stored as numbers so the sheets can be charted directly.

use crate::error::CoreResult;
use crate::metrics::{FrameSample, MetricsRecord};
use crate::reporting::{DETAIL_COLUMNS, SUMMARY_COLUMNS};

use log::debug;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use std::collections::HashSet;
use std::path::Path;

const MAX_SHEET_NAME_LEN: usize = 31;
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Tracks sheet names already used in a workbook. Excel compares them
/// case-insensitively.
#[derive(Debug, Default)]
struct SheetNames {
    used: HashSet<String>,
}

impl SheetNames {
    /// Returns a valid sheet name derived from `wanted` that is not used yet.
    fn claim(&mut self, wanted: &str) -> String {
        let base = sanitize_sheet_name(wanted);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.used.contains(&candidate.to_lowercase()) {
            let tail = format!("_{suffix}");
            let keep = MAX_SHEET_NAME_LEN - tail.chars().count();
            let head: String = base.chars().take(keep).collect();
            candidate = format!("{head}{tail}");
            suffix += 1;
        }
        self.used.insert(candidate.to_lowercase());
        candidate
    }
}

/// Replaces characters Excel rejects in sheet names and truncates to the
/// maximum length. An empty result becomes `Sheet`.
fn sanitize_sheet_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if INVALID_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = replaced.trim_matches('\'');
    let truncated: String = trimmed.chars().take(MAX_SHEET_NAME_LEN).collect();
    let truncated = truncated.trim_end_matches('\'');
    if truncated.is_empty() {
        "Sheet".to_string()
    } else {
        truncated.to_string()
    }
}

/// Writes `value` as a number when it parses as a finite float, as text
/// otherwise. Empty values leave the cell blank.
fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: &str) -> CoreResult<()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => {
            sheet.write_number(row, col, number)?;
        }
        _ => {
            sheet.write_string(row, col, value)?;
        }
    }
    Ok(())
}

fn write_header(sheet: &mut Worksheet, columns: &[&str], bold: &Format) -> CoreResult<()> {
    for (col, title) in (0u16..).zip(columns) {
        sheet.write_string_with_format(0, col, *title, bold)?;
    }
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, records: &[MetricsRecord], bold: &Format) -> CoreResult<()> {
    write_header(sheet, &SUMMARY_COLUMNS, bold)?;
    for (row, record) in (1u32..).zip(records) {
        let cells = [
            &record.sequence_qp,
            &record.avg_bit_rate,
            &record.avg_yuv_psnr,
            &record.avg_y_psnr,
            &record.avg_u_psnr,
            &record.avg_v_psnr,
            &record.encode_time,
        ];
        for (col, value) in (0u16..).zip(cells) {
            write_value(sheet, row, col, value)?;
        }
        // Sequence names such as "Johnny" or "22" stay text.
        sheet.write_string(row, 7, &record.sequence_name)?;
        write_value(sheet, row, 8, &record.avg_gradient)?;
    }
    Ok(())
}

fn write_frame_row(sheet: &mut Worksheet, row: u32, frame: &FrameSample) -> CoreResult<()> {
    sheet.write_string(row, 0, &frame.frame_type)?;
    write_value(sheet, row, 1, &frame.qp)?;
    write_value(sheet, row, 2, &frame.bit_rate)?;
    if frame.yuv_psnr.is_finite() {
        sheet.write_number(row, 3, frame.yuv_psnr)?;
    }
    write_value(sheet, row, 4, &frame.y_psnr)?;
    write_value(sheet, row, 5, &frame.u_psnr)?;
    write_value(sheet, row, 6, &frame.v_psnr)?;
    if let Some(gradient) = &frame.gradient {
        write_value(sheet, row, 7, gradient)?;
    }
    Ok(())
}

fn write_detail_sheet(sheet: &mut Worksheet, record: &MetricsRecord, bold: &Format) -> CoreResult<()> {
    write_header(sheet, &DETAIL_COLUMNS, bold)?;
    for (row, frame) in (1u32..).zip(&record.frames) {
        write_frame_row(sheet, row, frame)?;
    }
    Ok(())
}

/// Builds the workbook for `records` and saves it to `path`, replacing any
/// existing file.
pub fn write_workbook(path: &Path, records: &[MetricsRecord], log_level: u8) -> CoreResult<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let mut names = SheetNames::default();

    if log_level == 0 {
        workbook.add_worksheet();
    } else {
        let sheet = workbook.add_worksheet();
        sheet.set_name(names.claim("Summary"))?;
        write_summary_sheet(sheet, records, &bold)?;
    }

    if log_level > 1 {
        for record in records {
            let name = names.claim(&record.sequence_name);
            debug!("Adding detail sheet '{}' ({} frames)", name, record.frames.len());
            let sheet = workbook.add_worksheet();
            sheet.set_name(name)?;
            write_detail_sheet(sheet, record, &bold)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
