//! Tab-aligned text report shared by the `.log` and `.txt` formats.

use crate::error::CoreResult;
use crate::metrics::{FrameSample, MetricsRecord};
use crate::reporting::{DETAIL_COLUMNS, SUMMARY_COLUMNS};

use std::io::Write;

const SUMMARY_WIDTHS: [usize; 8] = [7, 13, 7, 7, 7, 7, 13, 13];
const SEQUENCE_WIDTHS: [usize; 2] = [13, 13];
// The derived YUV-PSNR cell is printed with a fixed precision and no padding.
const DETAIL_WIDTHS: [usize; 8] = [13, 5, 13, 0, 7, 7, 7, 7];

/// Writes one row: each cell left-aligned to its width, cells separated by
/// `" \t"`, the row closed by `" \n"`.
fn write_row<W: Write, S: AsRef<str>>(writer: &mut W, cells: &[S], widths: &[usize]) -> CoreResult<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join(" \t");
    writeln!(writer, "{line} ")?;
    Ok(())
}

fn summary_cells(record: &MetricsRecord) -> [&str; 8] {
    [
        record.sequence_qp.as_str(),
        record.avg_bit_rate.as_str(),
        record.avg_yuv_psnr.as_str(),
        record.avg_y_psnr.as_str(),
        record.avg_u_psnr.as_str(),
        record.avg_v_psnr.as_str(),
        record.encode_time.as_str(),
        record.sequence_name.as_str(),
    ]
}

fn detail_cells(frame: &FrameSample, with_gradient: bool) -> Vec<String> {
    let mut cells = vec![
        frame.frame_type.clone(),
        frame.qp.clone(),
        frame.bit_rate.clone(),
        format!("{:.4}", frame.yuv_psnr),
        frame.y_psnr.clone(),
        frame.u_psnr.clone(),
        frame.v_psnr.clone(),
    ];
    if with_gradient {
        cells.push(frame.gradient.clone().unwrap_or_default());
    }
    cells
}

fn write_detail<W: Write>(writer: &mut W, record: &MetricsRecord) -> CoreResult<()> {
    write_row(writer, &["Sequence", record.sequence_name.as_str()], &SEQUENCE_WIDTHS)?;

    let with_gradient = record.has_gradient();
    let columns = if with_gradient {
        &DETAIL_COLUMNS[..]
    } else {
        &DETAIL_COLUMNS[..DETAIL_COLUMNS.len() - 1]
    };
    write_row(writer, columns, &DETAIL_WIDTHS)?;

    for frame in &record.frames {
        write_row(writer, &detail_cells(frame, with_gradient), &DETAIL_WIDTHS)?;
    }
    Ok(())
}

/// Writes the text report for `records` at the given verbosity.
pub fn write_text_report<W: Write>(writer: &mut W, records: &[MetricsRecord], log_level: u8) -> CoreResult<()> {
    if log_level > 0 {
        write_row(writer, &SUMMARY_COLUMNS[..SUMMARY_WIDTHS.len()], &SUMMARY_WIDTHS)?;
        for record in records {
            write_row(writer, &summary_cells(record), &SUMMARY_WIDTHS)?;
        }
    }

    if log_level > 1 {
        for record in records {
            write_detail(writer, record)?;
        }
    }

    writer.flush()?;
    Ok(())
}
