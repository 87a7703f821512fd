//! Metrics records extracted from encoder logs.
//!
//! Values are kept as the text tokens found in the log so reports reproduce
//! them verbatim. The only derived value is the per-frame weighted YUV-PSNR.

/// Weighted YUV-PSNR used throughout the reports: `(6*Y + U + V) / 8`.
#[must_use]
pub fn weighted_yuv_psnr(y_psnr: f64, u_psnr: f64, v_psnr: f64) -> f64 {
    (6.0 * y_psnr + u_psnr + v_psnr) / 8.0
}

/// Statistics of one encoded frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSample {
    /// Slice/frame type, e.g. `I-SLICE` or `B`.
    pub frame_type: String,
    pub qp: String,
    /// Bits spent on the frame.
    pub bit_rate: String,
    pub y_psnr: String,
    pub u_psnr: String,
    pub v_psnr: String,
    /// Derived from the Y/U/V values, never read from the log.
    pub yuv_psnr: f64,
    /// Reported verbatim by encoders that print it.
    pub gradient: Option<String>,
}

/// Metrics extracted from one log file.
///
/// Created empty, filled by a single parse of one file and read-only
/// afterwards. Absent summary values are empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsRecord {
    /// Sequence name derived from the file name; empty if unrecognized.
    pub sequence_name: String,
    /// Trailing number after the last underscore of the sequence name.
    pub sequence_qp: String,
    pub avg_bit_rate: String,
    pub avg_y_psnr: String,
    pub avg_u_psnr: String,
    pub avg_v_psnr: String,
    pub avg_yuv_psnr: String,
    pub encode_time: String,
    pub frames: Vec<FrameSample>,
    pub avg_gradient: String,
}

impl MetricsRecord {
    /// "Not coded" entry for a canonical sequence with no matching log.
    #[must_use]
    pub fn placeholder(sequence_name: &str) -> Self {
        Self {
            sequence_name: sequence_name.to_string(),
            ..Self::default()
        }
    }

    /// True when nothing at all was extracted, including the name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence_name.is_empty() && !self.has_metrics()
    }

    /// True when any summary value or frame was extracted.
    #[must_use]
    pub fn has_metrics(&self) -> bool {
        [
            &self.avg_bit_rate,
            &self.avg_y_psnr,
            &self.avg_u_psnr,
            &self.avg_v_psnr,
            &self.avg_yuv_psnr,
            &self.encode_time,
            &self.avg_gradient,
        ]
        .iter()
        .any(|value| !value.is_empty())
            || !self.frames.is_empty()
    }

    /// True when at least one frame reports a gradient value.
    #[must_use]
    pub fn has_gradient(&self) -> bool {
        self.frames.iter().any(|frame| frame.gradient.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_yuv_psnr() {
        assert_eq!(weighted_yuv_psnr(40.0, 40.0, 40.0), 40.0);
        assert_eq!(weighted_yuv_psnr(38.0, 42.0, 44.0), (6.0 * 38.0 + 42.0 + 44.0) / 8.0);
    }

    #[test]
    fn test_placeholder_is_named_but_has_no_metrics() {
        let record = MetricsRecord::placeholder("Cactus");
        assert_eq!(record.sequence_name, "Cactus");
        assert!(!record.is_empty());
        assert!(!record.has_metrics());
        assert!(record.frames.is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(MetricsRecord::default().is_empty());

        let record = MetricsRecord {
            encode_time: "12.5".to_string(),
            ..MetricsRecord::default()
        };
        assert!(!record.is_empty());

        let record = MetricsRecord {
            frames: vec![FrameSample::default()],
            ..MetricsRecord::default()
        };
        assert!(!record.is_empty());
    }

    #[test]
    fn test_has_gradient() {
        let mut record = MetricsRecord {
            frames: vec![FrameSample::default()],
            ..MetricsRecord::default()
        };
        assert!(!record.has_gradient());
        record.frames.push(FrameSample {
            gradient: Some("3.5".to_string()),
            ..FrameSample::default()
        });
        assert!(record.has_gradient());
    }
}
