//! Run statistics reported alongside the extracted lines.
use crate::types::LineKind;
use serde::Serialize;

/// Counters and timings of one extraction.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    /// Lines around local-minimum plateaus.
    pub min_lines: usize,
    /// Lines around local-maximum plateaus.
    pub max_lines: usize,
    /// Lines through saddle points.
    pub saddle_lines: usize,
    /// Plateaus examined by the extremum pass.
    pub plateaus: usize,
    /// Plateaus discarded because they touch the frame or are not extrema.
    pub rejected_plateaus: usize,
    /// Cells containing a saddle point.
    pub saddle_cells: usize,
    /// Distinct quantized saddle levels.
    pub saddle_levels: usize,
    /// Lines dropped because they reach the image frame, counted once per
    /// line and level.
    pub open_lines: usize,
    /// Total number of polyline vertices.
    pub points: usize,
    pub extrema_ms: f64,
    pub saddles_ms: f64,
}

impl ExtractionStats {
    pub fn lines(&self) -> usize {
        self.min_lines + self.max_lines + self.saddle_lines
    }

    pub(crate) fn count_line(&mut self, kind: LineKind, points: usize) {
        match kind {
            LineKind::Min => self.min_lines += 1,
            LineKind::Max => self.max_lines += 1,
            LineKind::Saddle => self.saddle_lines += 1,
            LineKind::Regular => {}
        }
        self.points += points;
    }
}
