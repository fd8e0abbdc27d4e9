use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subpixel position; samples sit at integer coordinates.
pub type Point = Point2<f64>;

/// Index of a line in the extractor output.
pub type LineId = usize;

/// Nature of the singular level a line is traced at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Regular,
    Min,
    Saddle,
    Max,
}

/// Closed polyline of the bilinear surface at a constant level.
///
/// The first point lies on the horizontal edgel the trace started from; the
/// last point is where the trace re-entered that edgel, so closure is implicit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelLine {
    pub level: f64,
    pub kind: LineKind,
    pub points: Vec<Point>,
}

impl LevelLine {
    pub fn new(level: f64, kind: LineKind) -> Self {
        Self {
            level,
            kind,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scale all points by `factor`, e.g. to draw on a zoomed canvas.
    pub fn zoom(&mut self, factor: f64) {
        for p in &mut self.points {
            p.coords *= factor;
        }
    }
}

/// Space-separated coordinates `x0 y0 x1 y1 ...`; the level is not printed.
impl fmt::Display for LevelLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {}", p.x, p.y)?;
        }
        Ok(())
    }
}

/// A line crossing a horizontal edgel of some image row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    pub x: f64,
    pub line: LineId,
}

/// Per-row crossings of all extracted lines, in extraction order.
///
/// Consumers rebuilding the nesting of lines scan each row from left to right
/// and should call [`RowCrossings::sort_by_x`] first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowCrossings {
    pub rows: Vec<Vec<Crossing>>,
}

impl RowCrossings {
    pub fn new(height: usize) -> Self {
        Self {
            rows: vec![Vec::new(); height],
        }
    }

    pub fn push(&mut self, row: usize, crossing: Crossing) {
        self.rows[row].push(crossing);
    }

    pub fn total(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn sort_by_x(&mut self) {
        for row in &mut self.rows {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Crossing, LevelLine, LineKind, Point, RowCrossings};

    #[test]
    fn display_lists_coordinates() {
        let mut line = LevelLine::new(3.5, LineKind::Saddle);
        line.points.push(Point::new(1.0, 2.5));
        line.points.push(Point::new(1.5, 3.0));
        assert_eq!(line.to_string(), "1 2.5 1.5 3");
    }

    #[test]
    fn zoom_scales_points() {
        let mut line = LevelLine::new(0.5, LineKind::Min);
        line.points.push(Point::new(1.0, 2.5));
        line.zoom(4.0);
        assert_eq!(line.points[0], Point::new(4.0, 10.0));
    }

    #[test]
    fn crossings_sort_per_row() {
        let mut rows = RowCrossings::new(2);
        rows.push(1, Crossing { x: 3.2, line: 0 });
        rows.push(1, Crossing { x: 1.7, line: 1 });
        rows.sort_by_x();
        assert_eq!(rows.rows[1][0].line, 1);
        assert_eq!(rows.total(), 2);
        assert!(rows.rows[0].is_empty());
    }
}
