//! Level set of the bilinear patch of one cell.
//!
//! With corners `c = [TL, BL, BR, TR]` and `D = c0 + c2 - c1 - c3`, the patch
//! reads `D (x - xs)(y - ys) + N / D` where `N = c0 c2 - c1 c3`. The center
//! `(xs, ys)` is the saddle point of the patch and `N / D` its level, so the
//! level set at `l` is the hyperbola `(x - xs)(y - ys) = delta` with
//! `delta = (D l - N) / D^2`. Its vertex, the point of maximal curvature of the
//! branch, sits at `(xs, ys) + (+-sqrt|delta|, +-sqrt|delta|)`.
//! When `D == 0` the level set is a straight segment.

use crate::types::Point;

/// Below this `|delta|`, the branch is treated as a flattened saddle.
pub(crate) const FLAT_SADDLE_DELTA: f64 = 1.0e-2;

#[derive(Clone, Debug)]
pub(crate) struct Hyperbola {
    /// Saddle level is `num / denom`, with `denom >= 0`.
    pub num: f64,
    pub denom: f64,
    /// Center of the hyperbola, i.e. the saddle point.
    pub center: Point,
    /// Vertex of the branch containing the reference point.
    pub vertex: Point,
    pub delta: f64,
}

impl Hyperbola {
    /// Branch through `p` of the level set at `level` inside the cell whose
    /// top-left sample is `origin`.
    pub fn new(origin: Point, p: Point, corners: [u8; 4], level: f64) -> Self {
        let [c0, c1, c2, c3] = corners.map(f64::from);
        let mut num = c0 * c2 - c1 * c3;
        let mut denom = (c0 + c2) - (c1 + c3);
        if denom == 0.0 {
            return Self {
                num,
                denom,
                center: origin,
                vertex: origin,
                delta: 0.0,
            };
        }
        let inv = 1.0 / denom;
        let center = Point::new(origin.x + (c0 - c1) * inv, origin.y + (c0 - c3) * inv);
        let delta = (denom * level - num) * (inv * inv);
        let r = delta.abs().sqrt();
        let vertex = Point::new(
            center.x + sign(p.x - center.x) * r,
            center.y + sign(p.y - center.y) * r,
        );
        if denom < 0.0 {
            num = -num;
            denom = -denom;
        }
        Self {
            num,
            denom,
            center,
            vertex,
            delta,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.denom != 0.0
    }

    pub fn is_flat(&self) -> bool {
        self.delta.abs() < FLAT_SADDLE_DELTA
    }

    /// Whether the vertex lies strictly inside the unit cell at `origin`.
    pub fn vertex_in_cell(&self, origin: Point) -> bool {
        self.is_valid()
            && origin.x < self.vertex.x
            && self.vertex.x < origin.x + 1.0
            && origin.y < self.vertex.y
            && self.vertex.y < origin.y + 1.0
    }

    /// Append the interior samples of the branch between `p1` and `p2`, both
    /// on the branch, with about `pts_per_pixel` samples per unit length along
    /// the dominant axis. Neither endpoint is emitted.
    pub fn sample(&self, p1: Point, p2: Point, pts_per_pixel: u32, out: &mut Vec<Point>) {
        if pts_per_pixel < 2 {
            return;
        }
        let span = p2 - p1;
        let density = f64::from(pts_per_pixel);
        if span.x.abs() > span.y.abs() {
            let n = (span.x.abs() * density).ceil() as usize;
            let dx = span.x / n as f64;
            let mut x = p1.x;
            for _ in 1..n {
                x += dx;
                out.push(Point::new(x, self.center.y + self.delta / (x - self.center.x)));
            }
        } else {
            let n = (span.y.abs() * density).ceil() as usize;
            let dy = span.y / n as f64;
            let mut y = p1.y;
            for _ in 1..n {
                y += dy;
                out.push(Point::new(self.center.x + self.delta / (y - self.center.y), y));
            }
        }
    }
}

#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::Hyperbola;
    use crate::types::Point;

    fn origin() -> Point {
        Point::new(0.0, 0.0)
    }

    #[test]
    fn symmetric_saddle_has_center_in_middle() {
        // TL=10, BL=0, BR=10, TR=0
        let h = Hyperbola::new(origin(), Point::new(0.25, 0.0), [10, 0, 10, 0], 6.0);
        assert!(h.is_valid());
        assert_eq!(h.num, 100.0);
        assert_eq!(h.denom, 20.0);
        assert_eq!(h.num / h.denom, 5.0);
        assert!((h.center.x - 0.5).abs() < 1e-12);
        assert!((h.center.y - 0.5).abs() < 1e-12);
        // (20 * 6 - 100) / 400
        assert!((h.delta - 0.05).abs() < 1e-12);
        assert!(h.vertex_in_cell(origin()));
        assert!(h.vertex.x < 0.5 && h.vertex.y < 0.5, "vertex must face p");
    }

    #[test]
    fn negative_denominator_is_normalized() {
        // Off-diagonal high: TL=0, BL=10, BR=0, TR=10 -> D = -20.
        let h = Hyperbola::new(origin(), Point::new(0.5, 0.0), [0, 10, 0, 10], 4.0);
        assert_eq!(h.denom, 20.0);
        assert_eq!(h.num, 100.0);
        // delta keeps the orientation of the raw patch.
        assert!((h.delta - (-20.0 * 4.0 + 100.0) / 400.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_cell_is_invalid() {
        // TL + BR == BL + TR: the level set is a straight segment.
        let h = Hyperbola::new(origin(), Point::new(0.5, 0.0), [0, 10, 20, 10], 5.0);
        assert!(!h.is_valid());
        assert!(!h.vertex_in_cell(origin()));
    }

    #[test]
    fn sampled_points_lie_on_branch() {
        let h = Hyperbola::new(origin(), Point::new(0.25, 0.0), [10, 0, 10, 0], 8.0);
        let p1 = Point::new(h.center.x + h.delta / (0.0 - h.center.y), 0.0);
        let p2 = Point::new(0.0, h.center.y + h.delta / (0.0 - h.center.x));
        let mut out = Vec::new();
        h.sample(p1, p2, 8, &mut out);
        assert!(!out.is_empty());
        for p in &out {
            let lhs = (p.x - h.center.x) * (p.y - h.center.y);
            assert!((lhs - h.delta).abs() < 1e-9, "point {p:?} off branch");
        }
    }

    #[test]
    fn density_below_two_yields_nothing() {
        let h = Hyperbola::new(origin(), Point::new(0.25, 0.0), [10, 0, 10, 0], 8.0);
        let mut out = Vec::new();
        h.sample(Point::new(0.1, 0.0), Point::new(0.0, 0.1), 1, &mut out);
        h.sample(Point::new(0.1, 0.0), Point::new(0.0, 0.1), 0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn more_density_gives_more_points() {
        let h = Hyperbola::new(origin(), Point::new(0.25, 0.0), [10, 0, 10, 0], 9.0);
        let p1 = Point::new(h.center.x + h.delta / (0.0 - h.center.y), 0.0);
        let p2 = Point::new(0.0, h.center.y + h.delta / (0.0 - h.center.x));
        let mut previous = 0;
        for density in [16, 32, 64, 128] {
            let mut out = Vec::new();
            h.sample(p1, p2, density, &mut out);
            assert!(
                out.len() > previous,
                "density {density}: {} points after {previous}",
                out.len()
            );
            previous = out.len();
        }
    }
}
