//! Mobile dual pixel: the cell cursor following a level line.
//!
//! A dual pixel is the unit square whose vertices are four adjacent samples.
//! Its corner values are kept in the order top-left, bottom-left, bottom-right,
//! top-right, and the cursor remembers the direction the line entered by:
//! south means through the top edgel, east through the left one, north
//! through the bottom one and west through the right one. With this layout
//! the entry edgel joins corners `d` and `d + 3 (mod 4)`, and the line always
//! enters with `corner[d] < level < corner[d + 3]`.

use super::hyperbola::Hyperbola;
use super::visit::EdgelBitmap;
use crate::image::ImageU8;
use crate::types::{Crossing, LineId, Point};

/// Entry direction. Left turn is `+1`, right turn `-1`, reversal `+2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    S,
    E,
    N,
    W,
}

impl Dir {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_index(i: usize) -> Self {
        match i & 3 {
            0 => Dir::S,
            1 => Dir::E,
            2 => Dir::N,
            _ => Dir::W,
        }
    }

    #[inline]
    fn left(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    #[inline]
    fn right(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    #[inline]
    fn step(self) -> (isize, isize) {
        match self {
            Dir::S => (0, 1),
            Dir::E => (1, 0),
            Dir::N => (0, -1),
            Dir::W => (-1, 0),
        }
    }
}

/// Offsets of the corners from the top-left sample, in storage order.
const CORNER_OFFSETS: [(f64, f64); 4] = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];

/// Abscissa in `[0, 1]` where the segment from `(0, v0)` to `(1, v1)` reaches `v`.
#[inline]
fn linear(v0: f64, v: f64, v1: f64) -> f64 {
    (v - v0) / (v1 - v0)
}

pub(crate) struct DualPixel<'a> {
    image: ImageU8<'a>,
    levels: [u8; 4],
    x: usize,
    y: usize,
    dir: Dir,
}

impl<'a> DualPixel<'a> {
    /// Place the cursor on the line at `level` crossing the horizontal edgel
    /// from `(sx, sy)` to `(sx + 1, sy)`, and return the crossing point.
    ///
    /// The line is assumed to go south through the edgel; if the samples say
    /// otherwise, the cursor starts in the cell above, heading north. `None`
    /// when that cell lies outside the image or the edgel is not crossed.
    pub fn new(image: &ImageU8<'a>, sx: usize, sy: usize, level: f64) -> Option<(Self, Point)> {
        let v0 = f64::from(image.get(sx, sy));
        let v1 = f64::from(image.get(sx + 1, sy));
        let p = Point::new(sx as f64 + linear(v0, level, v1), sy as f64);
        let (y, dir) = if v0 < level && level < v1 {
            (sy, Dir::S)
        } else if v0 > level && level > v1 {
            (sy.checked_sub(1)?, Dir::N)
        } else {
            return None;
        };
        if sx + 1 >= image.w || y + 1 >= image.h {
            return None;
        }
        let cursor = Self {
            image: image.clone(),
            levels: image.cell(sx, y),
            x: sx,
            y,
            dir,
        };
        Some((cursor, p))
    }

    #[inline]
    fn corner(&self, i: usize) -> f64 {
        f64::from(self.levels[i & 3])
    }

    #[inline]
    fn origin(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    pub fn cell(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    #[cfg(test)]
    pub fn dir(&self) -> Dir {
        self.dir
    }

    /// Crossing point of the line on the current entry edgel.
    fn entry_point(&self, level: f64) -> Point {
        let d = self.dir.index();
        let from = CORNER_OFFSETS[d];
        let to = CORNER_OFFSETS[(d + 3) & 3];
        let t = linear(self.corner(d), level, self.corner(d + 3));
        debug_assert!((0.0..=1.0).contains(&t), "crossing outside its edgel: {t}");
        Point::new(
            self.x as f64 + from.0 + t * (to.0 - from.0),
            self.y as f64 + from.1 + t * (to.1 - from.1),
        )
    }

    /// Move to the adjacent dual pixel the line exits to and return the exit
    /// point, which is the entry point in the new cell.
    ///
    /// The saddle level `num / denom` (`denom > 0`) of the current cell is
    /// only consulted when the line could leave by both side edgels; it is
    /// passed as a fraction so that the decision is taken without division.
    /// `None` when the exit edgel lies on the image frame.
    pub fn advance(&mut self, level: f64, num: f64, denom: f64) -> Option<Point> {
        let d = self.dir.index();
        let mut left = level > self.corner(d + 2);
        let mut right = level < self.corner(d + 1);
        if left && right {
            right = level * denom < num;
            left = !right;
        }
        if left {
            self.dir = self.dir.left();
        } else if right {
            self.dir = self.dir.right();
        }
        let (dx, dy) = self.dir.step();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        if x + 1 >= self.image.w || y + 1 >= self.image.h {
            return None;
        }
        self.x = x;
        self.y = y;
        self.levels = self.image.cell(x, y);
        Some(self.entry_point(level))
    }

    /// Cross the current dual pixel: `p` moves from the entry point to the
    /// exit point and the hyperbola branch in between is sampled into `out`.
    pub fn follow(
        &mut self,
        p: &mut Point,
        level: f64,
        pts_per_pixel: u32,
        out: &mut Vec<Point>,
    ) -> Option<()> {
        let d = self.dir.index();
        debug_assert!(
            self.corner(d) < level && level < self.corner(d + 3),
            "entry edgel of cell ({},{}) does not bracket level {level}",
            self.x,
            self.y
        );
        let origin = self.origin();
        let hyperbola = Hyperbola::new(origin, *p, self.levels, level);
        let vertex_inside = hyperbola.vertex_in_cell(origin);
        let mut start = *p;
        *p = self.advance(level, hyperbola.num, hyperbola.denom)?;

        if !hyperbola.is_valid() || pts_per_pixel == 0 {
            return Some(());
        }
        if hyperbola.is_flat() {
            if vertex_inside {
                out.push(hyperbola.vertex);
            }
            return Some(());
        }
        if vertex_inside {
            hyperbola.sample(start, hyperbola.vertex, pts_per_pixel, out);
            out.push(hyperbola.vertex);
            start = hyperbola.vertex;
        }
        hyperbola.sample(start, *p, pts_per_pixel, out);
        Some(())
    }

    /// Horizontal edgel `(x, row)` the line entered the current cell by, if
    /// any.
    pub fn edgel(&self) -> Option<(usize, usize)> {
        match self.dir {
            Dir::S => Some((self.x, self.y)),
            Dir::N => Some((self.x, self.y + 1)),
            Dir::E | Dir::W => None,
        }
    }

    /// Record the crossing of a horizontal edgel. Returns `false` when the
    /// edgel was already visited at this level, i.e. the loop is closed.
    ///
    /// New crossings are appended to `crossings` as `(row, crossing)`.
    pub fn mark_visit(
        &self,
        visited: &mut EdgelBitmap,
        crossings: Option<&mut Vec<(usize, Crossing)>>,
        line: LineId,
        p: &Point,
    ) -> bool {
        let Some((x, row)) = self.edgel() else {
            return true;
        };
        if visited.visit(x, row) {
            return false;
        }
        if let Some(pending) = crossings {
            pending.push((row, Crossing { x: p.x, line }));
        }
        true
    }
}
