//! Saddle pass: lines through the saddle points of the bilinear surface.
//!
//! A cell `(a b / c d)` holds a saddle point when its off-diagonal samples
//! `b` and `c` are both strictly above, or both strictly below, the range
//! spanned by its diagonal `a`, `d`. The saddle level is the rational
//! `(ad - bc) / (a + d - b - c)`. Saddles are sorted by exact level and
//! grouped by quantized level: all cells of a group share one visitation
//! scope, so that a contour passing through several saddle cells is traced
//! once.

use super::extractor::Tracer;
use crate::image::ImageU8;
use crate::quantize::Quantizer;
use crate::types::LineKind;
use log::debug;
use std::cmp::Ordering;

/// Saddle cell with top-left sample `(x, y)` and level `num / denom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Saddle {
    pub x: usize,
    pub y: usize,
    pub num: i64,
    /// Always positive.
    pub denom: i64,
}

impl Saddle {
    /// Classify the cell with corners top-left `a`, top-right `b`,
    /// bottom-left `c` and bottom-right `d`.
    pub fn from_corners(x: usize, y: usize, a: u8, b: u8, c: u8, d: u8) -> Option<Self> {
        let (a, b, c, d) = (i64::from(a), i64::from(b), i64::from(c), i64::from(d));
        let (min, max) = if a <= d { (a, d) } else { (d, a) };
        let side = |v: i64| -> i64 {
            if v < min {
                -1
            } else if v > max {
                1
            } else {
                0
            }
        };
        if side(b) * side(c) <= 0 {
            return None;
        }
        let mut num = a * d - b * c;
        let mut denom = a + d - b - c;
        if denom < 0 {
            num = -num;
            denom = -denom;
        }
        Some(Self { x, y, num, denom })
    }

    pub fn level(&self) -> f64 {
        self.num as f64 / self.denom as f64
    }

    /// Exact comparison of saddle levels.
    pub fn cmp_level(&self, other: &Self) -> Ordering {
        (self.num * other.denom).cmp(&(other.num * self.denom))
    }
}

/// All saddle cells of `image`, by ascending exact level; equal levels keep
/// row-major order.
pub fn find_saddles(image: &ImageU8) -> Vec<Saddle> {
    let mut saddles = Vec::new();
    for y in 0..image.h.saturating_sub(1) {
        for x in 0..image.w.saturating_sub(1) {
            let a = image.get(x, y);
            let b = image.get(x + 1, y);
            let c = image.get(x, y + 1);
            let d = image.get(x + 1, y + 1);
            if let Some(s) = Saddle::from_corners(x, y, a, b, c, d) {
                saddles.push(s);
            }
        }
    }
    saddles.sort_by(Saddle::cmp_level);
    saddles
}

/// Consecutive runs of `saddles` sharing a quantized level.
pub fn saddle_batches<'s>(
    saddles: &'s [Saddle],
    quantizer: &'s Quantizer,
) -> impl Iterator<Item = (f64, &'s [Saddle])> + 's {
    saddles
        .chunk_by(move |a, b| quantizer.quantize(a.level()) == quantizer.quantize(b.level()))
        .map(move |batch| (quantizer.quantize(batch[0].level()), batch))
}

/// Trace one line per unvisited horizontal edgel of every saddle cell.
pub(super) fn trace_saddles(tracer: &mut Tracer<'_>, quantizer: &Quantizer) {
    let saddles = find_saddles(tracer.image());
    tracer.stats.saddle_cells = saddles.len();
    for (level, batch) in saddle_batches(&saddles, quantizer) {
        tracer.stats.saddle_levels += 1;
        for s in batch {
            for row in [s.y, s.y + 1] {
                if !tracer.visited.is_visited(s.x, row) {
                    tracer.trace(s.x, row, level, LineKind::Saddle);
                }
            }
        }
        tracer.end_scope();
    }
    debug!(
        "saddles: {} cells at {} levels -> {} lines",
        saddles.len(),
        tracer.stats.saddle_levels,
        tracer.stats.saddle_lines
    );
}

#[cfg(test)]
mod tests {
    use super::{find_saddles, saddle_batches, Saddle};
    use crate::image::ImageU8;
    use crate::quantize::Quantizer;
    use std::cmp::Ordering;

    #[test]
    fn diagonal_pair_is_a_saddle_at_five() {
        // top-left 10, top-right 0, bottom-left 0, bottom-right 10
        let s = Saddle::from_corners(0, 0, 10, 0, 0, 10).expect("saddle");
        assert_eq!(s.num, 100);
        assert_eq!(s.denom, 20);
        assert_eq!(s.level(), 5.0);
    }

    #[test]
    fn off_diagonal_high_is_normalized() {
        let s = Saddle::from_corners(0, 0, 0, 10, 10, 0).expect("saddle");
        assert_eq!((s.num, s.denom), (100, 20));
    }

    #[test]
    fn monotone_cells_are_not_saddles() {
        assert!(Saddle::from_corners(0, 0, 0, 5, 5, 10).is_none());
        // b inside the diagonal range
        assert!(Saddle::from_corners(0, 0, 0, 5, 20, 10).is_none());
        // b below, c above: opposite sides
        assert!(Saddle::from_corners(0, 0, 5, 0, 20, 10).is_none());
        // ties with the diagonal are not strict
        assert!(Saddle::from_corners(0, 0, 5, 5, 0, 10).is_none());
    }

    #[test]
    fn exact_ordering_does_not_round() {
        let a = Saddle {
            x: 0,
            y: 0,
            num: 29,
            denom: 3,
        };
        let b = Saddle {
            x: 1,
            y: 0,
            num: 58,
            denom: 6,
        };
        assert_eq!(a.cmp_level(&b), Ordering::Equal);
        let c = Saddle {
            x: 2,
            y: 0,
            num: 2329,
            denom: 241,
        };
        assert_eq!(c.cmp_level(&a), Ordering::Less);
    }

    #[test]
    fn saddles_are_sorted_and_batched() {
        #[rustfmt::skip]
        let data = [
            50, 0, 50, 0,
            0, 50, 0, 90,
            50, 0, 50, 0,
        ];
        let img = ImageU8::packed(4, 3, &data);
        let saddles = find_saddles(&img);
        assert!(saddles.len() >= 4);
        for pair in saddles.windows(2) {
            assert_ne!(pair[0].cmp_level(&pair[1]), Ordering::Greater);
        }
        let q = Quantizer::default();
        let batches: Vec<_> = saddle_batches(&saddles, &q).collect();
        let total: usize = batches.iter().map(|(_, b)| b.len()).sum();
        assert_eq!(total, saddles.len());
        for (level, batch) in &batches {
            for s in batch.iter() {
                assert_eq!(q.quantize(s.level()), *level);
            }
        }
        // The cells whose corners are only 0 and 50 all sit at level 25.
        let at_25 = batches
            .iter()
            .find(|(level, _)| level.floor() == 25.0)
            .expect("batch at 25");
        assert!(at_25.1.len() >= 3);
    }
}
