//! Extremum pass: lines hugging the local-minimum and local-maximum plateaus.
//!
//! A plateau is a 4-connected set of equal samples. It is a strict maximum
//! when all of its outer neighbors are lower, a strict minimum when all are
//! higher. Its lines are traced one grid step outside the plateau value, so
//! on the continuous surface they enclose the plateau tightly. An annular
//! plateau gives one line per boundary.

use super::extractor::Tracer;
use crate::image::ImageU8;
use crate::quantize::Quantizer;
use crate::types::LineKind;
use log::debug;

const NEIGH_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Flood-fill the plateau of `(x, y)` into `members`, marking it in `seen`,
/// and classify it. `None` when the plateau touches the image frame or has
/// neighbors on both sides.
fn collect_plateau(
    image: &ImageU8,
    x: usize,
    y: usize,
    seen: &mut [bool],
    stack: &mut Vec<usize>,
    members: &mut Vec<usize>,
) -> Option<LineKind> {
    let (w, h) = (image.w, image.h);
    let v = image.get(x, y);
    let mut touches_border = false;
    let mut higher = false;
    let mut lower = false;

    members.clear();
    stack.clear();
    seen[y * w + x] = true;
    stack.push(y * w + x);
    while let Some(idx) = stack.pop() {
        members.push(idx);
        let (px, py) = (idx % w, idx / w);
        if px == 0 || py == 0 || px + 1 == w || py + 1 == h {
            touches_border = true;
        }
        for (dx, dy) in NEIGH_OFFSETS {
            let (Some(nx), Some(ny)) = (px.checked_add_signed(dx), py.checked_add_signed(dy))
            else {
                continue;
            };
            if nx >= w || ny >= h {
                continue;
            }
            let n = image.get(nx, ny);
            if n == v {
                let nidx = ny * w + nx;
                if !seen[nidx] {
                    seen[nidx] = true;
                    stack.push(nidx);
                }
            } else if n > v {
                higher = true;
            } else {
                lower = true;
            }
        }
    }

    if touches_border || higher == lower {
        return None;
    }
    Some(if lower { LineKind::Max } else { LineKind::Min })
}

/// Trace the lines around every interior extremal plateau, in row-major order
/// of the plateaus' first sample with a differing right neighbor.
pub(super) fn trace_extrema(tracer: &mut Tracer<'_>, quantizer: &Quantizer) {
    let image = tracer.image().clone();
    let (w, h) = (image.w, image.h);
    let mut seen = vec![false; w * h];
    let mut stack = Vec::with_capacity(64);
    let mut members = Vec::new();

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let v = image.get(x, y);
            if v == image.get(x + 1, y) || seen[y * w + x] {
                continue;
            }
            tracer.stats.plateaus += 1;
            let Some(kind) = collect_plateau(&image, x, y, &mut seen, &mut stack, &mut members)
            else {
                tracer.stats.rejected_plateaus += 1;
                continue;
            };
            let level = match kind {
                LineKind::Max => f64::from(v) - quantizer.step(),
                _ => f64::from(v) + quantizer.step(),
            };
            members.sort_unstable();
            for &idx in &members {
                let (mx, my) = (idx % w, idx / w);
                if image.get(mx - 1, my) != v && !tracer.visited.is_visited(mx - 1, my) {
                    tracer.trace(mx - 1, my, level, kind);
                }
                if image.get(mx + 1, my) != v && !tracer.visited.is_visited(mx, my) {
                    tracer.trace(mx, my, level, kind);
                }
            }
            tracer.end_scope();
        }
    }
    debug!(
        "extrema: {} plateaus ({} rejected) -> {} min, {} max lines",
        tracer.stats.plateaus,
        tracer.stats.rejected_plateaus,
        tracer.stats.min_lines,
        tracer.stats.max_lines
    );
}
