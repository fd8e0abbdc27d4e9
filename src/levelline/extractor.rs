use super::dual_pixel::DualPixel;
use super::options::ExtractOptions;
use super::visit::EdgelBitmap;
use super::{extrema, saddles};
use crate::diagnostics::ExtractionStats;
use crate::image::ImageU8;
use crate::quantize::Quantizer;
use crate::types::{Crossing, LevelLine, LineKind, RowCrossings};
use log::debug;
use std::time::Instant;

/// Lines of one extraction, in identifier order.
#[derive(Clone, Debug, Default)]
pub struct ExtractionResult {
    pub lines: Vec<LevelLine>,
    /// Present when [`ExtractOptions::row_crossings`] is set.
    pub crossings: Option<RowCrossings>,
    pub stats: ExtractionStats,
    pub elapsed_ms: f64,
}

/// Extracts the level lines through the extrema and saddle points of the
/// bilinear interpolation of an 8-bit image.
#[derive(Clone, Debug)]
pub struct LevelLineExtractor {
    options: ExtractOptions,
    quantizer: Quantizer,
}

impl LevelLineExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            quantizer: options.quantizer.quantizer(),
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    /// Trace all singular level lines of `image`: extremum lines first, in
    /// row-major order of their plateaus, then saddle lines by ascending level.
    pub fn extract(&self, image: &ImageU8) -> ExtractionResult {
        let t0 = Instant::now();
        if image.w < 2 || image.h < 2 {
            debug!(
                "level lines: {}x{} image has no cells, nothing to trace",
                image.w, image.h
            );
            return ExtractionResult {
                crossings: self.options.row_crossings.then(|| RowCrossings::new(image.h)),
                ..ExtractionResult::default()
            };
        }
        if image
            .w
            .max(image.h)
            .checked_shr(self.options.quantizer.max_width_bits)
            .unwrap_or(0)
            != 0
        {
            debug!(
                "level lines: {}x{} image exceeds the {}-bit coordinate budget",
                image.w, image.h, self.options.quantizer.max_width_bits
            );
        }

        let mut tracer = Tracer::new(image, &self.options);

        let t_extrema = Instant::now();
        extrema::trace_extrema(&mut tracer, &self.quantizer);
        tracer.stats.extrema_ms = t_extrema.elapsed().as_secs_f64() * 1000.0;

        let t_saddles = Instant::now();
        saddles::trace_saddles(&mut tracer, &self.quantizer);
        tracer.stats.saddles_ms = t_saddles.elapsed().as_secs_f64() * 1000.0;

        let Tracer {
            lines,
            crossings,
            stats,
            ..
        } = tracer;
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "level lines: {} min, {} max, {} saddle, {} open discarded, {} points in {:.3} ms",
            stats.min_lines,
            stats.max_lines,
            stats.saddle_lines,
            stats.open_lines,
            stats.points,
            elapsed_ms
        );
        ExtractionResult {
            lines,
            crossings,
            stats,
            elapsed_ms,
        }
    }
}

/// Convenience wrapper around [`LevelLineExtractor`].
pub fn extract_level_lines(image: &ImageU8, options: &ExtractOptions) -> ExtractionResult {
    LevelLineExtractor::new(*options).extract(image)
}

/// How a trace ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TraceEnd {
    /// Back on the start edgel.
    Closed,
    /// Reached the image frame.
    Open,
    /// Reached an edgel of a line already found open at this level.
    Joined,
}

/// State shared by both enumeration phases of one extraction.
pub(super) struct Tracer<'a> {
    image: ImageU8<'a>,
    pts_per_pixel: u32,
    max_steps: usize,
    pub(super) visited: EdgelBitmap,
    /// Edgels of the open lines of the current scope.
    dead: EdgelBitmap,
    crossings: Option<RowCrossings>,
    pending: Vec<(usize, Crossing)>,
    lines: Vec<LevelLine>,
    pub(super) stats: ExtractionStats,
}

impl<'a> Tracer<'a> {
    fn new(image: &ImageU8<'a>, options: &ExtractOptions) -> Self {
        Self {
            image: image.clone(),
            pts_per_pixel: options.pts_per_pixel,
            // A line crosses every edgel at most once.
            max_steps: 2 * image.w * image.h + 4,
            visited: EdgelBitmap::new(image.w, image.h),
            dead: EdgelBitmap::new(image.w, image.h),
            crossings: options.row_crossings.then(|| RowCrossings::new(image.h)),
            pending: Vec::new(),
            lines: Vec::new(),
            stats: ExtractionStats::default(),
        }
    }

    pub(super) fn image(&self) -> &ImageU8<'a> {
        &self.image
    }

    /// Close the current plateau or saddle level.
    pub(super) fn end_scope(&mut self) {
        self.visited.clear();
        self.dead.clear();
    }

    /// Follow the line at `level` from the horizontal edgel at `(sx, sy)`
    /// until it closes. The line gets the next identifier when it closes
    /// inside the image.
    ///
    /// A line reaching the frame is dropped with its crossings, and its
    /// edgels are kept as dead until the end of the scope: any later trace
    /// running into them is the same open line and stops there.
    pub(super) fn trace(&mut self, sx: usize, sy: usize, level: f64, kind: LineKind) {
        let Some((mut cursor, mut p)) = DualPixel::new(&self.image, sx, sy, level) else {
            return;
        };
        let id = self.lines.len();
        let checkpoint = self.visited.checkpoint();
        self.pending.clear();
        let mut line = LevelLine::new(level, kind);

        let mut end = TraceEnd::Open;
        for _ in 0..self.max_steps {
            line.points.push(p);
            if cursor
                .edgel()
                .is_some_and(|(x, row)| self.dead.is_visited(x, row))
            {
                end = TraceEnd::Joined;
                break;
            }
            let pending = self.crossings.is_some().then_some(&mut self.pending);
            if !cursor.mark_visit(&mut self.visited, pending, id, &p) {
                end = TraceEnd::Closed;
                break;
            }
            if cursor
                .follow(&mut p, level, self.pts_per_pixel, &mut line.points)
                .is_none()
            {
                break;
            }
        }

        if end != TraceEnd::Closed {
            if end == TraceEnd::Open {
                let (x, y) = cursor.cell();
                debug!("{kind:?} line at {level} from ({sx},{sy}) left the image at ({x},{y})");
                self.stats.open_lines += 1;
            }
            self.visited.move_since(checkpoint, &mut self.dead);
            self.pending.clear();
            return;
        }

        if let Some(rows) = self.crossings.as_mut() {
            for (row, crossing) in self.pending.drain(..) {
                rows.push(row, crossing);
            }
        }
        self.stats.count_line(kind, line.len());
        self.lines.push(line);
    }
}
