//! Singular level lines of the bilinear interpolation of an 8-bit image.
//!
//! The image is read as a continuous surface: inside each unit cell spanned by
//! four adjacent samples the value is the bilinear interpolation of the
//! corners. Its level lines are closed curves made of hyperbola branches, one
//! per cell crossed. This module traces the *singular* ones, i.e. the lines
//! that change topology of the level sets:
//!
//! - Extremum lines: one grid step outside every interior plateau that is a
//!   strict local minimum or maximum. An annular plateau yields one line per
//!   boundary.
//! - Saddle lines: at the level of every saddle point of the surface. Saddle
//!   levels are rational, so they are snapped to the dyadic grid of
//!   [`crate::quantize::Quantizer`]; saddles falling in the same step are
//!   handled together so that a contour through several of them is traced
//!   once.
//!
//! Tracing
//! - A line is followed cell by cell by a cursor remembering its entry
//!   direction. Where a line could leave a saddle cell by two edgels, the
//!   choice is made by comparing the level with the exact saddle level.
//! - Crossings of horizontal edgels are recorded in a bitmap; reaching an
//!   already crossed edgel closes the line. The bitmap is scoped to one
//!   plateau or one saddle level.
//! - With `pts_per_pixel > 0`, the hyperbola branch inside each cell is
//!   sampled in between the edgel crossings.
//!
//! Lines reaching the image frame cannot close and are discarded; see
//! [`crate::image::fill_border`] to keep every singular line inside.
//!
//! Output order is deterministic: extremum lines in row-major order of their
//! plateaus, then saddle lines by ascending level. The index of a line in
//! [`ExtractionResult::lines`] is its identifier in the row crossings.

mod dual_pixel;
mod extractor;
mod extrema;
mod hyperbola;
mod options;
mod saddles;
mod visit;

pub use extractor::{extract_level_lines, ExtractionResult, LevelLineExtractor};
pub use options::ExtractOptions;
pub use saddles::{find_saddles, saddle_batches, Saddle};
