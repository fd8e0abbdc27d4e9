#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod image;
pub mod levelline;
pub mod quantize;
pub mod types;

// Tool-facing configuration.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: extractor + results.
pub use crate::levelline::{
    extract_level_lines, ExtractOptions, ExtractionResult, LevelLineExtractor,
};
pub use crate::types::{Crossing, LevelLine, LineId, LineKind, Point, RowCrossings};

// Run statistics returned by the extractor.
pub use crate::diagnostics::ExtractionStats;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use bilinear_levellines::prelude::*;
///
/// let (w, h) = (3usize, 3usize);
/// let gray = [0u8, 0, 0, 0, 9, 0, 0, 0, 0];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let result = LevelLineExtractor::new(ExtractOptions::default()).extract(&img);
/// assert_eq!(result.lines.len(), 1);
/// assert_eq!(result.lines[0].kind, LineKind::Max);
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{ExtractOptions, ExtractionResult, LevelLine, LevelLineExtractor, LineKind};
}
