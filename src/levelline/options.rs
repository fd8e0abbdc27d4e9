use crate::quantize::QuantizerParams;
use serde::{Deserialize, Serialize};

/// Options of the level-line extractor.
///
/// - `pts_per_pixel`: samples per pixel along hyperbola branches. `0` keeps
///   only the crossings with cell edgels (and flat saddle vertices are not
///   emitted either); `1` adds the branch vertices but no interior samples.
/// - `row_crossings`: also return, per image row, the abscissae where each
///   line crosses that row, for rebuilding the nesting of lines.
/// - `quantizer`: precision budget defining the grid saddle levels snap to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub pts_per_pixel: u32,
    pub row_crossings: bool,
    pub quantizer: QuantizerParams,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pts_per_pixel: 0,
            row_crossings: false,
            quantizer: QuantizerParams::default(),
        }
    }
}

impl ExtractOptions {
    pub fn with_pts_per_pixel(mut self, pts_per_pixel: u32) -> Self {
        self.pts_per_pixel = pts_per_pixel;
        self
    }

    pub fn with_row_crossings(mut self, enabled: bool) -> Self {
        self.row_crossings = enabled;
        self
    }
}
