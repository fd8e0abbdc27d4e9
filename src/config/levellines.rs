use crate::levelline::ExtractOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct LevelLinesToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    /// Replace the image frame by its median value before tracing, so that
    /// every singular line closes inside the image.
    #[serde(default = "default_fill_border")]
    pub fill_border: bool,
    #[serde(default)]
    pub extract: ExtractOptions,
    pub output: LevelLinesOutputConfig,
}

fn default_fill_border() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct LevelLinesOutputConfig {
    #[serde(rename = "lines_json")]
    pub lines_json: PathBuf,
    /// Image actually traced, after border normalization.
    #[serde(default)]
    pub normalized_image: Option<PathBuf>,
    /// Scale applied to line coordinates in the report.
    #[serde(default)]
    pub zoom: Option<f64>,
}

pub fn load_config(path: &Path) -> Result<LevelLinesToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<LevelLinesToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}
