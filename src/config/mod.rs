//! JSON configuration of the command-line tools.
pub mod levellines;

pub use levellines::{load_config, LevelLinesOutputConfig, LevelLinesToolConfig};
