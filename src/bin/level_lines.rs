use bilinear_levellines::config::load_config;
use bilinear_levellines::diagnostics::ExtractionStats;
use bilinear_levellines::image::io::{load_grayscale_image, save_grayscale_u8, write_json_file};
use bilinear_levellines::image::fill_border;
use bilinear_levellines::levelline::LevelLineExtractor;
use bilinear_levellines::types::{LevelLine, RowCrossings};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let mut gray = load_grayscale_image(&config.input)?;
    let border_level = if config.fill_border {
        fill_border(&mut gray)
    } else {
        None
    };
    if let Some(path) = &config.output.normalized_image {
        save_grayscale_u8(&gray, path)?;
    }

    let extractor = LevelLineExtractor::new(config.extract);
    let view = gray.as_view();
    let mut result = extractor.extract(&view);
    if let Some(factor) = config.output.zoom {
        for line in &mut result.lines {
            line.zoom(factor);
        }
    }

    let report = LevelLinesReport {
        width: view.w,
        height: view.h,
        border_level,
        stats: result.stats,
        elapsed_ms: result.elapsed_ms,
        line_count: result.lines.len(),
        lines: result.lines,
        crossings: result.crossings,
    };
    write_json_file(&config.output.lines_json, &report)?;

    println!(
        "Traced {} level lines ({} min, {} max, {} saddle) in {:.3} ms",
        report.line_count,
        report.stats.min_lines,
        report.stats.max_lines,
        report.stats.saddle_lines,
        report.elapsed_ms
    );
    if report.stats.open_lines > 0 {
        println!(
            "Dropped {} lines reaching the image frame",
            report.stats.open_lines
        );
    }
    println!("Saved report to {}", config.output.lines_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: level_lines <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LevelLinesReport {
    width: usize,
    height: usize,
    border_level: Option<u8>,
    stats: ExtractionStats,
    elapsed_ms: f64,
    line_count: usize,
    lines: Vec<LevelLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crossings: Option<RowCrossings>,
}
