use radon_lines::calculator::RadonExecutor;
use radon_lines::config::radon::load_config;
use radon_lines::image::io::{
    load_rgb_image, normalize_rgb, save_normalized_grid, save_rgb_image, write_json_file,
};
use radon_lines::image::overlay::{draw_line, draw_polygon, LINE_COLOR, POLYGON_COLOR};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let rgb = load_rgb_image(&config.input)?;
    let normalized = normalize_rgb(&rgb);

    let executor = RadonExecutor::from_params(config.params.clone()).map_err(|e| e.to_string())?;
    let calculator = executor.calculate(normalized).map_err(|e| e.to_string())?;
    let outcome = calculator
        .completion()
        .wait()
        .map_err(|e| format!("Radon transform did not complete: {e}"))?;

    let standardized = outcome
        .result
        .standardized()
        .ok_or("Transform result was not finished")?;
    save_normalized_grid(standardized, &config.output.radon_image)?;

    let report = outcome.report(&config.params);
    write_json_file(&config.output.result_json, &report)?;

    if let Some(overlay_path) = &config.output.overlay_image {
        let mut canvas = rgb;
        for line in &report.top_lines {
            draw_line(&mut canvas, outcome.image_center, line.rho_theta, LINE_COLOR);
        }
        draw_polygon(&mut canvas, &report.quadrilateral, POLYGON_COLOR);
        save_rgb_image(&canvas, overlay_path)?;
    }

    if let Some(text) = outcome.status_text() {
        eprintln!("Warning: {text}");
    }
    println!(
        "status={} lines={} corners={} time_ms={:.1}",
        report.status,
        report.top_lines.len(),
        report.quadrilateral.len(),
        report.processing_time_ms
    );
    Ok(())
}

fn usage() -> String {
    "Usage: radon_demo <config.json>".to_string()
}
