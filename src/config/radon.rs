use crate::calculator::RadonParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct RadonDemoConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: RadonParams,
    pub output: RadonOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct RadonOutputConfig {
    /// Standardized accumulator rendered as a PNG.
    pub radon_image: PathBuf,
    pub result_json: PathBuf,
    /// Input image with the detected lines and polygon drawn in.
    #[serde(default)]
    pub overlay_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RadonDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let cfg: RadonDemoConfig = serde_json::from_str(
            r#"{
                "input": "board.png",
                "output": { "radon_image": "out/radon.png", "result_json": "out/r.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.input, PathBuf::from("board.png"));
        assert_eq!(cfg.params, RadonParams::default());
        assert!(cfg.output.overlay_image.is_none());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.contains("does/not/exist.json"));
    }
}
