pub mod analyze;
pub mod config;
pub mod grade;
pub mod verify;

use std::path::Path;

use anyhow::{Context, Result};
use autocdl_core::detection::{FaceDetector, FixedFaceDetector};
use autocdl_core::io::records::read_face_detections;
use autocdl_core::pipeline::GradeConfig;

/// Load a TOML config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<GradeConfig> {
    let Some(path) = path else {
        return Ok(GradeConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents).context("Invalid grade config")
}

/// Detector replaying face boxes from a JSON file.
pub fn load_detector(path: &Path) -> Result<Box<dyn FaceDetector>> {
    let detections = read_face_detections(path)
        .with_context(|| format!("Failed to read face detections {}", path.display()))?;
    Ok(Box::new(FixedFaceDetector::new(detections)))
}
