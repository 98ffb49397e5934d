//! Face detection capability.
//!
//! The vision model itself lives outside this crate. A detector is handed
//! one frame and returns raw boxes with confidences; everything after that
//! (filtering, clipping, statistics) happens in [`crate::stats`].

mod rect;

use serde::{Deserialize, Serialize};

use crate::error::{GradeError, Result};
use crate::frame::ColorFrame;

pub use rect::RoiRect;

/// One raw detector hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    pub bbox: RoiRect,
    /// Detection confidence in [0.0, 1.0].
    pub confidence: f64,
}

/// Pluggable face detector.
///
/// Acquire one instance per session; it is released when dropped. The
/// frame is only read. Detection results are treated as a snapshot: the
/// pipeline calls `detect` at most once per decision pass.
pub trait FaceDetector {
    fn name(&self) -> &str;

    fn detect(&mut self, frame: &ColorFrame) -> Result<Vec<FaceDetection>>;
}

/// Detector for hosts without a vision model. Never finds a face.
#[derive(Clone, Debug, Default)]
pub struct NoFaceDetector;

impl FaceDetector for NoFaceDetector {
    fn name(&self) -> &str {
        "none"
    }

    fn detect(&mut self, _frame: &ColorFrame) -> Result<Vec<FaceDetection>> {
        Ok(Vec::new())
    }
}

/// Replays detections computed elsewhere (for example by an external model
/// whose output was saved to JSON).
#[derive(Clone, Debug, Default)]
pub struct FixedFaceDetector {
    detections: Vec<FaceDetection>,
}

impl FixedFaceDetector {
    pub fn new(detections: Vec<FaceDetection>) -> Self {
        Self { detections }
    }
}

impl FaceDetector for FixedFaceDetector {
    fn name(&self) -> &str {
        "fixed"
    }

    /// Fails when a saved box has a confidence outside [0, 1]: the file was
    /// not written by a working detector.
    fn detect(&mut self, _frame: &ColorFrame) -> Result<Vec<FaceDetection>> {
        if let Some(bad) = self
            .detections
            .iter()
            .find(|d| !(0.0..=1.0).contains(&d.confidence))
        {
            return Err(GradeError::Detector {
                detector: self.name().to_string(),
                reason: format!("confidence {} outside [0, 1]", bad.confidence),
            });
        }
        Ok(self.detections.clone())
    }
}
