use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_HIGHLIGHT_THRESHOLD, DEFAULT_MIN_FACE_CONFIDENCE, DEFAULT_ROI_EXPAND_RATIO,
    DEFAULT_SHADOW_THRESHOLD, DEFAULT_SHARPNESS_WEIGHT,
};

/// Thresholds used while scanning frame pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Luma at or above this value counts as highlight.
    #[serde(default = "default_highlight_threshold")]
    pub highlight_threshold: f64,
    /// Luma at or below this value counts as shadow.
    #[serde(default = "default_shadow_threshold")]
    pub shadow_threshold: f64,
}

fn default_highlight_threshold() -> f64 {
    DEFAULT_HIGHLIGHT_THRESHOLD
}
fn default_shadow_threshold() -> f64 {
    DEFAULT_SHADOW_THRESHOLD
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            highlight_threshold: DEFAULT_HIGHLIGHT_THRESHOLD,
            shadow_threshold: DEFAULT_SHADOW_THRESHOLD,
        }
    }
}

/// How raw detector output is turned into face regions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceRoiConfig {
    /// Detections below this confidence are discarded.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    /// Growth factor of each box about its centre.
    #[serde(default = "default_expand_ratio")]
    pub expand_ratio: f64,
    /// Weight of normalised sharpness when ranking the primary face (0..1).
    #[serde(default = "default_sharpness_weight")]
    pub sharpness_weight: f64,
}

fn default_min_confidence() -> f64 {
    DEFAULT_MIN_FACE_CONFIDENCE
}
fn default_expand_ratio() -> f64 {
    DEFAULT_ROI_EXPAND_RATIO
}
fn default_sharpness_weight() -> f64 {
    DEFAULT_SHARPNESS_WEIGHT
}

impl Default for FaceRoiConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_FACE_CONFIDENCE,
            expand_ratio: DEFAULT_ROI_EXPAND_RATIO,
            sharpness_weight: DEFAULT_SHARPNESS_WEIGHT,
        }
    }
}
