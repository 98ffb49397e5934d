use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_NIGHT_LUMA, DEFAULT_OUTDOOR_HIGHLIGHT_RATIO, DEFAULT_SLOG3_MAX_CLIP_FRACTION,
    DEFAULT_SLOG3_MAX_SATURATION, DEFAULT_SLOG3_MIDGRAY_BAND, DEFAULT_SLOG3_MIN_MIDTONE_FRACTION,
};

/// Thresholds for the rule-based scene classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Case-insensitive substrings of the camera/gamma tag that mark S-Log3 footage.
    #[serde(default = "default_slog3_markers")]
    pub slog3_markers: Vec<String>,
    /// Histogram signature: luma band that holds most pixels in ungraded S-Log3.
    #[serde(default = "default_midgray_band")]
    pub slog3_midgray_band: (f64, f64),
    #[serde(default = "default_min_midtone_fraction")]
    pub slog3_min_midtone_fraction: f64,
    /// Histogram signature: upper bound on both highlight and shadow fractions.
    #[serde(default = "default_max_clip_fraction")]
    pub slog3_max_clip_fraction: f64,
    #[serde(default = "default_max_saturation")]
    pub slog3_max_saturation: f64,
    /// Mean luma at or below this is a night scene.
    #[serde(default = "default_night_luma")]
    pub night_luma: f64,
    /// Highlight fraction at or above this is an outdoor daylight scene.
    #[serde(default = "default_outdoor_highlight_ratio")]
    pub outdoor_highlight_ratio: f64,
}

fn default_slog3_markers() -> Vec<String> {
    vec!["s-log3".to_string(), "slog3".to_string()]
}
fn default_midgray_band() -> (f64, f64) {
    DEFAULT_SLOG3_MIDGRAY_BAND
}
fn default_min_midtone_fraction() -> f64 {
    DEFAULT_SLOG3_MIN_MIDTONE_FRACTION
}
fn default_max_clip_fraction() -> f64 {
    DEFAULT_SLOG3_MAX_CLIP_FRACTION
}
fn default_max_saturation() -> f64 {
    DEFAULT_SLOG3_MAX_SATURATION
}
fn default_night_luma() -> f64 {
    DEFAULT_NIGHT_LUMA
}
fn default_outdoor_highlight_ratio() -> f64 {
    DEFAULT_OUTDOOR_HIGHLIGHT_RATIO
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            slog3_markers: default_slog3_markers(),
            slog3_midgray_band: DEFAULT_SLOG3_MIDGRAY_BAND,
            slog3_min_midtone_fraction: DEFAULT_SLOG3_MIN_MIDTONE_FRACTION,
            slog3_max_clip_fraction: DEFAULT_SLOG3_MAX_CLIP_FRACTION,
            slog3_max_saturation: DEFAULT_SLOG3_MAX_SATURATION,
            night_luma: DEFAULT_NIGHT_LUMA,
            outdoor_highlight_ratio: DEFAULT_OUTDOOR_HIGHLIGHT_RATIO,
        }
    }
}
