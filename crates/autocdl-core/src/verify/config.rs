use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BRIGHT_MIDTONE_LUMA, DEFAULT_DARK_MIDTONE_LUMA, DEFAULT_HIGHLIGHT_CLIP_RATIO,
    DEFAULT_SHADOW_CRUSH_RATIO, DEFAULT_USABLE_LUMA_RANGE,
};

/// Thresholds for checking a graded frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifyConfig {
    #[serde(default = "default_highlight_clip_ratio")]
    pub highlight_clip_ratio: f64,
    #[serde(default = "default_shadow_crush_ratio")]
    pub shadow_crush_ratio: f64,
    #[serde(default = "default_dark_midtone_luma")]
    pub dark_midtone_luma: f64,
    #[serde(default = "default_bright_midtone_luma")]
    pub bright_midtone_luma: f64,
    /// Inclusive mean-luma range a usable grade must land in.
    #[serde(default = "default_usable_luma_range")]
    pub usable_luma_range: (f64, f64),
}

fn default_highlight_clip_ratio() -> f64 {
    DEFAULT_HIGHLIGHT_CLIP_RATIO
}
fn default_shadow_crush_ratio() -> f64 {
    DEFAULT_SHADOW_CRUSH_RATIO
}
fn default_dark_midtone_luma() -> f64 {
    DEFAULT_DARK_MIDTONE_LUMA
}
fn default_bright_midtone_luma() -> f64 {
    DEFAULT_BRIGHT_MIDTONE_LUMA
}
fn default_usable_luma_range() -> (f64, f64) {
    DEFAULT_USABLE_LUMA_RANGE
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            highlight_clip_ratio: DEFAULT_HIGHLIGHT_CLIP_RATIO,
            shadow_crush_ratio: DEFAULT_SHADOW_CRUSH_RATIO,
            dark_midtone_luma: DEFAULT_DARK_MIDTONE_LUMA,
            bright_midtone_luma: DEFAULT_BRIGHT_MIDTONE_LUMA,
            usable_luma_range: DEFAULT_USABLE_LUMA_RANGE,
        }
    }
}
