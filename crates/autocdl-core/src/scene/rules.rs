use crate::stats::FrameStatistics;

use super::config::ClassifierConfig;
use super::SceneCategory;

/// One classification rule: a named predicate and the category it assigns.
pub struct SceneRule {
    pub name: &'static str,
    pub category: SceneCategory,
    pub matches: fn(&FrameStatistics, &ClassifierConfig) -> bool,
}

/// Rules in precedence order. The first match wins; the last rule always matches.
pub const RULES: &[SceneRule] = &[
    SceneRule {
        name: "slog3_signature",
        category: SceneCategory::Slog3Base,
        matches: has_slog3_signature,
    },
    SceneRule {
        name: "low_light",
        category: SceneCategory::Night,
        matches: is_low_light,
    },
    SceneRule {
        name: "bright_highlights",
        category: SceneCategory::OutdoorDay,
        matches: has_outdoor_highlights,
    },
    SceneRule {
        name: "default",
        category: SceneCategory::IndoorHuman,
        matches: always,
    },
];

/// Camera tag names S-Log3.
pub fn camera_is_slog3(camera: Option<&str>, config: &ClassifierConfig) -> bool {
    let Some(camera) = camera else {
        return false;
    };
    let camera = camera.to_ascii_lowercase();
    config
        .slog3_markers
        .iter()
        .any(|m| !m.is_empty() && camera.contains(&m.to_ascii_lowercase()))
}

/// Histogram looks like ungraded S-Log3: nearly everything bunched around
/// mid-gray, almost no clipped ends, washed-out color.
pub fn histogram_is_slog3(stats: &FrameStatistics, config: &ClassifierConfig) -> bool {
    let (lo, hi) = config.slog3_midgray_band;
    stats.histogram.total() > 0
        && stats.histogram.fraction_between(lo, hi) >= config.slog3_min_midtone_fraction
        && stats.highlight_ratio <= config.slog3_max_clip_fraction
        && stats.shadow_ratio <= config.slog3_max_clip_fraction
        && stats.mean_saturation <= config.slog3_max_saturation
}

fn has_slog3_signature(stats: &FrameStatistics, config: &ClassifierConfig) -> bool {
    camera_is_slog3(stats.camera.as_deref(), config) || histogram_is_slog3(stats, config)
}

fn is_low_light(stats: &FrameStatistics, config: &ClassifierConfig) -> bool {
    stats.mean_luma <= config.night_luma
}

fn has_outdoor_highlights(stats: &FrameStatistics, config: &ClassifierConfig) -> bool {
    stats.highlight_ratio >= config.outdoor_highlight_ratio
}

fn always(_: &FrameStatistics, _: &ClassifierConfig) -> bool {
    true
}
