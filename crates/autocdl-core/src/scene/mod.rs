//! Rule-based scene classifier.

pub mod config;
mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats::FrameStatistics;

pub use config::ClassifierConfig;
pub use rules::{camera_is_slog3, histogram_is_slog3, SceneRule, RULES};

/// Scene types the classifier can assign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneCategory {
    OutdoorDay,
    IndoorHuman,
    Night,
    Slog3Base,
}

impl SceneCategory {
    /// Fixed correction preset for this scene.
    pub fn preset(self) -> ScenePreset {
        let (exposure_ev, contrast_factor) = match self {
            Self::Slog3Base => (0.8, 1.10),
            Self::OutdoorDay => (-0.3, 1.05),
            Self::IndoorHuman => (0.0, 1.00),
            Self::Night => (0.5, 1.15),
        };
        ScenePreset {
            exposure_ev,
            contrast_factor,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OutdoorDay => "outdoor_day",
            Self::IndoorHuman => "indoor_human",
            Self::Night => "night",
            Self::Slog3Base => "slog3_base",
        }
    }
}

impl std::fmt::Display for SceneCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenePreset {
    pub exposure_ev: f64,
    pub contrast_factor: f64,
}

/// Classifier output: the category, its preset and the rule that fired.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneClassification {
    pub category: SceneCategory,
    pub preset: ScenePreset,
    pub rule: String,
}

/// Classify a frame by evaluating [`RULES`] top-down.
pub fn classify(stats: &FrameStatistics, config: &ClassifierConfig) -> SceneClassification {
    let rule = RULES
        .iter()
        .find(|rule| (rule.matches)(stats, config))
        .unwrap_or(&RULES[RULES.len() - 1]);

    debug!(scene = %rule.category, rule = rule.name, "Scene classified");

    SceneClassification {
        category: rule.category,
        preset: rule.category.preset(),
        rule: rule.name.to_string(),
    }
}
