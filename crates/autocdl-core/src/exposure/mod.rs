//! ROI-weighted exposure calculator.
//!
//! With faces, the exposure target blends confidence-weighted face luma with
//! global luma and aims the blend at the skin target. Without faces the
//! scene preset is used.

pub mod config;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cdl::clamp::clamp_exposure_ev;
use crate::consts::{
    ADAPTIVE_CONTRAST_BOOST, ADAPTIVE_CONTRAST_CUT, EPSILON, FACE_WEIGHT, FLAT_LUMA_STD,
    GLOBAL_WEIGHT, NEUTRAL_CONTRAST, SKIN_TARGET_LUMA, SLOG3_BASE_CONTRAST, WIDE_LUMA_STD,
};
use crate::scene::{SceneCategory, SceneClassification};
use crate::stats::{FaceRoi, FrameStatistics};

pub use config::ExposureConfig;

/// Which path produced a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    FaceWeighted,
    SceneRule,
    Manual,
}

impl std::fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FaceWeighted => write!(f, "face_weighted"),
            Self::SceneRule => write!(f, "scene_rule"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Exposure and contrast to apply, with the single path that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExposureDecision {
    pub exposure_ev: f64,
    pub contrast_factor: f64,
    pub source: DecisionSource,
}

/// A decision plus the intermediate values that led to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExposureEstimate {
    pub decision: ExposureDecision,
    /// EV before clamping and dead-band snapping.
    pub raw_exposure_ev: f64,
    /// Confidence-weighted mean face luma, when faces were used.
    pub face_luma: Option<f64>,
    /// 70/30 face/global blend, when faces were used.
    pub blended_luma: Option<f64>,
}

/// Confidence-weighted mean luma over all faces. Falls back to a plain mean
/// when the confidences sum to zero. `None` for an empty list.
pub fn weighted_face_luma(faces: &[FaceRoi]) -> Option<f64> {
    if faces.is_empty() {
        return None;
    }
    let weight: f64 = faces.iter().map(|f| f.confidence.max(0.0)).sum();
    if weight > EPSILON {
        Some(
            faces
                .iter()
                .map(|f| f.confidence.max(0.0) * f.luma_mean)
                .sum::<f64>()
                / weight,
        )
    } else {
        Some(faces.iter().map(|f| f.luma_mean).sum::<f64>() / faces.len() as f64)
    }
}

/// `FACE_WEIGHT * face + GLOBAL_WEIGHT * global`.
pub fn blend_luma(face_luma: f64, global_luma: f64) -> f64 {
    FACE_WEIGHT * face_luma + GLOBAL_WEIGHT * global_luma
}

/// EV needed to move `luma` onto the skin target. 0 for non-positive luma.
pub fn exposure_to_target(luma: f64) -> f64 {
    if luma <= EPSILON {
        return 0.0;
    }
    (SKIN_TARGET_LUMA / luma).log2()
}

/// Contrast for the face-weighted path.
pub fn face_path_contrast(is_slog3: bool, stats: &FrameStatistics, config: &ExposureConfig) -> f64 {
    if !is_slog3 {
        return NEUTRAL_CONTRAST;
    }
    if !config.adaptive_contrast {
        return SLOG3_BASE_CONTRAST;
    }
    if stats.luma_std < FLAT_LUMA_STD {
        SLOG3_BASE_CONTRAST + ADAPTIVE_CONTRAST_BOOST
    } else if stats.luma_std > WIDE_LUMA_STD {
        SLOG3_BASE_CONTRAST - ADAPTIVE_CONTRAST_CUT
    } else {
        SLOG3_BASE_CONTRAST
    }
}

/// Decide exposure and contrast for a frame.
///
/// Deterministic: the same statistics, faces and scene always give the same
/// result. Faces present means `FaceWeighted`, otherwise `SceneRule`.
pub fn decide_exposure(
    stats: &FrameStatistics,
    faces: &[FaceRoi],
    scene: &SceneClassification,
    config: &ExposureConfig,
) -> ExposureEstimate {
    let Some(face_luma) = weighted_face_luma(faces) else {
        let preset = scene.preset;
        return ExposureEstimate {
            decision: ExposureDecision {
                exposure_ev: clamp_exposure_ev(preset.exposure_ev),
                contrast_factor: preset.contrast_factor,
                source: DecisionSource::SceneRule,
            },
            raw_exposure_ev: preset.exposure_ev,
            face_luma: None,
            blended_luma: None,
        };
    };

    let blended = blend_luma(face_luma, stats.mean_luma);
    let raw_ev = exposure_to_target(blended);
    let snapped = if raw_ev.abs() < config.tolerance_ev {
        0.0
    } else {
        raw_ev
    };
    let is_slog3 = scene.category == SceneCategory::Slog3Base;
    let contrast = face_path_contrast(is_slog3, stats, config);

    debug!(
        faces = faces.len(),
        face_luma,
        blended_luma = blended,
        raw_ev,
        contrast,
        "Face-weighted exposure"
    );

    ExposureEstimate {
        decision: ExposureDecision {
            exposure_ev: clamp_exposure_ev(snapped),
            contrast_factor: contrast,
            source: DecisionSource::FaceWeighted,
        },
        raw_exposure_ev: raw_ev,
        face_luma: Some(face_luma),
        blended_luma: Some(blended),
    }
}
