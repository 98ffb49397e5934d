//! Statistics extractor: whole-frame luminance/saturation statistics and
//! per-face region statistics, all in the Rec.709-referenced model.

mod color;
pub mod config;
mod frame_stats;
mod roi;
mod sharpness;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::detection::FaceDetector;
use crate::frame::ColorFrame;

pub use color::{hsl_saturation, rec709_luma};
pub use config::{ExtractionConfig, FaceRoiConfig};
pub use frame_stats::{frame_statistics, FrameStatistics, LumaHistogram};
pub use roi::{face_rois, select_primary, FaceRoi};
pub use sharpness::laplacian_variance;

/// What happened when the face detector was asked about a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStatus {
    /// No detector is attached.
    Unavailable,
    Completed,
    /// The detector returned an error; treated like "no faces".
    Failed(String),
}

/// Everything measured on one frame in one pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameAnalysis {
    pub stats: FrameStatistics,
    /// Sorted by descending confidence.
    pub faces: Vec<FaceRoi>,
    pub detection: DetectionStatus,
}

/// Measure a frame and, if a detector is given, its faces.
///
/// Never fails: a missing or failing detector yields an empty face list.
pub fn analyze_frame(
    frame: &ColorFrame,
    detector: Option<&mut dyn FaceDetector>,
    extraction: &ExtractionConfig,
    roi_config: &FaceRoiConfig,
) -> FrameAnalysis {
    let stats = frame_statistics(frame, extraction);
    debug!(
        mean_luma = stats.mean_luma,
        mean_saturation = stats.mean_saturation,
        highlight_ratio = stats.highlight_ratio,
        shadow_ratio = stats.shadow_ratio,
        "Frame statistics"
    );

    let (faces, detection) = match detector {
        None => (Vec::new(), DetectionStatus::Unavailable),
        Some(det) => match det.detect(frame) {
            Ok(raw) => (
                face_rois(frame, &raw, roi_config, extraction),
                DetectionStatus::Completed,
            ),
            Err(e) => {
                warn!(detector = det.name(), error = %e, "Face detection failed, continuing without faces");
                (Vec::new(), DetectionStatus::Failed(e.to_string()))
            }
        },
    };

    FrameAnalysis {
        stats,
        faces,
        detection,
    }
}
