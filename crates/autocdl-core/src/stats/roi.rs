use ndarray::s;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detection::{FaceDetection, RoiRect};
use crate::frame::ColorFrame;

use super::config::{ExtractionConfig, FaceRoiConfig};
use super::frame_stats::accumulate;
use super::sharpness::laplacian_variance;

/// A face region with its own statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceRoi {
    /// Position of the detection in the detector's output.
    pub id: usize,
    /// Expanded, clipped region the statistics were taken from.
    pub rect: RoiRect,
    /// Box as reported by the detector.
    pub detected_rect: RoiRect,
    pub confidence: f64,
    pub luma_mean: f64,
    pub luma_std: f64,
    pub saturation_mean: f64,
    pub saturation_std: f64,
    pub pixel_count: usize,
    /// Laplacian variance of the region's luma.
    pub sharpness: f64,
}

impl FaceRoi {
    /// A region known only by its mean luma and confidence.
    pub fn from_summary(id: usize, luma_mean: f64, confidence: f64) -> Self {
        let rect = RoiRect::new(0, 0, 0, 0);
        Self {
            id,
            rect,
            detected_rect: rect,
            confidence,
            luma_mean,
            luma_std: 0.0,
            saturation_mean: 0.0,
            saturation_std: 0.0,
            pixel_count: 0,
            sharpness: 0.0,
        }
    }
}

fn region_roi(
    frame: &ColorFrame,
    id: usize,
    detection: &FaceDetection,
    rect: RoiRect,
    extraction: &ExtractionConfig,
) -> FaceRoi {
    let (x, y) = (rect.x as usize, rect.y as usize);
    let (w, h) = (rect.width as usize, rect.height as usize);
    let window = s![y..y + h, x..x + w];

    let acc = accumulate(
        frame.red.data.slice(window),
        frame.green.data.slice(window),
        frame.blue.data.slice(window),
        extraction,
        None,
    );
    let ((luma_mean, luma_std), (saturation_mean, saturation_std)) = acc.mean_std();
    let sharpness = laplacian_variance(&frame.crop(x, y, w, h).luminance().data);

    FaceRoi {
        id,
        rect,
        detected_rect: detection.bbox,
        confidence: detection.confidence,
        luma_mean,
        luma_std,
        saturation_mean,
        saturation_std,
        pixel_count: acc.count(),
        sharpness,
    }
}

/// Turn raw detections into face regions, ordered by descending confidence.
///
/// Low-confidence hits and boxes that fall outside the frame are dropped.
/// Equal confidences keep detector order.
pub fn face_rois(
    frame: &ColorFrame,
    detections: &[FaceDetection],
    config: &FaceRoiConfig,
    extraction: &ExtractionConfig,
) -> Vec<FaceRoi> {
    let (fw, fh) = (frame.width(), frame.height());

    let mut faces: Vec<FaceRoi> = detections
        .iter()
        .enumerate()
        .filter(|(_, d)| d.confidence.is_finite() && d.confidence >= config.min_confidence)
        .filter_map(|(id, d)| {
            let clipped = d.bbox.clip_to(fw, fh)?;
            let rect = clipped.expand(config.expand_ratio, fw, fh)?;
            Some(region_roi(frame, id, d, rect, extraction))
        })
        .filter(|roi| roi.pixel_count > 0)
        .collect();

    debug!(
        detections = detections.len(),
        kept = faces.len(),
        "Built face regions"
    );

    faces.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    faces
}

/// Index of the face to report as primary.
///
/// Score = confidence * (1 - w) + normalised sharpness * w. Ties go to the
/// earlier (more confident) face.
pub fn select_primary(faces: &[FaceRoi], sharpness_weight: f64) -> Option<usize> {
    let max_sharpness = faces.iter().map(|f| f.sharpness).fold(0.0f64, f64::max);
    let w = sharpness_weight.clamp(0.0, 1.0);

    let mut best: Option<(usize, f64)> = None;
    for (i, face) in faces.iter().enumerate() {
        let norm = if max_sharpness > 0.0 {
            face.sharpness / max_sharpness
        } else {
            0.0
        };
        let score = face.confidence * (1.0 - w) + norm * w;
        match best {
            Some((_, s)) if score <= s => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}
