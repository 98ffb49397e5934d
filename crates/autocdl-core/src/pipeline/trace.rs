use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cdl::{ClampEvent, WhiteBalanceAdjustment};
use crate::exposure::DecisionSource;
use crate::scene::SceneCategory;
use crate::stats::DetectionStatus;

/// Structured record of how a decision was reached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub source: DecisionSource,
    pub scene: Option<SceneCategory>,
    /// Classifier rule that fired.
    pub scene_rule: Option<String>,
    pub camera: Option<String>,
    /// `None` when the frame was not analysed (manual decisions).
    pub faces_detected: Option<usize>,
    pub detection: Option<DetectionStatus>,
    /// Detector id of the face ranked primary.
    pub primary_face: Option<usize>,
    pub global_luma: Option<f64>,
    pub face_luma: Option<f64>,
    pub blended_luma: Option<f64>,
    pub exposure_ev: f64,
    pub contrast_factor: f64,
    pub slope: f64,
    pub power: f64,
    pub saturation: f64,
    pub white_balance: WhiteBalanceAdjustment,
    pub clamps: Vec<ClampEvent>,
}

impl fmt::Display for DecisionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source:       {}", self.source)?;
        if let Some(scene) = self.scene {
            match &self.scene_rule {
                Some(rule) => writeln!(f, "Scene:        {} (rule: {})", scene, rule)?,
                None => writeln!(f, "Scene:        {}", scene)?,
            }
        }
        if let Some(ref camera) = self.camera {
            writeln!(f, "Camera:       {}", camera)?;
        }
        if let Some(count) = self.faces_detected {
            match self.primary_face {
                Some(id) => writeln!(f, "Faces:        {} (primary #{})", count, id)?,
                None => writeln!(f, "Faces:        {}", count)?,
            }
        }
        if let Some(DetectionStatus::Failed(ref reason)) = self.detection {
            writeln!(f, "Detection:    failed ({})", reason)?;
        }
        if let Some(luma) = self.global_luma {
            writeln!(f, "Global luma:  {:.4}", luma)?;
        }
        if let Some(luma) = self.face_luma {
            writeln!(f, "Face luma:    {:.4}", luma)?;
        }
        if let Some(luma) = self.blended_luma {
            writeln!(f, "Blended luma: {:.4}", luma)?;
        }
        writeln!(f, "Exposure:     {:+.2} EV", self.exposure_ev)?;
        writeln!(f, "Contrast:     {:.2}", self.contrast_factor)?;
        writeln!(f, "Slope:        {:.4}", self.slope)?;
        writeln!(f, "Power:        {:.4}", self.power)?;
        writeln!(f, "Saturation:   {:.4}", self.saturation)?;
        if !self.white_balance.is_identity() {
            writeln!(
                f,
                "White bal.:   temp {:+.0}, tint {:+.0}",
                self.white_balance.temp_delta, self.white_balance.tint_delta
            )?;
        }
        for clamp in &self.clamps {
            writeln!(
                f,
                "Clamped:      {} {} -> {}",
                clamp.axis, clamp.requested, clamp.applied
            )?;
        }
        Ok(())
    }
}
