//! Externally supplied correction parameters.

use serde::{Deserialize, Serialize};

use crate::cdl::{ClampAxis, ClampPolicy, WhiteBalanceAdjustment};
use crate::exposure::{DecisionSource, ExposureDecision};

/// Raw parameter record as persisted by the host.
///
/// Every field is optional. An absent field means "no adjustment on that
/// axis": 0 EV, contrast 1.0, zero white-balance deltas, saturation 1.0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorCorrectionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    /// -2.0..2.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_ev: Option<f64>,
    /// -2000..2000
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wb_temp_delta: Option<f64>,
    /// -100..100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wb_tint_delta: Option<f64>,
    /// 0.5..2.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast_factor: Option<f64>,
    /// CDL saturation override, 0.0..2.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
}

impl ColorCorrectionRequest {
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Carries an exposure or contrast value, i.e. asks for a manual decision.
    /// Camera, white-balance and saturation fields alone do not.
    pub fn has_exposure_override(&self) -> bool {
        self.exposure_ev.is_some() || self.contrast_factor.is_some()
    }

    /// Manual decision with absent axes at identity, clamped through `policy`.
    pub fn to_decision(&self, policy: &mut ClampPolicy) -> ExposureDecision {
        let ev = self
            .exposure_ev
            .map_or(ClampAxis::ExposureEv.identity(), |v| {
                policy.apply(ClampAxis::ExposureEv, v)
            });
        let contrast = self
            .contrast_factor
            .map_or(ClampAxis::ContrastFactor.identity(), |v| {
                policy.apply(ClampAxis::ContrastFactor, v)
            });
        ExposureDecision {
            exposure_ev: ev,
            contrast_factor: contrast,
            source: DecisionSource::Manual,
        }
    }

    /// White-balance pass, clamped through `policy`.
    pub fn white_balance(&self, policy: &mut ClampPolicy) -> WhiteBalanceAdjustment {
        WhiteBalanceAdjustment {
            temp_delta: self
                .wb_temp_delta
                .map_or(0.0, |v| policy.apply(ClampAxis::WbTempDelta, v)),
            tint_delta: self
                .wb_tint_delta
                .map_or(0.0, |v| policy.apply(ClampAxis::WbTintDelta, v)),
        }
    }

    /// Saturation override, clamped through `policy`.
    pub fn saturation_override(&self, policy: &mut ClampPolicy) -> Option<f64> {
        self.saturation
            .map(|v| policy.apply(ClampAxis::Saturation, v))
    }
}
