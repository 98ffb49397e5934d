use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::{
    CONTRAST_FACTOR_RANGE, EXPOSURE_EV_RANGE, SATURATION_RANGE, WB_TEMP_DELTA_RANGE,
    WB_TINT_DELTA_RANGE,
};

/// A parameter with a defined valid range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampAxis {
    ExposureEv,
    ContrastFactor,
    WbTempDelta,
    WbTintDelta,
    Saturation,
}

impl ClampAxis {
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::ExposureEv => EXPOSURE_EV_RANGE,
            Self::ContrastFactor => CONTRAST_FACTOR_RANGE,
            Self::WbTempDelta => WB_TEMP_DELTA_RANGE,
            Self::WbTintDelta => WB_TINT_DELTA_RANGE,
            Self::Saturation => SATURATION_RANGE,
        }
    }

    /// Value meaning "no adjustment".
    pub fn identity(self) -> f64 {
        match self {
            Self::ExposureEv | Self::WbTempDelta | Self::WbTintDelta => 0.0,
            Self::ContrastFactor | Self::Saturation => 1.0,
        }
    }

    /// Clamp into range. NaN becomes the identity.
    pub fn clamp(self, value: f64) -> f64 {
        if value.is_nan() {
            return self.identity();
        }
        let (lo, hi) = self.range();
        value.clamp(lo, hi)
    }
}

impl std::fmt::Display for ClampAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExposureEv => write!(f, "exposure_ev"),
            Self::ContrastFactor => write!(f, "contrast_factor"),
            Self::WbTempDelta => write!(f, "wb_temp_delta"),
            Self::WbTintDelta => write!(f, "wb_tint_delta"),
            Self::Saturation => write!(f, "saturation"),
        }
    }
}

pub fn clamp_exposure_ev(ev: f64) -> f64 {
    ClampAxis::ExposureEv.clamp(ev)
}

pub fn clamp_contrast_factor(contrast: f64) -> f64 {
    ClampAxis::ContrastFactor.clamp(contrast)
}

/// A value that was normalised into its valid range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClampEvent {
    pub axis: ClampAxis,
    pub requested: f64,
    pub applied: f64,
}

/// Collects clamp events while normalising a parameter set.
///
/// Clamping is never an error; each change is logged and kept for the trace.
#[derive(Clone, Debug, Default)]
pub struct ClampPolicy {
    events: Vec<ClampEvent>,
}

impl ClampPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, axis: ClampAxis, requested: f64) -> f64 {
        let applied = axis.clamp(requested);
        // NaN != NaN, so a NaN request is always recorded.
        if applied != requested {
            info!(axis = %axis, requested, applied, "Parameter clamped");
            self.record(axis, requested, applied);
        }
        applied
    }

    /// Record a clamp that already happened upstream.
    pub fn record(&mut self, axis: ClampAxis, requested: f64, applied: f64) {
        self.events.push(ClampEvent {
            axis,
            requested,
            applied,
        });
    }

    pub fn events(&self) -> &[ClampEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ClampEvent> {
        self.events
    }
}

/// White-balance deltas after clamping. Handled as a pass of its own; they
/// never feed into slope, offset or power.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WhiteBalanceAdjustment {
    pub temp_delta: f64,
    pub tint_delta: f64,
}

impl WhiteBalanceAdjustment {
    pub fn is_identity(&self) -> bool {
        self.temp_delta == 0.0 && self.tint_delta == 0.0
    }
}
