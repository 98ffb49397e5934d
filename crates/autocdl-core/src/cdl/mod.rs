//! ASC-CDL translation.
//!
//! Exposure maps to slope (`2^ev`), contrast to power (`1 / contrast`), both
//! identical on all three channels. Offset stays at zero.

pub mod clamp;
mod record;

use serde::{Deserialize, Serialize};

use crate::exposure::ExposureDecision;

pub use clamp::{
    clamp_contrast_factor, clamp_exposure_ev, ClampAxis, ClampEvent, ClampPolicy,
    WhiteBalanceAdjustment,
};
pub use record::CdlRecord;

/// Slope/offset/power/saturation for one grading node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CdlParameters {
    pub node_index: u32,
    pub slope: [f64; 3],
    pub offset: [f64; 3],
    pub power: [f64; 3],
    pub saturation: f64,
}

impl CdlParameters {
    pub fn to_record(&self) -> CdlRecord {
        CdlRecord::from(self)
    }

    /// Contrast factor implied by the power term.
    pub fn contrast_factor(&self) -> f64 {
        1.0 / self.power[0]
    }

    /// Exposure in EV implied by the slope term.
    pub fn exposure_ev(&self) -> f64 {
        self.slope[0].log2()
    }
}

/// Translate an exposure decision into CDL values.
///
/// Exposure and contrast are clamped first, so slope lies in [0.25, 4.0] and
/// power in [0.5, 2.0] whatever the input. `saturation` of `None` means 1.0.
pub fn translate(
    decision: &ExposureDecision,
    node_index: u32,
    saturation: Option<f64>,
) -> CdlParameters {
    let ev = clamp_exposure_ev(decision.exposure_ev);
    let contrast = clamp_contrast_factor(decision.contrast_factor);
    let slope = 2f64.powf(ev);
    let power = 1.0 / contrast;
    let saturation = saturation.map_or(1.0, |s| ClampAxis::Saturation.clamp(s));

    CdlParameters {
        node_index,
        slope: [slope; 3],
        offset: [0.0; 3],
        power: [power; 3],
        saturation,
    }
}
