use serde::{Deserialize, Serialize};

/// Tunables of the face-weighted exposure path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposureConfig {
    /// Face-weighted corrections smaller than this (in EV) are snapped to 0.
    /// 0 disables the dead band.
    #[serde(default)]
    pub tolerance_ev: f64,
    /// Nudge the S-Log3 base contrast by how flat the frame is.
    #[serde(default)]
    pub adaptive_contrast: bool,
}
