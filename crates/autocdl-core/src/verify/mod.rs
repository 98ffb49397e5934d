//! Post-grade quality check.
//!
//! The decided CDL is rendered onto the frame, the result is measured again
//! and a fixed table of rules flags clipped highlights, crushed shadows and
//! midtones that ended up too dark or too bright.

pub mod config;
mod rules;

use ndarray::Zip;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cdl::CdlParameters;
use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::ColorFrame;
use crate::stats::{frame_statistics, rec709_luma, ExtractionConfig, FrameStatistics};

pub use config::VerifyConfig;
pub use rules::{Comparison, FlagRule, Severity, FLAG_RULES};

/// A rule that fired on the graded frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityFlag {
    pub rule: String,
    pub severity: Severity,
    pub value: f64,
    pub threshold: f64,
}

/// Measurements of the graded frame and the verdict on them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityCheck {
    pub graded: FrameStatistics,
    pub flags: Vec<QualityFlag>,
    pub usable: bool,
}

impl QualityCheck {
    pub fn worst_severity(&self) -> Option<Severity> {
        self.flags.iter().map(|f| f.severity).max()
    }
}

/// Render a CDL onto a copy of `frame`.
///
/// Per channel `clamp(v * slope + offset, 0, 1) ^ power`, then saturation
/// about Rec.709 luma, clamped to [0, 1].
pub fn apply_cdl(frame: &ColorFrame, cdl: &CdlParameters) -> ColorFrame {
    let mut graded = frame.clone();

    let sop = |v: f32, c: usize| -> f32 {
        (v as f64 * cdl.slope[c] + cdl.offset[c])
            .clamp(0.0, 1.0)
            .powf(cdl.power[c]) as f32
    };
    let saturation = cdl.saturation as f32;
    let grade = |r: &mut f32, g: &mut f32, b: &mut f32| {
        let (mut rr, mut gg, mut bb) = (sop(*r, 0), sop(*g, 1), sop(*b, 2));
        if saturation != 1.0 {
            let luma = rec709_luma(rr, gg, bb);
            rr = (luma + saturation * (rr - luma)).clamp(0.0, 1.0);
            gg = (luma + saturation * (gg - luma)).clamp(0.0, 1.0);
            bb = (luma + saturation * (bb - luma)).clamp(0.0, 1.0);
        }
        *r = rr;
        *g = gg;
        *b = bb;
    };

    let zip = Zip::from(&mut graded.red.data)
        .and(&mut graded.green.data)
        .and(&mut graded.blue.data);
    if frame.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(grade);
    } else {
        zip.for_each(grade);
    }
    graded
}

/// Evaluate [`FLAG_RULES`] in order against graded statistics.
pub fn detect_flags(graded: &FrameStatistics, config: &VerifyConfig) -> Vec<QualityFlag> {
    FLAG_RULES
        .iter()
        .filter_map(|rule| {
            let value = (rule.value)(graded);
            let threshold = (rule.threshold)(config);
            rule.fires(value, threshold).then(|| QualityFlag {
                rule: rule.name.to_string(),
                severity: rule.severity,
                value,
                threshold,
            })
        })
        .collect()
}

/// Usable: no high-severity flag and mean luma inside the usable range.
pub fn is_usable(graded: &FrameStatistics, flags: &[QualityFlag], config: &VerifyConfig) -> bool {
    let (lo, hi) = config.usable_luma_range;
    !flags.iter().any(|f| f.severity == Severity::High)
        && graded.mean_luma >= lo
        && graded.mean_luma <= hi
}

/// Grade `frame` with `cdl`, re-measure it and judge the result.
pub fn check_graded(
    frame: &ColorFrame,
    cdl: &CdlParameters,
    extraction: &ExtractionConfig,
    config: &VerifyConfig,
) -> QualityCheck {
    let graded = frame_statistics(&apply_cdl(frame, cdl), extraction);
    let flags = detect_flags(&graded, config);
    let usable = is_usable(&graded, &flags, config);

    debug!(
        mean_luma = graded.mean_luma,
        highlight_ratio = graded.highlight_ratio,
        shadow_ratio = graded.shadow_ratio,
        flags = flags.len(),
        usable,
        "Graded frame checked"
    );

    QualityCheck {
        graded,
        flags,
        usable,
    }
}
