use serde::{Deserialize, Serialize};

use crate::stats::FrameStatistics;

use super::config::VerifyConfig;

/// How bad a flagged problem is. `High` makes a grade unusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Direction of a flag comparison. Both are strict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Above,
    Below,
}

/// One check on the graded frame's statistics.
pub struct FlagRule {
    pub name: &'static str,
    pub severity: Severity,
    pub comparison: Comparison,
    pub value: fn(&FrameStatistics) -> f64,
    pub threshold: fn(&VerifyConfig) -> f64,
}

impl FlagRule {
    pub fn fires(&self, value: f64, threshold: f64) -> bool {
        match self.comparison {
            Comparison::Above => value > threshold,
            Comparison::Below => value < threshold,
        }
    }
}

/// Checks in reporting order.
pub const FLAG_RULES: &[FlagRule] = &[
    FlagRule {
        name: "highlight_clipping_risk",
        severity: Severity::High,
        comparison: Comparison::Above,
        value: |s| s.highlight_ratio,
        threshold: |c| c.highlight_clip_ratio,
    },
    FlagRule {
        name: "shadow_crush_risk",
        severity: Severity::High,
        comparison: Comparison::Above,
        value: |s| s.shadow_ratio,
        threshold: |c| c.shadow_crush_ratio,
    },
    FlagRule {
        name: "midtone_too_dark",
        severity: Severity::Medium,
        comparison: Comparison::Below,
        value: |s| s.mean_luma,
        threshold: |c| c.dark_midtone_luma,
    },
    FlagRule {
        name: "midtone_too_bright",
        severity: Severity::Medium,
        comparison: Comparison::Above,
        value: |s| s.mean_luma,
        threshold: |c| c.bright_midtone_luma,
    },
];
