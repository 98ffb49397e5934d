use serde::{Deserialize, Serialize};

use crate::cdl::{CdlParameters, WhiteBalanceAdjustment};
use crate::exposure::ExposureDecision;
use crate::stats::FrameAnalysis;
use crate::verify::QualityCheck;

use super::trace::DecisionTrace;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Analyzing,
    Classifying,
    Deciding,
    Translating,
    Applying,
    Verifying,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Analyzing => write!(f, "Analyzing frame"),
            Self::Classifying => write!(f, "Classifying scene"),
            Self::Deciding => write!(f, "Deciding exposure"),
            Self::Translating => write!(f, "Translating to CDL"),
            Self::Applying => write!(f, "Applying CDL"),
            Self::Verifying => write!(f, "Verifying graded frame"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn begin_stage(&self, _stage: PipelineStage) {}

    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when none is attached.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Result of one decision pass, before anything is sent to the host.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GradeOutcome {
    pub cdl: CdlParameters,
    pub decision: ExposureDecision,
    pub white_balance: WhiteBalanceAdjustment,
    pub trace: DecisionTrace,
    /// Frame measurements; absent for manual decisions.
    pub analysis: Option<FrameAnalysis>,
}

/// Outcome plus the host's verdict on applying it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GradeReport {
    pub outcome: GradeOutcome,
    /// Exactly what the host's apply call returned.
    pub applied: bool,
}

/// Outcome plus a quality check of the graded frame and a replay check.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationReport {
    pub outcome: GradeOutcome,
    pub check: QualityCheck,
    /// A second decision pass on the same input gave the same CDL and trace.
    pub deterministic: bool,
}
