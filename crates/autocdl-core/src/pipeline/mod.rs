pub mod config;
mod host;
mod orchestrator;
mod trace;
mod types;

pub use config::GradeConfig;
pub use host::GradeHost;
pub use orchestrator::Orchestrator;
pub use trace::DecisionTrace;
pub use types::{
    GradeOutcome, GradeReport, PipelineStage, ProgressReporter, VerificationReport,
};
