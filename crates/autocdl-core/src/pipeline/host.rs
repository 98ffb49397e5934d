use crate::cdl::CdlParameters;
use crate::error::Result;
use crate::frame::ColorFrame;

/// The host application as seen by the orchestrator.
///
/// `current_frame` returns `Ok(None)` when no clip or frame is selected;
/// `Err` is for frames that were selected but could not be read.
pub trait GradeHost {
    fn current_frame(&mut self) -> Result<Option<ColorFrame>>;

    /// Apply a CDL to the selected clip. The return value is passed through
    /// to the caller untouched.
    fn apply_parameters(&mut self, cdl: &CdlParameters) -> bool;
}
