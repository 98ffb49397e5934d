#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use autocdl_core::cdl::CdlParameters;
use autocdl_core::detection::{FaceDetection, FaceDetector, RoiRect};
use autocdl_core::error::{GradeError, Result};
use autocdl_core::frame::{ColorFrame, Frame};
use autocdl_core::pipeline::{GradeHost, PipelineStage, ProgressReporter};
use ndarray::Array2;

/// Neutral gray frame: every channel holds `value`.
pub fn gray_frame(w: usize, h: usize, value: f32) -> ColorFrame {
    let plane = || Frame::new(Array2::from_elem((h, w), value), 8);
    ColorFrame::from_channels(plane(), plane(), plane())
}

/// Gray frame with a differently-valued gray rectangle.
pub fn gray_frame_with_patch(
    w: usize,
    h: usize,
    background: f32,
    patch: RoiRect,
    foreground: f32,
) -> ColorFrame {
    let data = Array2::from_shape_fn((h, w), |(row, col)| {
        let inside = col >= patch.x as usize
            && col < (patch.x + patch.width) as usize
            && row >= patch.y as usize
            && row < (patch.y + patch.height) as usize;
        if inside {
            foreground
        } else {
            background
        }
    });
    ColorFrame::from_channels(
        Frame::new(data.clone(), 8),
        Frame::new(data.clone(), 8),
        Frame::new(data, 8),
    )
}

/// Left half black, right half white.
pub fn split_frame(w: usize, h: usize) -> ColorFrame {
    let data = Array2::from_shape_fn((h, w), |(_, col)| if col < w / 2 { 0.0 } else { 1.0 });
    ColorFrame::from_channels(
        Frame::new(data.clone(), 8),
        Frame::new(data.clone(), 8),
        Frame::new(data, 8),
    )
}

pub fn detection(x: u32, y: u32, w: u32, h: u32, confidence: f64) -> FaceDetection {
    FaceDetection {
        bbox: RoiRect::new(x, y, w, h),
        confidence,
    }
}

/// Detector that counts calls and returns fixed boxes.
pub struct CountingDetector {
    pub calls: Rc<Cell<usize>>,
    pub detections: Vec<FaceDetection>,
}

impl CountingDetector {
    pub fn new(detections: Vec<FaceDetection>) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                calls: calls.clone(),
                detections,
            },
            calls,
        )
    }
}

impl FaceDetector for CountingDetector {
    fn name(&self) -> &str {
        "counting"
    }

    fn detect(&mut self, _frame: &ColorFrame) -> Result<Vec<FaceDetection>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.detections.clone())
    }
}

/// Detector whose model is broken.
pub struct FailingDetector;

impl FaceDetector for FailingDetector {
    fn name(&self) -> &str {
        "failing"
    }

    fn detect(&mut self, _frame: &ColorFrame) -> Result<Vec<FaceDetection>> {
        Err(GradeError::Detector {
            detector: "failing".to_string(),
            reason: "model not loaded".to_string(),
        })
    }
}

/// In-memory host recording every apply call.
pub struct MockHost {
    pub frame: Option<ColorFrame>,
    pub accept: bool,
    pub applied: Vec<CdlParameters>,
}

impl MockHost {
    pub fn with_frame(frame: ColorFrame) -> Self {
        Self {
            frame: Some(frame),
            accept: true,
            applied: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            frame: None,
            accept: true,
            applied: Vec::new(),
        }
    }
}

impl GradeHost for MockHost {
    fn current_frame(&mut self) -> Result<Option<ColorFrame>> {
        Ok(self.frame.clone())
    }

    fn apply_parameters(&mut self, cdl: &CdlParameters) -> bool {
        self.applied.push(cdl.clone());
        self.accept
    }
}

/// Reporter that remembers which stages started.
#[derive(Default)]
pub struct RecordingReporter {
    pub stages: Mutex<Vec<PipelineStage>>,
}

impl RecordingReporter {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn stages(&self) -> Vec<PipelineStage> {
        self.stages.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        self.stages.lock().unwrap().push(stage);
    }
}
