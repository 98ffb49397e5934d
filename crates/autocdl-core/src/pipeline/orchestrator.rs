use std::sync::Arc;

use tracing::{info, warn};

use crate::cdl::{translate, ClampAxis, ClampPolicy};
use crate::detection::FaceDetector;
use crate::error::{GradeError, Result};
use crate::exposure::{decide_exposure, ExposureDecision, ExposureEstimate};
use crate::frame::ColorFrame;
use crate::request::ColorCorrectionRequest;
use crate::scene::{classify, SceneCategory};
use crate::stats::{analyze_frame, select_primary, DetectionStatus};
use crate::verify::check_graded;

use super::config::GradeConfig;
use super::host::GradeHost;
use super::trace::DecisionTrace;
use super::types::{
    GradeOutcome, GradeReport, NoOpReporter, PipelineStage, ProgressReporter, VerificationReport,
};

/// Picks the decision path, enforces the clamp policy and emits the CDL.
///
/// Owns the face detector for the whole session. Holds no per-frame state:
/// every call to [`Orchestrator::decide`] is independent and replayable.
pub struct Orchestrator {
    config: GradeConfig,
    detector: Option<Box<dyn FaceDetector>>,
    reporter: Arc<dyn ProgressReporter>,
}

impl Orchestrator {
    pub fn new(config: GradeConfig) -> Self {
        Self {
            config,
            detector: None,
            reporter: Arc::new(NoOpReporter),
        }
    }

    pub fn with_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &GradeConfig {
        &self.config
    }

    /// Run one decision pass on a frame.
    ///
    /// Path selection: a request carrying exposure or contrast wins
    /// (`Manual`); otherwise faces give `FaceWeighted`; otherwise the scene
    /// preset gives `SceneRule`.
    pub fn decide(
        &mut self,
        frame: &ColorFrame,
        request: Option<&ColorCorrectionRequest>,
    ) -> GradeOutcome {
        let mut policy = ClampPolicy::new();

        let manual = request.filter(|r| r.has_exposure_override());
        if let Some(req) = manual {
            let decision = req.to_decision(&mut policy);
            info!(
                exposure_ev = decision.exposure_ev,
                contrast = decision.contrast_factor,
                "Using manual parameters"
            );
            let camera = req.camera.clone().or_else(|| frame.metadata.camera.clone());
            return self.finish(decision, None, camera, request, policy);
        }

        self.reporter.begin_stage(PipelineStage::Analyzing);
        let detector: Option<&mut dyn FaceDetector> = match self.detector {
            Some(ref mut d) => Some(d.as_mut()),
            None => None,
        };
        let mut analysis = analyze_frame(
            frame,
            detector,
            &self.config.extraction,
            &self.config.faces,
        );
        if analysis.stats.camera.is_none() {
            analysis.stats.camera = request.and_then(|r| r.camera.clone());
        }
        self.reporter.finish_stage();

        self.reporter.begin_stage(PipelineStage::Classifying);
        let scene = classify(&analysis.stats, &self.config.classifier);
        self.reporter.finish_stage();

        self.reporter.begin_stage(PipelineStage::Deciding);
        let estimate = decide_exposure(
            &analysis.stats,
            &analysis.faces,
            &scene,
            &self.config.exposure,
        );
        let ev_applied = ClampAxis::ExposureEv.clamp(estimate.raw_exposure_ev);
        if ev_applied != estimate.raw_exposure_ev {
            info!(
                requested = estimate.raw_exposure_ev,
                applied = ev_applied,
                "Exposure clamped"
            );
            policy.record(ClampAxis::ExposureEv, estimate.raw_exposure_ev, ev_applied);
        }
        let decision = ExposureDecision {
            contrast_factor: policy.apply(
                ClampAxis::ContrastFactor,
                estimate.decision.contrast_factor,
            ),
            ..estimate.decision
        };
        self.reporter.finish_stage();

        let primary = select_primary(&analysis.faces, self.config.faces.sharpness_weight)
            .map(|i| analysis.faces[i].id);

        info!(
            source = %decision.source,
            scene = %scene.category,
            faces = analysis.faces.len(),
            exposure_ev = decision.exposure_ev,
            contrast = decision.contrast_factor,
            "Exposure decided"
        );

        let camera = analysis.stats.camera.clone();
        let partial = PartialTrace {
            scene: Some((scene.category, scene.rule)),
            faces_detected: Some(analysis.faces.len()),
            detection: Some(analysis.detection.clone()),
            primary_face: primary,
            global_luma: Some(analysis.stats.mean_luma),
            estimate: Some(estimate),
        };
        let mut outcome = self.finish(decision, Some(partial), camera, request, policy);
        outcome.analysis = Some(analysis);
        outcome
    }

    fn finish(
        &self,
        decision: ExposureDecision,
        partial: Option<PartialTrace>,
        camera: Option<String>,
        request: Option<&ColorCorrectionRequest>,
        mut policy: ClampPolicy,
    ) -> GradeOutcome {
        self.reporter.begin_stage(PipelineStage::Translating);
        let white_balance = request
            .map(|r| r.white_balance(&mut policy))
            .unwrap_or_default();
        let saturation = request.and_then(|r| r.saturation_override(&mut policy));
        let cdl = translate(&decision, self.config.node_index, saturation);
        self.reporter.finish_stage();

        let partial = partial.unwrap_or_default();
        let (scene, scene_rule) = match partial.scene {
            Some((category, rule)) => (Some(category), Some(rule)),
            None => (None, None),
        };
        let (face_luma, blended_luma) = partial
            .estimate
            .as_ref()
            .map_or((None, None), |e| (e.face_luma, e.blended_luma));

        let trace = DecisionTrace {
            source: decision.source,
            scene,
            scene_rule,
            camera,
            faces_detected: partial.faces_detected,
            detection: partial.detection,
            primary_face: partial.primary_face,
            global_luma: partial.global_luma,
            face_luma,
            blended_luma,
            exposure_ev: decision.exposure_ev,
            contrast_factor: decision.contrast_factor,
            slope: cdl.slope[0],
            power: cdl.power[0],
            saturation: cdl.saturation,
            white_balance,
            clamps: policy.into_events(),
        };

        info!(
            node = cdl.node_index,
            slope = cdl.slope[0],
            power = cdl.power[0],
            saturation = cdl.saturation,
            "CDL ready"
        );

        GradeOutcome {
            cdl,
            decision,
            white_balance,
            trace,
            analysis: None,
        }
    }

    /// Fetch the current frame from the host, decide, and apply.
    ///
    /// With no selected target this returns [`GradeError::NoTarget`] before
    /// any statistics are computed. A failed apply is reported through
    /// [`GradeReport::applied`] and never retried.
    pub fn run<H>(
        &mut self,
        host: &mut H,
        request: Option<&ColorCorrectionRequest>,
    ) -> Result<GradeReport>
    where
        H: GradeHost + ?Sized,
    {
        let Some(frame) = host.current_frame()? else {
            return Err(GradeError::NoTarget);
        };

        let outcome = self.decide(&frame, request);

        self.reporter.begin_stage(PipelineStage::Applying);
        let applied = host.apply_parameters(&outcome.cdl);
        self.reporter.finish_stage();

        if applied {
            info!(node = outcome.cdl.node_index, "CDL applied");
        } else {
            warn!(node = outcome.cdl.node_index, "Host rejected the CDL");
        }

        Ok(GradeReport { outcome, applied })
    }

    /// Decide twice, then grade the frame with the result and check it.
    ///
    /// The host is not involved. `deterministic` is false when the second
    /// pass (detector included) disagrees with the first.
    pub fn verify(
        &mut self,
        frame: &ColorFrame,
        request: Option<&ColorCorrectionRequest>,
    ) -> VerificationReport {
        let outcome = self.decide(frame, request);
        let replay = self.decide(frame, request);
        let deterministic = replay.cdl == outcome.cdl && replay.trace == outcome.trace;
        if !deterministic {
            warn!(
                first_slope = outcome.cdl.slope[0],
                second_slope = replay.cdl.slope[0],
                "Repeated decision differs"
            );
        }

        self.reporter.begin_stage(PipelineStage::Verifying);
        let check = check_graded(
            frame,
            &outcome.cdl,
            &self.config.extraction,
            &self.config.verify,
        );
        self.reporter.finish_stage();

        info!(
            usable = check.usable,
            flags = check.flags.len(),
            deterministic,
            "Verification done"
        );

        VerificationReport {
            outcome,
            check,
            deterministic,
        }
    }
}

/// Analysis-path details folded into the trace.
#[derive(Default)]
struct PartialTrace {
    scene: Option<(SceneCategory, String)>,
    faces_detected: Option<usize>,
    detection: Option<DetectionStatus>,
    primary_face: Option<usize>,
    global_luma: Option<f64>,
    estimate: Option<ExposureEstimate>,
}
