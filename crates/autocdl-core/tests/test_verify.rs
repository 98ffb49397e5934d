mod common;

use approx::assert_abs_diff_eq;
use autocdl_core::cdl::CdlParameters;
use autocdl_core::detection::{FaceDetection, FaceDetector, RoiRect};
use autocdl_core::error::Result;
use autocdl_core::frame::ColorFrame;
use autocdl_core::pipeline::{GradeConfig, Orchestrator, PipelineStage};
use autocdl_core::request::ColorCorrectionRequest;
use autocdl_core::stats::{frame_statistics, ExtractionConfig, FrameStatistics};
use autocdl_core::verify::{
    apply_cdl, check_graded, detect_flags, is_usable, Severity, VerifyConfig, FLAG_RULES,
};

use common::{detection, gray_frame, gray_frame_with_patch, RecordingReporter};

fn cdl(slope: f64, offset: f64, power: f64, saturation: f64) -> CdlParameters {
    CdlParameters {
        node_index: 1,
        slope: [slope; 3],
        offset: [offset; 3],
        power: [power; 3],
        saturation,
    }
}

fn rule_names(stats: &FrameStatistics, config: &VerifyConfig) -> Vec<String> {
    detect_flags(stats, config).into_iter().map(|f| f.rule).collect()
}

/// Finds a face on every other call.
struct FlickeringDetector {
    calls: usize,
}

impl FaceDetector for FlickeringDetector {
    fn name(&self) -> &str {
        "flickering"
    }

    fn detect(&mut self, _frame: &ColorFrame) -> Result<Vec<FaceDetection>> {
        self.calls += 1;
        if self.calls % 2 == 1 {
            Ok(vec![detection(40, 40, 20, 20, 0.9)])
        } else {
            Ok(Vec::new())
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering the CDL
// ---------------------------------------------------------------------------

#[test]
fn test_identity_cdl_leaves_frame_unchanged() {
    let frame = gray_frame_with_patch(30, 20, 0.35, RoiRect::new(5, 5, 10, 10), 0.8);
    let graded = apply_cdl(&frame, &cdl(1.0, 0.0, 1.0, 1.0));
    assert_eq!(graded.red.data, frame.red.data);
    assert_eq!(graded.green.data, frame.green.data);
    assert_eq!(graded.blue.data, frame.blue.data);
}

#[test]
fn test_slope_offset_power_order() {
    let frame = gray_frame(4, 4, 0.2);
    let graded = apply_cdl(&frame, &cdl(2.0, 0.05, 0.8, 1.0));
    let expected = (0.2f64 * 2.0 + 0.05).powf(0.8);
    assert_abs_diff_eq!(graded.red.data[[0, 0]] as f64, expected, epsilon = 1e-6);
    assert_abs_diff_eq!(graded.blue.data[[3, 3]] as f64, expected, epsilon = 1e-6);
}

#[test]
fn test_graded_values_are_clamped() {
    let graded = apply_cdl(&gray_frame(4, 4, 0.8), &cdl(4.0, 0.0, 1.0, 1.0));
    assert!(graded.red.data.iter().all(|&v| v == 1.0));
    let graded = apply_cdl(&gray_frame(4, 4, 0.1), &cdl(1.0, -0.5, 1.0, 1.0));
    assert!(graded.green.data.iter().all(|&v| v == 0.0));
}

#[test]
fn test_zero_saturation_collapses_to_luma() {
    let frame = ColorFrame::from_rgb8(1, 1, &[255, 0, 0]).unwrap();
    let graded = apply_cdl(&frame, &cdl(1.0, 0.0, 1.0, 0.0));
    for plane in [&graded.red, &graded.green, &graded.blue] {
        assert_abs_diff_eq!(plane.data[[0, 0]], 0.2126, epsilon = 1e-6);
    }
}

#[test]
fn test_apply_cdl_does_not_touch_input() {
    let frame = gray_frame(8, 8, 0.3);
    let before = frame.red.data.clone();
    let _ = apply_cdl(&frame, &cdl(2.0, 0.0, 0.5, 1.5));
    assert_eq!(frame.red.data, before);
}

#[test]
fn test_large_frame_grading_matches_small_path() {
    // above the parallel cut-over
    let large = gray_frame(300, 300, 0.3);
    let small = gray_frame(3, 3, 0.3);
    let params = cdl(1.7, 0.01, 0.9, 1.2);
    assert_eq!(
        apply_cdl(&large, &params).red.data[[150, 150]],
        apply_cdl(&small, &params).red.data[[1, 1]]
    );
}

// ---------------------------------------------------------------------------
// Flags and usability
// ---------------------------------------------------------------------------

#[test]
fn test_flag_rule_table_order() {
    let names: Vec<&str> = FLAG_RULES.iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec![
            "highlight_clipping_risk",
            "shadow_crush_risk",
            "midtone_too_dark",
            "midtone_too_bright",
        ]
    );
    assert_eq!(FLAG_RULES[0].severity, Severity::High);
    assert_eq!(FLAG_RULES[1].severity, Severity::High);
    assert_eq!(FLAG_RULES[2].severity, Severity::Medium);
    assert_eq!(FLAG_RULES[3].severity, Severity::Medium);
}

#[test]
fn test_clean_grade_has_no_flags() {
    let config = VerifyConfig::default();
    let stats = FrameStatistics::from_summary(0.45, 0.2, 0.01, 0.05);
    assert!(detect_flags(&stats, &config).is_empty());
    assert!(is_usable(&stats, &[], &config));
}

#[test]
fn test_each_rule_fires() {
    let config = VerifyConfig::default();
    assert_eq!(
        rule_names(&FrameStatistics::from_summary(0.45, 0.2, 0.10, 0.0), &config),
        vec!["highlight_clipping_risk"]
    );
    assert_eq!(
        rule_names(&FrameStatistics::from_summary(0.45, 0.2, 0.0, 0.25), &config),
        vec!["shadow_crush_risk"]
    );
    assert_eq!(
        rule_names(&FrameStatistics::from_summary(0.20, 0.2, 0.0, 0.0), &config),
        vec!["midtone_too_dark"]
    );
    assert_eq!(
        rule_names(&FrameStatistics::from_summary(0.70, 0.2, 0.0, 0.0), &config),
        vec!["midtone_too_bright"]
    );
}

#[test]
fn test_flags_keep_rule_order_and_values() {
    let config = VerifyConfig::default();
    let stats = FrameStatistics::from_summary(0.20, 0.2, 0.09, 0.30);
    let flags = detect_flags(&stats, &config);
    let names: Vec<&str> = flags.iter().map(|f| f.rule.as_str()).collect();
    assert_eq!(
        names,
        vec!["highlight_clipping_risk", "shadow_crush_risk", "midtone_too_dark"]
    );
    assert_eq!(flags[1].value, 0.30);
    assert_eq!(flags[1].threshold, 0.20);
    assert_eq!(flags[1].severity, Severity::High);
}

#[test]
fn test_flag_comparisons_are_strict() {
    let config = VerifyConfig::default();
    let at_limits = FrameStatistics::from_summary(0.28, 0.2, 0.08, 0.20);
    assert!(detect_flags(&at_limits, &config).is_empty());
    let bright_limit = FrameStatistics::from_summary(0.65, 0.2, 0.0, 0.0);
    assert!(detect_flags(&bright_limit, &config).is_empty());
}

#[test]
fn test_usable_luma_range_is_inclusive() {
    let config = VerifyConfig::default();
    let usable = |luma: f64| {
        let stats = FrameStatistics::from_summary(luma, 0.2, 0.0, 0.0);
        let flags = detect_flags(&stats, &config);
        is_usable(&stats, &flags, &config)
    };
    assert!(usable(0.30));
    assert!(usable(0.62));
    assert!(!usable(0.29));
    assert!(!usable(0.63));
}

#[test]
fn test_high_flag_makes_grade_unusable() {
    let config = VerifyConfig::default();
    let stats = FrameStatistics::from_summary(0.45, 0.2, 0.12, 0.0);
    let flags = detect_flags(&stats, &config);
    assert!(!is_usable(&stats, &flags, &config));
}

#[test]
fn test_medium_flag_alone_keeps_grade_usable() {
    let config = VerifyConfig {
        dark_midtone_luma: 0.40,
        ..VerifyConfig::default()
    };
    let stats = FrameStatistics::from_summary(0.35, 0.2, 0.0, 0.0);
    let flags = detect_flags(&stats, &config);
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].severity, Severity::Medium);
    assert!(is_usable(&stats, &flags, &config));
}

// ---------------------------------------------------------------------------
// check_graded
// ---------------------------------------------------------------------------

#[test]
fn test_check_graded_measures_the_graded_frame() {
    let frame = gray_frame(16, 16, 0.2);
    let check = check_graded(
        &frame,
        &cdl(2.0, 0.0, 1.0, 1.0),
        &ExtractionConfig::default(),
        &VerifyConfig::default(),
    );
    assert_abs_diff_eq!(check.graded.mean_luma, 0.4, epsilon = 1e-5);
    assert!(check.flags.is_empty());
    assert!(check.usable);
    assert_eq!(check.worst_severity(), None);

    // the input statistics are unchanged
    let before = frame_statistics(&frame, &ExtractionConfig::default());
    assert_abs_diff_eq!(before.mean_luma, 0.2, epsilon = 1e-5);
}

#[test]
fn test_check_graded_flags_clipping() {
    let check = check_graded(
        &gray_frame(16, 16, 0.6),
        &cdl(2.0, 0.0, 1.0, 1.0),
        &ExtractionConfig::default(),
        &VerifyConfig::default(),
    );
    let names: Vec<&str> = check.flags.iter().map(|f| f.rule.as_str()).collect();
    assert_eq!(names, vec!["highlight_clipping_risk", "midtone_too_bright"]);
    assert!(!check.usable);
    assert_eq!(check.worst_severity(), Some(Severity::High));
}

// ---------------------------------------------------------------------------
// Orchestrator::verify
// ---------------------------------------------------------------------------

#[test]
fn test_verify_scene_rule_grade() {
    // night preset: +0.5 EV, contrast 1.15 on a 0.15 gray frame
    let reporter = RecordingReporter::shared();
    let mut orchestrator =
        Orchestrator::new(GradeConfig::default()).with_reporter(reporter.clone());
    let report = orchestrator.verify(&gray_frame(32, 32, 0.15), None);

    assert!(report.deterministic);
    let expected = (0.15f64 * 2f64.sqrt()).powf(1.0 / 1.15);
    assert_abs_diff_eq!(report.check.graded.mean_luma, expected, epsilon = 1e-5);
    let names: Vec<&str> = report.check.flags.iter().map(|f| f.rule.as_str()).collect();
    assert_eq!(names, vec!["midtone_too_dark"]);
    assert!(!report.check.usable);
    assert_eq!(reporter.stages().last(), Some(&PipelineStage::Verifying));
}

#[test]
fn test_verify_manual_grade() {
    let request = ColorCorrectionRequest {
        exposure_ev: Some(1.0),
        ..ColorCorrectionRequest::default()
    };
    let report =
        Orchestrator::new(GradeConfig::default()).verify(&gray_frame(16, 16, 0.22), Some(&request));
    assert!(report.deterministic);
    assert_abs_diff_eq!(report.check.graded.mean_luma, 0.44, epsilon = 1e-5);
    assert!(report.check.usable);
}

#[test]
fn test_verify_detects_unstable_detector() {
    let frame = gray_frame_with_patch(100, 100, 0.7, RoiRect::new(40, 40, 20, 20), 0.4);
    let mut orchestrator = Orchestrator::new(GradeConfig::default())
        .with_detector(Box::new(FlickeringDetector { calls: 0 }));
    let report = orchestrator.verify(&frame, None);
    assert!(!report.deterministic);
}

#[test]
fn test_verify_report_serializes() {
    let report = Orchestrator::new(GradeConfig::default()).verify(&gray_frame(8, 8, 0.6), None);
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["deterministic"], true);
    assert!(value["check"]["flags"].is_array());
    assert!(value["check"]["usable"].is_boolean());
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_verify_config_section() {
    assert_eq!(GradeConfig::default().verify, VerifyConfig::default());
    let text = "[verify]\nhighlight_clip_ratio = 0.1\n";
    let config: GradeConfig = toml::from_str(text).unwrap();
    assert_eq!(config.verify.highlight_clip_ratio, 0.1);
    assert_eq!(config.verify.usable_luma_range, (0.30, 0.62));
}
