use approx::assert_abs_diff_eq;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use autocdl_core::cdl::{translate, CdlRecord};
use autocdl_core::detection::RoiRect;
use autocdl_core::error::GradeError;
use autocdl_core::exposure::{DecisionSource, ExposureDecision};
use autocdl_core::frame::{ColorFrame, HostThumbnail};
use autocdl_core::io::image_io::{load_color_image, load_frame};
use autocdl_core::io::records::{read_face_detections, read_json, read_request, write_cdl_record};
use autocdl_core::request::ColorCorrectionRequest;

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[test]
fn test_load_rgb8_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip_a001.png");
    let img = image::RgbImage::from_fn(4, 3, |x, _| {
        if x < 2 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 255])
        }
    });
    img.save(&path).unwrap();

    let frame = load_color_image(&path).unwrap();
    assert_eq!(frame.width(), 4);
    assert_eq!(frame.height(), 3);
    assert_eq!(frame.red.original_bit_depth, 8);
    assert_eq!(frame.metadata.clip_name.as_deref(), Some("clip_a001"));
    assert_abs_diff_eq!(frame.red.data[[0, 0]], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(frame.blue.data[[0, 0]], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(frame.blue.data[[2, 3]], 1.0, epsilon = 1e-6);
}

#[test]
fn test_load_rgb16_png_keeps_depth() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deep.png");
    let img: image::ImageBuffer<image::Rgb<u16>, Vec<u16>> =
        image::ImageBuffer::from_pixel(2, 2, image::Rgb([32768, 32768, 32768]));
    img.save(&path).unwrap();

    let frame = load_color_image(&path).unwrap();
    assert_eq!(frame.green.original_bit_depth, 16);
    assert_abs_diff_eq!(frame.green.data[[1, 1]], 32768.0 / 65535.0, epsilon = 1e-6);
}

#[test]
fn test_load_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_color_image(&dir.path().join("nope.png")).is_err());
}

#[test]
fn test_from_rgb8_validates_buffer() {
    let err = ColorFrame::from_rgb8(2, 2, &[0u8; 11]).unwrap_err();
    assert!(matches!(
        err,
        GradeError::BufferSizeMismatch {
            expected: 12,
            actual: 11
        }
    ));
    assert!(matches!(
        ColorFrame::from_rgb8(0, 2, &[]),
        Err(GradeError::InvalidDimensions { .. })
    ));

    let frame = ColorFrame::from_rgb8(1, 1, &[255, 51, 0]).unwrap();
    assert_abs_diff_eq!(frame.green.data[[0, 0]], 0.2, epsilon = 1e-6);
}

fn thumbnail(width: u32, height: u32, pixels: &[u8]) -> HostThumbnail {
    HostThumbnail {
        width,
        height,
        format: Some("RGB".to_string()),
        data: STANDARD.encode(pixels),
    }
}

#[test]
fn test_from_thumbnail_decodes_rgb8() {
    let frame = ColorFrame::from_thumbnail(&thumbnail(2, 1, &[255, 51, 0, 0, 0, 255])).unwrap();
    assert_eq!(frame.width(), 2);
    assert_eq!(frame.height(), 1);
    assert_abs_diff_eq!(frame.red.data[[0, 0]], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(frame.green.data[[0, 0]], 0.2, epsilon = 1e-6);
    assert_abs_diff_eq!(frame.blue.data[[0, 1]], 1.0, epsilon = 1e-6);
}

#[test]
fn test_from_thumbnail_rejects_bad_payloads() {
    let mut bad = thumbnail(2, 1, &[0; 6]);
    bad.data = "not base64!".to_string();
    assert!(matches!(
        ColorFrame::from_thumbnail(&bad),
        Err(GradeError::Base64(_))
    ));

    assert!(matches!(
        ColorFrame::from_thumbnail(&thumbnail(2, 2, &[0; 6])),
        Err(GradeError::BufferSizeMismatch {
            expected: 12,
            actual: 6
        })
    ));
}

#[test]
fn test_load_frame_reads_thumbnail_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("A001_C002.json");
    let json = format!(
        r#"{{"width": 1, "height": 1, "data": "{}"}}"#,
        STANDARD.encode([128u8, 128, 128])
    );
    std::fs::write(&path, json).unwrap();

    let frame = load_frame(&path).unwrap();
    assert_eq!(frame.pixel_count(), 1);
    assert_eq!(frame.metadata.clip_name.as_deref(), Some("A001_C002"));
    assert_abs_diff_eq!(frame.red.data[[0, 0]], 128.0 / 255.0, epsilon = 1e-6);
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn test_request_json_absent_fields() {
    let request = ColorCorrectionRequest::from_json("{}").unwrap();
    assert_eq!(request, ColorCorrectionRequest::default());
    assert!(!request.has_exposure_override());

    let request =
        ColorCorrectionRequest::from_json(r#"{"camera": "Sony S-Log3", "contrast_factor": 1.2}"#)
            .unwrap();
    assert!(request.has_exposure_override());
    assert_eq!(request.exposure_ev, None);
    assert_eq!(request.camera.as_deref(), Some("Sony S-Log3"));
}

#[test]
fn test_request_serializes_only_present_fields() {
    let request = ColorCorrectionRequest {
        exposure_ev: Some(0.5),
        ..ColorCorrectionRequest::default()
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value, serde_json::json!({ "exposure_ev": 0.5 }));
}

#[test]
fn test_malformed_request_is_json_error() {
    assert!(matches!(
        ColorCorrectionRequest::from_json("{\"exposure_ev\": \"bright\"}"),
        Err(GradeError::Json(_))
    ));
}

#[test]
fn test_read_request_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.json");
    std::fs::write(&path, r#"{"exposure_ev": -0.7, "wb_temp_delta": 300}"#).unwrap();
    let request = read_request(&path).unwrap();
    assert_eq!(request.exposure_ev, Some(-0.7));
    assert_eq!(request.wb_temp_delta, Some(300.0));
}

#[test]
fn test_read_face_detections_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("faces.json");
    std::fs::write(
        &path,
        r#"[{"bbox": {"x": 10, "y": 20, "width": 30, "height": 40}, "confidence": 0.8}]"#,
    )
    .unwrap();
    let faces = read_face_detections(&path).unwrap();
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].bbox, RoiRect::new(10, 20, 30, 40));
    assert_eq!(faces[0].confidence, 0.8);
}

#[test]
fn test_cdl_record_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cdl.json");
    let cdl = translate(
        &ExposureDecision {
            exposure_ev: 1.0,
            contrast_factor: 1.25,
            source: DecisionSource::Manual,
        },
        2,
        None,
    );
    write_cdl_record(&cdl.to_record(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.ends_with('\n'));
    let back: CdlRecord = read_json(&path).unwrap();
    assert_eq!(back.node_index, "2");
    assert_eq!(back.slope, "2.0000 2.0000 2.0000");
    assert_eq!(back.offset, "0.0000 0.0000 0.0000");
    assert_eq!(back.power, "0.8000 0.8000 0.8000");
    assert_eq!(back.saturation, "1.0000");
}
