use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Thumbnail data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("No clip or frame is selected in the host")]
    NoTarget,

    /// Returned by a [`crate::detection::FaceDetector`] that cannot produce
    /// boxes for a frame. The pipeline logs it and grades without faces.
    #[error("Face detector '{detector}' failed: {reason}")]
    Detector { detector: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GradeError>;
