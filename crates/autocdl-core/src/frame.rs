use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ndarray::{s, Array2};
use serde::{Deserialize, Serialize};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::{GradeError, Result};

/// A single-channel image plane.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Information the host knows about the frame's source.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FrameMetadata {
    /// Camera / gamma tag, e.g. "Sony S-Log3".
    pub camera: Option<String>,
    pub clip_name: Option<String>,
    pub timecode: Option<String>,
}

/// Preview frame as handed over by the grading host: interleaved 8-bit RGB,
/// base64-encoded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostThumbnail {
    pub width: u32,
    pub height: u32,
    /// Pixel layout tag reported by the host (e.g. "RGB"); informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub data: String,
}

/// Color image composed of separate channel frames.
#[derive(Clone, Debug)]
pub struct ColorFrame {
    pub red: Frame,
    pub green: Frame,
    pub blue: Frame,
    pub metadata: FrameMetadata,
}

impl ColorFrame {
    pub fn from_channels(red: Frame, green: Frame, blue: Frame) -> Self {
        Self {
            red,
            green,
            blue,
            metadata: FrameMetadata::default(),
        }
    }

    /// Build a frame from an interleaved 8-bit RGB buffer (R, G, B, R, G, B, ...).
    pub fn from_rgb8(width: u32, height: u32, pixels: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GradeError::InvalidDimensions { width, height });
        }
        let (w, h) = (width as usize, height as usize);
        let expected = w * h * 3;
        if pixels.len() != expected {
            return Err(GradeError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let channel = |offset: usize| {
            Array2::from_shape_fn((h, w), |(row, col)| {
                pixels[(row * w + col) * 3 + offset] as f32 / 255.0
            })
        };

        Ok(Self::from_channels(
            Frame::new(channel(0), 8),
            Frame::new(channel(1), 8),
            Frame::new(channel(2), 8),
        ))
    }

    /// Decode a host thumbnail. The payload must hold exactly
    /// `width * height * 3` bytes.
    pub fn from_thumbnail(thumbnail: &HostThumbnail) -> Result<Self> {
        let pixels = STANDARD.decode(thumbnail.data.trim())?;
        Self::from_rgb8(thumbnail.width, thumbnail.height, &pixels)
    }

    pub fn with_metadata(mut self, metadata: FrameMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn width(&self) -> usize {
        self.red.width()
    }

    pub fn height(&self) -> usize {
        self.red.height()
    }

    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Rec.709 luminance plane.
    pub fn luminance(&self) -> Frame {
        let mut data = Array2::<f32>::zeros(self.red.data.dim());
        ndarray::Zip::from(&mut data)
            .and(&self.red.data)
            .and(&self.green.data)
            .and(&self.blue.data)
            .for_each(|y, &r, &g, &b| {
                *y = LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b;
            });
        Frame::new(data, self.red.original_bit_depth)
    }

    /// Copy of a rectangular region. The rectangle must lie inside the frame.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> ColorFrame {
        let cut = |f: &Frame| {
            Frame::new(
                f.data.slice(s![y..y + height, x..x + width]).to_owned(),
                f.original_bit_depth,
            )
        };
        ColorFrame {
            red: cut(&self.red),
            green: cut(&self.green),
            blue: cut(&self.blue),
            metadata: self.metadata.clone(),
        }
    }
}
