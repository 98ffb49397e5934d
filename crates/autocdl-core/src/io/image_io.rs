use std::path::Path;

use ndarray::Array2;

use crate::error::{GradeError, Result};
use crate::frame::{ColorFrame, Frame, FrameMetadata};

use super::records::read_thumbnail;

/// Load a frame from disk: a `.json` path is read as a host thumbnail
/// record, anything else as an image file.
pub fn load_frame(path: &Path) -> Result<ColorFrame> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if !is_json {
        return load_color_image(path);
    }
    let frame = ColorFrame::from_thumbnail(&read_thumbnail(path)?)?;
    Ok(frame.with_metadata(FrameMetadata {
        clip_name: clip_name_of(path),
        ..FrameMetadata::default()
    }))
}

fn clip_name_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

/// Load an image file (PNG, TIFF, JPEG, ...) into a ColorFrame.
///
/// 16-bit sources keep their precision; everything else is read as 8-bit.
pub fn load_color_image(path: &Path) -> Result<ColorFrame> {
    let img = image::open(path)?;
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(GradeError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let bit_depth = match img.color() {
        image::ColorType::L16
        | image::ColorType::La16
        | image::ColorType::Rgb16
        | image::ColorType::Rgba16 => 16,
        _ => 8,
    };

    let rgb = img.to_rgb16();
    let (w, h) = (w as usize, h as usize);
    let mut red = Array2::<f32>::zeros((h, w));
    let mut green = Array2::<f32>::zeros((h, w));
    let mut blue = Array2::<f32>::zeros((h, w));

    for (col, row, pixel) in rgb.enumerate_pixels() {
        let (r, c) = (row as usize, col as usize);
        red[[r, c]] = pixel.0[0] as f32 / 65535.0;
        green[[r, c]] = pixel.0[1] as f32 / 65535.0;
        blue[[r, c]] = pixel.0[2] as f32 / 65535.0;
    }

    let clip_name = clip_name_of(path);

    Ok(ColorFrame::from_channels(
        Frame::new(red, bit_depth),
        Frame::new(green, bit_depth),
        Frame::new(blue, bit_depth),
    )
    .with_metadata(FrameMetadata {
        camera: None,
        clip_name,
        timecode: None,
    }))
}
