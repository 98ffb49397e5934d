use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// Rec.709 luma of a normalised RGB triple.
#[inline]
pub fn rec709_luma(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

/// HSL saturation of a normalised RGB triple, in [0.0, 1.0].
#[inline]
pub fn hsl_saturation(r: f32, g: f32, b: f32) -> f32 {
    let max_c = r.max(g).max(b);
    let min_c = r.min(g).min(b);
    let chroma = max_c - min_c;
    if chroma <= 0.0 {
        return 0.0;
    }
    let lightness = (max_c + min_c) / 2.0;
    if lightness <= 0.5 {
        chroma / (max_c + min_c)
    } else {
        chroma / (2.0 - max_c - min_c)
    }
}
