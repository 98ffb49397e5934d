/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// ITU-R BT.709 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.0722;

/// Number of bins in the luminance histogram.
pub const LUMA_HISTOGRAM_BINS: usize = 256;

/// Default highlight threshold (230 on an 8-bit scale).
pub const DEFAULT_HIGHLIGHT_THRESHOLD: f64 = 230.0 / 255.0;

/// Default shadow threshold (25 on an 8-bit scale).
pub const DEFAULT_SHADOW_THRESHOLD: f64 = 25.0 / 255.0;

/// Slack on the highlight/shadow comparisons. Luma is summed in f32, so an
/// 8-bit code sitting exactly on a threshold can land a few ulps either side.
/// Far below one 8-bit step (~0.0039).
pub const LUMA_THRESHOLD_TOLERANCE: f64 = 1e-6;

/// Target luminance for skin tones in the Rec.709-referenced model.
pub const SKIN_TARGET_LUMA: f64 = 0.50;

/// Share of the blended luminance taken from the face regions.
pub const FACE_WEIGHT: f64 = 0.70;

/// Share of the blended luminance taken from the whole frame.
pub const GLOBAL_WEIGHT: f64 = 0.30;

/// Contrast factor applied on the face-weighted path for S-Log3 sources.
pub const SLOG3_BASE_CONTRAST: f64 = 1.25;

/// Contrast factor applied on the face-weighted path for non-log sources.
pub const NEUTRAL_CONTRAST: f64 = 1.0;

/// Adaptive S-Log3 contrast: boost for flat frames (luma std below `FLAT_LUMA_STD`).
pub const ADAPTIVE_CONTRAST_BOOST: f64 = 0.10;

/// Adaptive S-Log3 contrast: reduction for wide frames (luma std above `WIDE_LUMA_STD`).
pub const ADAPTIVE_CONTRAST_CUT: f64 = 0.05;

pub const FLAT_LUMA_STD: f64 = 0.10;
pub const WIDE_LUMA_STD: f64 = 0.20;

/// Valid exposure adjustment range in EV.
pub const EXPOSURE_EV_RANGE: (f64, f64) = (-2.0, 2.0);

/// Valid contrast factor range.
pub const CONTRAST_FACTOR_RANGE: (f64, f64) = (0.5, 2.0);

/// Valid white-balance temperature delta range (Kelvin-equivalent units).
pub const WB_TEMP_DELTA_RANGE: (f64, f64) = (-2000.0, 2000.0);

/// Valid white-balance tint delta range.
pub const WB_TINT_DELTA_RANGE: (f64, f64) = (-100.0, 100.0);

/// Valid CDL saturation override range.
pub const SATURATION_RANGE: (f64, f64) = (0.0, 2.0);

/// Grading node that receives the CDL when none is configured.
pub const DEFAULT_NODE_INDEX: u32 = 1;

/// Default minimum detector confidence for a face to be kept.
pub const DEFAULT_MIN_FACE_CONFIDENCE: f64 = 0.3;

/// Default ROI growth about the face centre, so the region takes in more skin.
pub const DEFAULT_ROI_EXPAND_RATIO: f64 = 1.5;

/// Default weight of sharpness when ranking the primary face.
pub const DEFAULT_SHARPNESS_WEIGHT: f64 = 0.3;

/// Default low-light luminance threshold for the night rule.
pub const DEFAULT_NIGHT_LUMA: f64 = 0.35;

/// Default highlight fraction above which a frame counts as outdoor daylight.
pub const DEFAULT_OUTDOOR_HIGHLIGHT_RATIO: f64 = 0.15;

/// S-Log3 places 18% grey at roughly 0.41; the signature band brackets it.
pub const DEFAULT_SLOG3_MIDGRAY_BAND: (f64, f64) = (0.25, 0.60);

/// Minimum share of pixels inside the mid-gray band for the S-Log3 signature.
pub const DEFAULT_SLOG3_MIN_MIDTONE_FRACTION: f64 = 0.85;

/// Maximum highlight or shadow fraction for the S-Log3 signature.
pub const DEFAULT_SLOG3_MAX_CLIP_FRACTION: f64 = 0.01;

/// Maximum mean saturation for the S-Log3 signature (log footage looks washed out).
pub const DEFAULT_SLOG3_MAX_SATURATION: f64 = 0.30;

/// Graded highlight fraction above which clipping is flagged.
pub const DEFAULT_HIGHLIGHT_CLIP_RATIO: f64 = 0.08;

/// Graded shadow fraction above which crushed blacks are flagged.
pub const DEFAULT_SHADOW_CRUSH_RATIO: f64 = 0.20;

/// Graded mean luma below which midtones count as too dark.
pub const DEFAULT_DARK_MIDTONE_LUMA: f64 = 0.28;

/// Graded mean luma above which midtones count as too bright.
pub const DEFAULT_BRIGHT_MIDTONE_LUMA: f64 = 0.65;

/// Graded mean luma range of a usable result.
pub const DEFAULT_USABLE_LUMA_RANGE: (f64, f64) = (0.30, 0.62);
