use ndarray::ArrayView2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::consts::{LUMA_HISTOGRAM_BINS, LUMA_THRESHOLD_TOLERANCE, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::ColorFrame;

use super::color::{hsl_saturation, rec709_luma};
use super::config::ExtractionConfig;

/// 256-bin histogram of Rec.709 luminance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumaHistogram {
    pub bins: Vec<u32>,
}

impl Default for LumaHistogram {
    fn default() -> Self {
        Self {
            bins: vec![0; LUMA_HISTOGRAM_BINS],
        }
    }
}

impl LumaHistogram {
    #[inline]
    fn bin_of(luma: f32) -> usize {
        ((luma.clamp(0.0, 1.0) * LUMA_HISTOGRAM_BINS as f32) as usize).min(LUMA_HISTOGRAM_BINS - 1)
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    /// Share of pixels whose bin centre lies in `[lo, hi]`. Zero for an empty histogram.
    pub fn fraction_between(&self, lo: f64, hi: f64) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let n = self.bins.len() as f64;
        let inside: u64 = self
            .bins
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                let centre = (*i as f64 + 0.5) / n;
                centre >= lo && centre <= hi
            })
            .map(|(_, &c)| c as u64)
            .sum();
        inside as f64 / total as f64
    }
}

/// Whole-frame statistics, derived once per frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameStatistics {
    pub mean_luma: f64,
    pub luma_std: f64,
    pub mean_saturation: f64,
    pub saturation_std: f64,
    /// Fraction of pixels with luma at or above the highlight threshold.
    pub highlight_ratio: f64,
    /// Fraction of pixels with luma at or below the shadow threshold.
    pub shadow_ratio: f64,
    pub histogram: LumaHistogram,
    pub pixel_count: usize,
    /// Camera / gamma tag carried over from the frame metadata.
    pub camera: Option<String>,
}

impl FrameStatistics {
    /// Statistics known only by their summary values (no histogram).
    pub fn from_summary(
        mean_luma: f64,
        mean_saturation: f64,
        highlight_ratio: f64,
        shadow_ratio: f64,
    ) -> Self {
        Self {
            mean_luma,
            luma_std: 0.0,
            mean_saturation,
            saturation_std: 0.0,
            highlight_ratio,
            shadow_ratio,
            histogram: LumaHistogram::default(),
            pixel_count: 0,
            camera: None,
        }
    }

    pub fn with_camera(mut self, camera: impl Into<String>) -> Self {
        self.camera = Some(camera.into());
        self
    }
}

/// Running sums for one region (a row, a face box or the whole frame).
#[derive(Clone, Debug, Default)]
pub(crate) struct Accumulator {
    luma_sum: f64,
    luma_sq: f64,
    sat_sum: f64,
    sat_sq: f64,
    highlights: usize,
    shadows: usize,
    count: usize,
}

impl Accumulator {
    #[inline]
    fn push(&mut self, luma: f32, sat: f32, highlight: f64, shadow: f64) {
        let (l, s) = (luma as f64, sat as f64);
        self.luma_sum += l;
        self.luma_sq += l * l;
        self.sat_sum += s;
        self.sat_sq += s * s;
        if l >= highlight - LUMA_THRESHOLD_TOLERANCE {
            self.highlights += 1;
        } else if l <= shadow + LUMA_THRESHOLD_TOLERANCE {
            self.shadows += 1;
        }
        self.count += 1;
    }

    fn merge(&mut self, other: &Accumulator) {
        self.luma_sum += other.luma_sum;
        self.luma_sq += other.luma_sq;
        self.sat_sum += other.sat_sum;
        self.sat_sq += other.sat_sq;
        self.highlights += other.highlights;
        self.shadows += other.shadows;
        self.count += other.count;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn mean_std(&self) -> ((f64, f64), (f64, f64)) {
        if self.count == 0 {
            return ((0.0, 0.0), (0.0, 0.0));
        }
        let n = self.count as f64;
        let ml = self.luma_sum / n;
        let ms = self.sat_sum / n;
        let vl = (self.luma_sq / n - ml * ml).max(0.0);
        let vs = (self.sat_sq / n - ms * ms).max(0.0);
        ((ml, vl.sqrt()), (ms, vs.sqrt()))
    }
}

/// Accumulate one rectangular window of the three channel planes.
pub(crate) fn accumulate(
    red: ArrayView2<f32>,
    green: ArrayView2<f32>,
    blue: ArrayView2<f32>,
    config: &ExtractionConfig,
    mut histogram: Option<&mut LumaHistogram>,
) -> Accumulator {
    let mut acc = Accumulator::default();
    ndarray::Zip::from(red)
        .and(green)
        .and(blue)
        .for_each(|&r, &g, &b| {
            let luma = rec709_luma(r, g, b);
            acc.push(
                luma,
                hsl_saturation(r, g, b),
                config.highlight_threshold,
                config.shadow_threshold,
            );
            if let Some(hist) = histogram.as_deref_mut() {
                hist.bins[LumaHistogram::bin_of(luma)] += 1;
            }
        });
    acc
}

/// Compute whole-frame statistics. The input frame is only read.
///
/// Rows are processed in parallel on large frames; the per-row partial sums
/// are always merged in row order so the result does not depend on the
/// thread schedule.
pub fn frame_statistics(frame: &ColorFrame, config: &ExtractionConfig) -> FrameStatistics {
    let h = frame.height();

    let row_stats = |row: usize| {
        let mut hist = LumaHistogram::default();
        let acc = accumulate(
            frame.red.data.slice(ndarray::s![row..row + 1, ..]),
            frame.green.data.slice(ndarray::s![row..row + 1, ..]),
            frame.blue.data.slice(ndarray::s![row..row + 1, ..]),
            config,
            Some(&mut hist),
        );
        (acc, hist)
    };

    let rows: Vec<(Accumulator, LumaHistogram)> = if frame.pixel_count() >= PARALLEL_PIXEL_THRESHOLD
    {
        (0..h).into_par_iter().map(row_stats).collect()
    } else {
        (0..h).map(row_stats).collect()
    };

    let mut total = Accumulator::default();
    let mut histogram = LumaHistogram::default();
    for (acc, hist) in &rows {
        total.merge(acc);
        for (dst, src) in histogram.bins.iter_mut().zip(&hist.bins) {
            *dst += src;
        }
    }

    let ((mean_luma, luma_std), (mean_saturation, saturation_std)) = total.mean_std();
    let n = total.count.max(1) as f64;

    FrameStatistics {
        mean_luma,
        luma_std,
        mean_saturation,
        saturation_std,
        highlight_ratio: total.highlights as f64 / n,
        shadow_ratio: total.shadows as f64 / n,
        histogram,
        pixel_count: total.count,
        camera: frame.metadata.camera.clone(),
    }
}
