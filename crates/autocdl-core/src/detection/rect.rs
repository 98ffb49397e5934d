use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RoiRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Intersection with a `frame_w` x `frame_h` image. `None` when nothing is left.
    pub fn clip_to(&self, frame_w: usize, frame_h: usize) -> Option<RoiRect> {
        let (fw, fh) = (frame_w as u64, frame_h as u64);
        let (x, y) = (self.x as u64, self.y as u64);
        if x >= fw || y >= fh {
            return None;
        }
        let width = (self.width as u64).min(fw - x);
        let height = (self.height as u64).min(fh - y);
        if width == 0 || height == 0 {
            return None;
        }
        Some(RoiRect::new(x as u32, y as u32, width as u32, height as u32))
    }

    /// Grow about the integer centre by `ratio`, then clip to the frame.
    pub fn expand(&self, ratio: f64, frame_w: usize, frame_h: usize) -> Option<RoiRect> {
        let cx = self.x as i64 + self.width as i64 / 2;
        let cy = self.y as i64 + self.height as i64 / 2;
        let new_w = (self.width as f64 * ratio) as i64;
        let new_h = (self.height as f64 * ratio) as i64;
        let new_x = (cx - new_w / 2).max(0);
        let new_y = (cy - new_h / 2).max(0);
        if new_w <= 0 || new_h <= 0 {
            return None;
        }
        let to_u32 = |v: i64| u32::try_from(v).unwrap_or(u32::MAX);
        RoiRect::new(to_u32(new_x), to_u32(new_y), to_u32(new_w), to_u32(new_h))
            .clip_to(frame_w, frame_h)
    }
}
