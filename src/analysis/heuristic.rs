//! Pixel-sampling petal heuristic.
//!
//! Pixels inside a central disk are counted as "bright" when their mean RGB
//! exceeds 150, and as "variation" when they differ strongly from the pixel
//! one row above.  The two ratios feed a fixed linear formula.

use serde::Serialize;

use crate::analysis::pixels::PixelBuffer;

pub const BRIGHTNESS_THRESHOLD: f64 = 150.0;
pub const VARIATION_THRESHOLD: u32 = 50;
/// Radius of the analysis disk as a fraction of half the shorter side.
pub const DISK_FRACTION: f64 = 0.8;

pub const BASE_PETALS: f64 = 8.0;
pub const BRIGHT_WEIGHT: f64 = 15.0;
pub const EDGE_WEIGHT: f64 = 20.0;

pub const MIN_PETALS: u32 = 3;
pub const MAX_PETALS: u32 = 50;

/// Counters gathered by one pass over a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanStats {
    pub bright_pixels: u64,
    pub color_variation: u64,
    /// Normalizer: a quarter of `width * height`.
    pub total_pixels: f64,
}

impl ScanStats {
    pub fn bright_ratio(&self) -> f64 {
        self.bright_pixels as f64 / self.total_pixels
    }

    pub fn edge_ratio(&self) -> f64 {
        self.color_variation as f64 / self.total_pixels
    }
}

/// Walks every pixel in row-major order and tallies the disk statistics.
pub fn scan(buf: &PixelBuffer) -> ScanStats {
    let width = buf.width() as usize;
    let height = buf.height() as usize;
    let pixels = buf.as_bytes();

    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    let max_distance = width.min(height) as f64 / 2.0;
    let radius = max_distance * DISK_FRACTION;
    let row_stride = width * 4;

    let mut bright_pixels = 0u64;
    let mut color_variation = 0u64;

    for (pixel_index, px) in pixels.chunks_exact(4).enumerate() {
        let x = (pixel_index % width) as f64;
        let y = (pixel_index / width) as f64;
        let distance = ((x - center_x).powi(2) + (y - center_y).powi(2)).sqrt();
        if distance >= radius {
            continue;
        }

        let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
        let brightness = (r + g + b) as f64 / 3.0;
        if brightness > BRIGHTNESS_THRESHOLD {
            bright_pixels += 1;
        }

        // Compared on the byte offset, so pixel (0, 1) is skipped along with row 0.
        let i = pixel_index * 4;
        if i > row_stride {
            let above = &pixels[i - row_stride..i - row_stride + 3];
            let diff = r.abs_diff(above[0] as u32)
                + g.abs_diff(above[1] as u32)
                + b.abs_diff(above[2] as u32);
            if diff > VARIATION_THRESHOLD {
                color_variation += 1;
            }
        }
    }

    ScanStats {
        bright_pixels,
        color_variation,
        total_pixels: (width * height) as f64 / 4.0,
    }
}

/// `round(8 + bright_ratio*15 + edge_ratio*20)` clamped to `[3, 50]`.
pub fn estimate_petals(stats: &ScanStats) -> u32 {
    let raw = BASE_PETALS + stats.bright_ratio() * BRIGHT_WEIGHT + stats.edge_ratio() * EDGE_WEIGHT;
    // Half rounds up.
    let rounded = (raw + 0.5).floor();
    rounded.clamp(MIN_PETALS as f64, MAX_PETALS as f64) as u32
}
