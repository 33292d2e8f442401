//! Preview masking and crop extraction.
//!
//! Both operations read the base image and return a fresh buffer; the base is never
//! written to.
use image::{Rgb, RgbImage};

use crate::geometry::{PixelBounds, SelectionRect};

/// Opacity of the dark overlay outside the selection
pub const DEFAULT_OVERLAY_ALPHA: f32 = 0.6;

#[derive(Debug, Clone)]
pub struct Compositor {
    /// `blend[channel][value]`, precomputed for every 8-bit input
    blend: [[u8; 256]; 3],
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLAY_ALPHA, Rgb([0, 0, 0]))
    }
}

impl Compositor {
    pub fn new(overlay_alpha: f32, overlay_color: Rgb<u8>) -> Self {
        let overlay_alpha = overlay_alpha.clamp(0.0, 1.0);
        let mut blend = [[0u8; 256]; 3];
        for (channel, table) in blend.iter_mut().enumerate() {
            let overlay = overlay_color.0[channel] as f32;
            for (value, out) in table.iter_mut().enumerate() {
                *out = blend_channel(value as u8, overlay, overlay_alpha);
            }
        }
        Self { blend }
    }

    /// Blends a single pixel with the overlay
    pub fn dim(&self, pixel: Rgb<u8>) -> Rgb<u8> {
        let [r, g, b] = pixel.0;
        Rgb([
            self.blend[0][r as usize],
            self.blend[1][g as usize],
            self.blend[2][b as usize],
        ])
    }

    /// Copy of `base` with everything outside `rect` dimmed.
    ///
    /// A rectangle that covers no whole pixel leaves the copy untouched.
    pub fn render_preview(&self, base: &RgbImage, rect: &SelectionRect) -> RgbImage {
        let mut preview = base.clone();
        let bounds = rect.pixel_bounds(base.width(), base.height());
        if bounds.is_empty() {
            log::trace!("Degenerate selection {:?}, preview left unmasked", rect);
            return preview;
        }

        let row_len = base.width() as usize * 3;
        if row_len == 0 {
            return preview;
        }
        for (y, row) in preview.chunks_exact_mut(row_len).enumerate() {
            let y = y as u32;
            let row_inside = y >= bounds.y0 && y < bounds.y1;
            for (x, px) in row.chunks_exact_mut(3).enumerate() {
                if row_inside && bounds.contains(x as u32, y) {
                    continue;
                }
                px[0] = self.blend[0][px[0] as usize];
                px[1] = self.blend[1][px[1] as usize];
                px[2] = self.blend[2][px[2] as usize];
            }
        }
        preview
    }

    /// The sub-image bounded by the sorted corners of `rect`, clamped to `base`.
    ///
    /// Degenerate rectangles give a zero-sized buffer; exporting one is the caller's problem.
    pub fn crop(&self, base: &RgbImage, rect: &SelectionRect) -> RgbImage {
        crop_bounds(base, rect.pixel_bounds(base.width(), base.height()))
    }
}

fn crop_bounds(base: &RgbImage, bounds: PixelBounds) -> RgbImage {
    if bounds.is_empty() {
        return RgbImage::new(bounds.width(), bounds.height());
    }
    image::imageops::crop_imm(base, bounds.x0, bounds.y0, bounds.width(), bounds.height()).to_image()
}

fn blend_channel(value: u8, overlay: f32, alpha: f32) -> u8 {
    (value as f32 * (1.0 - alpha) + overlay * alpha)
        .round()
        .clamp(0.0, 255.0) as u8
}
