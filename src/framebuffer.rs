//! RGBA framebuffer for raster output.
//!
//! [`Framebuffer`] is the crate's raster [`Canvas`]. Plot rendering draws the
//! frame into one buffer, rasterizes each layer into its own transparent
//! buffer and composites the layers with [`Framebuffer::composite`], which
//! uses trueno's SIMD vectors for the per-channel blend.

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::render::{draw_point, stroke_segment};
use trueno::Vector;

/// RGBA pixel buffer with a current path for stroking.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order, 4 bytes per pixel.
    pixels: Vec<u8>,
    /// Sub-paths accumulated by `move_to`/`line_to`, consumed by `stroke`.
    path: Vec<Vec<(f64, f64)>>,
}

impl Framebuffer {
    /// Create a new fully transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_ggg::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let size = (width as usize) * (height as usize) * 4;
        Ok(Self { width, height, pixels: vec![0; size], path: Vec::new() })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the raw pixel data as a slice (RGBA, row-major, no padding).
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Fill a rectangular region with a solid color (no blending).
    ///
    /// Coordinates are clamped to framebuffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);
        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let rgba = color.to_array();
        for row_y in y1..y2 {
            let start = self.pixel_index(x1, row_y);
            let end = self.pixel_index(x2, row_y);
            for chunk in self.pixels[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Blend a color at a specific pixel coordinate using alpha blending.
    ///
    /// Uses the standard "over" compositing operation:
    /// `out = src * src_alpha + dst * dst_alpha * (1 - src_alpha)`
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        let dst = [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2], self.pixels[idx + 3]];
        self.pixels[idx..idx + 4].copy_from_slice(&over(color.to_array(), dst));
    }

    /// Composite `layer` over this framebuffer ("over" operator).
    ///
    /// Each row is blended with trueno vectors:
    /// `out = src * weight + dst * (1 - src_alpha)`, where `weight` is the
    /// source alpha for color channels and 1 for the alpha channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the framebuffers have different dimensions.
    pub fn composite(&mut self, layer: &Framebuffer) -> Result<()> {
        if self.width != layer.width || self.height != layer.height {
            return Err(Error::InvalidDimensions { width: layer.width, height: layer.height });
        }

        let row_bytes = (self.width as usize) * 4;
        for y in 0..self.height as usize {
            let start = y * row_bytes;
            let src = &layer.pixels[start..start + row_bytes];
            if src.chunks_exact(4).all(|p| p[3] == 0) {
                continue;
            }

            let mut weight = Vec::with_capacity(row_bytes);
            let mut inv = Vec::with_capacity(row_bytes);
            for p in src.chunks_exact(4) {
                let a = f32::from(p[3]) / 255.0;
                weight.extend_from_slice(&[a, a, a, 1.0]);
                inv.extend_from_slice(&[1.0 - a; 4]);
            }

            let src_vec = Vector::from_vec(src.iter().map(|&b| f32::from(b)).collect());
            let dst_vec =
                Vector::from_vec(self.pixels[start..start + row_bytes].iter().map(|&b| f32::from(b)).collect());

            let blended = match (src_vec.mul(&Vector::from_vec(weight)), dst_vec.mul(&Vector::from_vec(inv))) {
                (Ok(s), Ok(d)) => s.add(&d).ok(),
                _ => None,
            };

            let row = &mut self.pixels[start..start + row_bytes];
            if let Some(result) = blended {
                for (out, &v) in row.iter_mut().zip(result.as_slice()) {
                    *out = v.round().clamp(0.0, 255.0) as u8;
                }
            } else {
                for (dst, s) in row.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                    let d = [dst[0], dst[1], dst[2], dst[3]];
                    dst.copy_from_slice(&over([s[0], s[1], s[2], s[3]], d));
                }
            }
        }
        Ok(())
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

/// Straight-alpha "over" for one pixel.
fn over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let src_a = f32::from(src[3]) / 255.0;
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return dst;
    }
    let blend = |s: u8, d: u8| -> u8 {
        let out = (f32::from(s) * src_a + f32::from(d) * dst_a * (1.0 - src_a)) / out_a;
        out.round().clamp(0.0, 255.0) as u8
    };
    [blend(src[0], dst[0]), blend(src[1], dst[1]), blend(src[2], dst[2]), (out_a * 255.0).round() as u8]
}

impl Canvas for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return;
        }
        let x0 = x.round().max(0.0);
        let y0 = y.round().max(0.0);
        let x1 = (x + w).round().max(0.0);
        let y1 = (y + h).round().max(0.0);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        Framebuffer::fill_rect(self, x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32, color);
    }

    fn draw_point(&mut self, x: f64, y: f64, color: Rgba, size: f64) {
        draw_point(self, x, y, size, color);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.path.last_mut() {
            Some(sub) => sub.push((x, y)),
            None => self.path.push(vec![(x, y)]),
        }
    }

    fn stroke(&mut self, color: Rgba, width: f64) {
        let path = std::mem::take(&mut self.path);
        for sub in &path {
            for seg in sub.windows(2) {
                stroke_segment(self, seg[0], seg[1], width, color);
            }
        }
    }
}
