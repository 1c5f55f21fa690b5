use crate::foundation::core::Size;
use crate::foundation::error::{CoghazError, CoghazResult};

/// Rasterized coverage of a text string at a reference size.
///
/// Coverage is row-major, one value in `[0, 1]` per pixel. The natural bounds are the
/// coverage grid's own extent; a run with no ink has zero bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun {
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl GlyphRun {
    /// Build a run from a coverage grid. Values are clamped into `[0, 1]`.
    pub fn new(width: u32, height: u32, mut coverage: Vec<f32>) -> CoghazResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| CoghazError::configuration("glyph run size overflow"))?;
        if coverage.len() != expected {
            return Err(CoghazError::configuration(format!(
                "glyph run expects {expected} coverage values, got {}",
                coverage.len()
            )));
        }
        for c in &mut coverage {
            *c = if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 };
        }
        Ok(Self {
            width,
            height,
            coverage,
        })
    }

    /// A run with no ink.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            coverage: Vec::new(),
        }
    }

    /// Build a run from 8-bit alpha, cropping to the tight box around non-zero samples.
    pub fn from_alpha_cropped(width: u32, height: u32, alpha: &[u8]) -> CoghazResult<Self> {
        if alpha.len() != width as usize * height as usize {
            return Err(CoghazError::configuration(
                "alpha mask length does not match width*height",
            ));
        }

        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        for y in 0..height {
            for x in 0..width {
                if alpha[(y * width + x) as usize] != 0 {
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }
        if min_x == u32::MAX {
            return Ok(Self::empty());
        }

        let w = max_x - min_x + 1;
        let h = max_y - min_y + 1;
        let mut coverage = Vec::with_capacity(w as usize * h as usize);
        for y in min_y..=max_y {
            let row = (y * width) as usize;
            for x in min_x..=max_x {
                coverage.push(f32::from(alpha[row + x as usize]) / 255.0);
            }
        }
        Self::new(w, h, coverage)
    }

    /// Width of the coverage grid in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the coverage grid in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Natural (unscaled) bounding box.
    pub fn bounds(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// `true` when either side of the bounds is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at an integer sample; out-of-range samples read as zero.
    pub fn coverage_at(&self, x: i64, y: i64) -> f32 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return 0.0;
        }
        self.coverage[(y as usize) * self.width as usize + x as usize]
    }

    /// Bilinear coverage at a continuous position in run space (pixel centers at `i + 0.5`).
    pub fn sample(&self, x: f64, y: f64) -> f32 {
        let fx = x - 0.5;
        let fy = y - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = (fx - x0) as f32;
        let ty = (fy - y0) as f32;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let c00 = self.coverage_at(x0, y0);
        let c10 = self.coverage_at(x0 + 1, y0);
        let c01 = self.coverage_at(x0, y0 + 1);
        let c11 = self.coverage_at(x0 + 1, y0 + 1);

        let top = c00 + (c10 - c00) * tx;
        let bottom = c01 + (c11 - c01) * tx;
        top + (bottom - top) * ty
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/run.rs"]
mod tests;
