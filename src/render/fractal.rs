//! Escape-time fractal layers used by the fractal backdrop.

use crate::foundation::error::{CoghazError, CoghazResult};

/// One control point of a Gaussian color gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    /// Position in `[0, 1]`.
    pub pos: f64,
    /// Linear RGB in `[0, 1]`.
    pub rgb: [f64; 3],
}

/// Gaussian gradient: every stop contributes a bell curve centered on its position.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    stops: Vec<ColorStop>,
}

impl Colormap {
    /// Build a colormap; at least two stops are required.
    pub fn new(stops: Vec<ColorStop>) -> CoghazResult<Self> {
        if stops.len() < 2 {
            return Err(CoghazError::configuration(
                "colormap needs at least two stops",
            ));
        }
        Ok(Self { stops })
    }

    /// Color at `x`, each channel clamped to at most 1.
    pub fn sample(&self, x: f64) -> [f64; 3] {
        let sigma = 1.0 / self.stops.len() as f64;
        let denom = 2.0 * sigma * sigma;
        let mut rgb = [0.0f64; 3];
        for stop in &self.stops {
            let w = (-(x - stop.pos).powi(2) / denom).exp();
            for (c, s) in rgb.iter_mut().zip(stop.rgb) {
                *c += s * w;
            }
        }
        rgb.map(|c| c.min(1.0))
    }
}

/// Which iteration is run per pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FractalKind {
    /// `z0 = p`, `z = z^2 + p`.
    Mandelbrot,
    /// `z0 = p`, `z = z^2 + c` for a fixed `c = (re, im)`.
    Julia {
        /// Real part of `c`.
        re: f64,
        /// Imaginary part of `c`.
        im: f64,
    },
}

/// A view onto an escape-time fractal.
#[derive(Clone, Debug, PartialEq)]
pub struct EscapeFractal {
    /// Iteration rule.
    pub kind: FractalKind,
    /// Real-axis range mapped onto columns, endpoints inclusive.
    pub real: (f64, f64),
    /// Imaginary-axis range mapped onto rows, endpoints inclusive.
    pub imag: (f64, f64),
    /// Escape radius.
    pub bailout: f64,
    /// Iteration limit.
    pub max_iter: u32,
    /// Maps `iterations / max_iter` to color.
    pub colormap: Colormap,
}

impl EscapeFractal {
    /// Iterations before escaping at complex point `(x, y)`.
    pub fn escape_count(&self, x: f64, y: f64) -> u32 {
        let (cr, ci) = match self.kind {
            FractalKind::Mandelbrot => (x, y),
            FractalKind::Julia { re, im } => (re, im),
        };
        let (mut zr, mut zi) = (x, y);
        let bailout_sq = self.bailout * self.bailout;
        let mut n = 0;
        while zr * zr + zi * zi < bailout_sq && n < self.max_iter {
            let next_r = zr * zr - zi * zi + cr;
            zi = 2.0 * zr * zi + ci;
            zr = next_r;
            n += 1;
        }
        n
    }

    /// Render to row-major RGB8.
    pub fn render_rgb8(&self, height: u32, width: u32) -> Vec<u8> {
        let mut out = Vec::with_capacity(width as usize * height as usize * 3);
        let limit = f64::from(self.max_iter.max(1));
        for row in 0..height {
            let y = linspace(self.imag, height, row);
            for col in 0..width {
                let x = linspace(self.real, width, col);
                let t = f64::from(self.escape_count(x, y)) / limit;
                for c in self.colormap.sample(t) {
                    out.push((255.0 * c) as u8);
                }
            }
        }
        out
    }
}

fn linspace((lo, hi): (f64, f64), n: u32, i: u32) -> f64 {
    if n <= 1 {
        return lo;
    }
    lo + (hi - lo) * f64::from(i) / f64::from(n - 1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fractal.rs"]
mod tests;
