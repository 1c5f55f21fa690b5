use crate::foundation::core::Rgba8;
use crate::foundation::error::CoghazResult;
use crate::foundation::math::SplitMix64;
use crate::render::canvas::Canvas;
use crate::render::fractal::{ColorStop, Colormap, EscapeFractal, FractalKind};

/// Julia constant for the third fractal layer.
const JULIA_C: (f64, f64) = (-0.8, 0.156);

/// What the canvas holds before any glyph is stamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backdrop {
    /// A single flat color.
    Solid {
        /// Fill color.
        color: Rgba8,
    },
    /// Three glitched escape-time layers summed and inverted; fully determined by `seed`.
    Fractal {
        /// Seed for every parameter choice.
        seed: u64,
    },
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::Solid {
            color: Rgba8::WHITE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

impl Backdrop {
    /// Allocate a canvas of the requested size holding this backdrop.
    pub fn paint(&self, height: u32, width: u32) -> CoghazResult<Canvas> {
        match *self {
            Self::Solid { color } => Canvas::new(height, width, color),
            Self::Fractal { seed } => {
                let rgb = fractal_rgb8(seed, height, width)?;
                let mut data = Vec::with_capacity(rgb.len() / 3 * 4);
                for px in rgb.chunks_exact(3) {
                    data.extend_from_slice(&[255 - px[0], 255 - px[1], 255 - px[2], 255]);
                }
                Canvas::from_raw(height, width, data)
            }
        }
    }
}

fn fractal_rgb8(seed: u64, height: u32, width: u32) -> CoghazResult<Vec<u8>> {
    let mut rng = SplitMix64::new(seed);

    let layers = [
        (FractalKind::Mandelbrot, Axis::Vertical, (40, 70)),
        (FractalKind::Mandelbrot, Axis::Horizontal, (50, 100)),
        (
            FractalKind::Julia {
                re: JULIA_C.0,
                im: JULIA_C.1,
            },
            Axis::Horizontal,
            (50, 100),
        ),
    ];

    let mut sum = vec![0u8; width as usize * height as usize * 3];
    for (kind, axis, (lo, hi)) in layers {
        let fractal = random_layer(&mut rng, kind)?;
        let offset = rng.range_u32(lo, hi);
        let layer = fractal.render_rgb8(height, width);
        let layer = smear(&layer, height, width, offset, axis);
        for (s, l) in sum.iter_mut().zip(layer) {
            *s = s.wrapping_add(l);
        }
        tracing::debug!(?kind, ?axis, offset, "painted fractal layer");
    }
    Ok(sum)
}

fn random_layer(rng: &mut SplitMix64, kind: FractalKind) -> CoghazResult<EscapeFractal> {
    let angle = rng.range_f64(0.0, 6.28);
    let real_lo = angle.cos() * 0.5 - 0.5;
    let real_span = rng.range_f64(0.75, 1.5);
    let imag_lo = angle.sin() * 0.5 - 0.5;
    let imag_span = rng.range_f64(0.75, 1.5);
    let bailout = f64::from(rng.range_u32(500, 1000));
    let max_iter = rng.range_u32(50, 100);

    let mut random_stop = |lo: f64, hi: f64| ColorStop {
        pos: rng.range_f64(lo, hi),
        rgb: [
            rng.next_f64() / 2.0,
            rng.next_f64() / 2.0,
            rng.next_f64() / 2.0,
        ],
    };
    let low = random_stop(0.1, 0.5);
    let high = random_stop(0.6, 0.9);
    let colormap = Colormap::new(vec![
        ColorStop {
            pos: 0.0,
            rgb: [0.0; 3],
        },
        low,
        high,
        ColorStop {
            pos: 1.0,
            rgb: [0.0; 3],
        },
    ])?;

    Ok(EscapeFractal {
        kind,
        real: (real_lo, real_lo + real_span),
        imag: (imag_lo, imag_lo + imag_span),
        bailout,
        max_iter,
        colormap,
    })
}

/// Add each pixel to the one `offset` pixels further along `axis`, wrapping per channel.
fn smear(src: &[u8], height: u32, width: u32, offset: u32, axis: Axis) -> Vec<u8> {
    let (w, h, off) = (width as usize, height as usize, offset as usize);
    let mut out = src.to_vec();
    for y in 0..h {
        for x in 0..w {
            let (sx, sy) = match axis {
                Axis::Vertical => (x, y + off),
                Axis::Horizontal => (x + off, y),
            };
            if sx >= w || sy >= h {
                continue;
            }
            let dst = (y * w + x) * 3;
            let from = (sy * w + sx) * 3;
            for c in 0..3 {
                out[dst + c] = src[dst + c].wrapping_add(src[from + c]);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/backdrop.rs"]
mod tests;
