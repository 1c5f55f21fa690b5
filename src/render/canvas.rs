use crate::foundation::core::{Rgba8, validate_dimensions};
use crate::foundation::error::{CoghazError, CoghazResult};
use crate::foundation::math::Fnv1a64;

/// Row-major straight RGBA8 pixel buffer with fixed dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a `height` x `width` canvas filled with `background`.
    pub fn new(height: u32, width: u32, background: Rgba8) -> CoghazResult<Self> {
        validate_dimensions(height, width)?;
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CoghazError::invalid_dimension("canvas buffer size overflow"))?;
        let mut data = vec![0u8; len];
        let px = background.to_array();
        for chunk in data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing RGBA8 buffer.
    pub fn from_raw(height: u32, width: u32, data: Vec<u8>) -> CoghazResult<Self> {
        validate_dimensions(height, width)?;
        if data.len() != width as usize * height as usize * 4 {
            return Err(CoghazError::invalid_dimension(
                "canvas data must be width*height*4 bytes",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some(Rgba8 {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        })
    }

    /// Mutable view of the 4 bytes at `(x, y)`. Callers clip before asking.
    pub(crate) fn pixel_bytes_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let i = self.index(x, y);
        &mut self.data[i..i + 4]
    }

    /// Raw RGBA8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Stable 64-bit digest of dimensions and pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
