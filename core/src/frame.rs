use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;

use crate::error::{Error, Result};

/// A decoded RGB image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Rgb888>,
}

impl Frame {
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb888>) -> Result<Self> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(Error::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: usize, height: usize, color: Rgb888) -> Self {
        Self {
            width,
            height,
            pixels: alloc::vec![color; width * height],
        }
    }

    /// Builds a frame from packed `r, g, b` triplets.
    pub fn from_rgb8(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        let expected = width * height;
        if data.len() != expected * 3 {
            return Err(Error::PixelCount {
                expected,
                actual: data.len() / 3,
            });
        }
        let pixels = data
            .chunks_exact(3)
            .map(|p| Rgb888::new(p[0], p[1], p[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Panics if `(x, y)` is outside the frame.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb888 {
        self.pixels[y * self.width + x]
    }

    /// One row of pixels, left to right.
    pub fn row(&self, y: usize) -> &[Rgb888] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb888) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn pixels(&self) -> &[Rgb888] {
        &self.pixels
    }
}
