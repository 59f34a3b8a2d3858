//! Read access to a packed bit-plane stream.
//!
//! The stream has no header; the reader has to be told the panel width and
//! plane count the stream was packed with.

use embedded_graphics::pixelcolor::Rgb888;

use crate::{
    error::{Error, Result},
    frame::Frame,
    panel::{PANEL_HEIGHT, SCAN_ROWS, unpack_pixel},
};

/// The `index`th run of `len` bytes, or `None` if it lies past the end.
fn nth_chunk(data: &[u8], index: usize, len: usize) -> Option<&[u8]> {
    let start = index.checked_mul(len)?;
    data.get(start..start.checked_add(len)?)
}

#[derive(Clone, Copy)]
pub struct PackedStream<'a> {
    data: &'a [u8],
    width: usize,
    planes: usize,
    frame_len: usize,
}

impl<'a> PackedStream<'a> {
    /// Fails with `Truncated` unless `data` holds a whole number of frames.
    /// A geometry whose frame length overflows reports `frame_len: usize::MAX`.
    pub fn new(data: &'a [u8], width: usize, planes: usize) -> Result<Self> {
        let frame_len = planes
            .checked_mul(SCAN_ROWS)
            .and_then(|n| n.checked_mul(width))
            .unwrap_or(usize::MAX);
        if frame_len == 0 || frame_len == usize::MAX || data.len() % frame_len != 0 {
            return Err(Error::Truncated {
                len: data.len(),
                frame_len,
            });
        }
        Ok(Self {
            data,
            width,
            planes,
            frame_len,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn planes(&self) -> usize {
        self.planes
    }

    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    pub fn frame_count(&self) -> usize {
        self.data.len() / self.frame_len()
    }

    pub fn frame(&self, index: usize) -> Option<PackedFrame<'a>> {
        let data = nth_chunk(self.data, index, self.frame_len)?;
        Some(PackedFrame {
            data,
            width: self.width,
        })
    }

    pub fn frames(self) -> impl Iterator<Item = PackedFrame<'a>> {
        let width = self.width;
        self.data
            .chunks_exact(self.frame_len())
            .map(move |data| PackedFrame { data, width })
    }
}

/// The planes of one frame, most significant first.
#[derive(Clone, Copy)]
pub struct PackedFrame<'a> {
    data: &'a [u8],
    width: usize,
}

impl<'a> PackedFrame<'a> {
    fn plane_len(&self) -> usize {
        SCAN_ROWS * self.width
    }

    pub fn plane_count(&self) -> usize {
        self.data.len() / self.plane_len()
    }

    pub fn plane(&self, plane: usize) -> Option<&'a [u8]> {
        nth_chunk(self.data, plane, self.plane_len())
    }

    pub fn planes(self) -> impl Iterator<Item = &'a [u8]> {
        self.data.chunks_exact(self.plane_len())
    }

    /// Data words for scan row `y` of one plane.
    pub fn row(&self, plane: usize, y: usize) -> Option<&'a [u8]> {
        if y >= SCAN_ROWS {
            return None;
        }
        nth_chunk(self.plane(plane)?, y, self.width)
    }

    /// Rebuilds the image the panel shows for this frame.
    ///
    /// Each lit line contributes its plane weight, which yields the gamma
    /// corrected value truncated to the packed bit depth. `masks` must be the
    /// masks the stream was packed with.
    pub fn reconstruct(&self, masks: &[u8]) -> Frame {
        let mut frame = Frame::filled(self.width, PANEL_HEIGHT, Rgb888::new(0, 0, 0));
        let mut acc = alloc::vec![(0u8, 0u8, 0u8); self.width * PANEL_HEIGHT];
        for (plane, &mask) in self.planes().zip(masks) {
            for (i, &word) in plane.iter().enumerate() {
                let (y, x) = (i / self.width, i % self.width);
                let (top, bottom) = unpack_pixel(word);
                for (row, lines) in [(y, top), (y + SCAN_ROWS, bottom)] {
                    let (r, g, b) = lines.weighted(mask);
                    let px = &mut acc[row * self.width + x];
                    *px = (px.0 | r, px.1 | g, px.2 | b);
                }
            }
        }
        for (i, (r, g, b)) in acc.into_iter().enumerate() {
            frame.set_pixel(i % self.width, i / self.width, Rgb888::new(r, g, b));
        }
        frame
    }
}
