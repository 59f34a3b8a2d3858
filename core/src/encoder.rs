//! Frame to bit-plane stream encoding.
//!
//! Every frame is emitted plane by plane, most significant first. Each plane
//! holds `SCAN_ROWS` rows of `width` data words, so a frame occupies
//! `planes * SCAN_ROWS * width` bytes and frames follow each other without
//! any framing.

use alloc::vec::Vec;

use log::{debug, trace};

use crate::{
    error::{EncodeError, Error, Result},
    frame::Frame,
    panel::{PANEL_HEIGHT, SCAN_ROWS, pack_pixel},
    planes::{BIT_DEPTH, PlaneMasks, masks},
};

pub struct Encoder {
    masks: PlaneMasks,
    width: Option<usize>,
    frames: usize,
}

impl Encoder {
    pub fn new(bit_depth: u32) -> Result<Self> {
        Ok(Self {
            masks: masks(bit_depth)?,
            width: None,
            frames: 0,
        })
    }

    pub fn masks(&self) -> &[u8] {
        &self.masks
    }

    /// Width locked in by the first frame of the current run.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Frames accepted in the current run.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn frame_len(&self, width: usize) -> usize {
        self.masks.len() * SCAN_ROWS * width
    }

    pub fn reset(&mut self) {
        self.width = None;
        self.frames = 0;
    }

    /// Appends the planes of a single frame to `out`.
    ///
    /// Only the panel height is checked; `index` is reported on failure.
    /// Nothing is appended if the frame is rejected.
    pub fn pack_frame(&self, index: usize, frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
        if frame.height() != PANEL_HEIGHT {
            return Err(Error::FrameHeight {
                index,
                height: frame.height(),
            });
        }
        out.reserve(self.frame_len(frame.width()));
        for &mask in self.masks.iter() {
            trace!("frame {index}: plane {mask:#04x}");
            for y in 0..SCAN_ROWS {
                let top = frame.row(y);
                let bottom = frame.row(y + SCAN_ROWS);
                out.extend(
                    top.iter()
                        .zip(bottom)
                        .map(|(&top, &bottom)| pack_pixel(top, bottom, mask)),
                );
            }
        }
        Ok(())
    }

    /// Accepts a packed frame of `width` pixels into the current run.
    ///
    /// The first frame fixes the width of the run.
    pub fn record(&mut self, width: usize) -> Result<()> {
        let index = self.frames;
        match self.width {
            Some(expected) if expected != width => {
                return Err(Error::FrameWidth {
                    index,
                    width,
                    expected,
                });
            }
            Some(_) => {}
            None => self.width = Some(width),
        }
        self.frames += 1;
        Ok(())
    }

    /// Validates and packs the next frame of the current run.
    pub fn push(&mut self, frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
        let index = self.frames;
        let start = out.len();
        self.pack_frame(index, frame, out)?;
        if let Err(err) = self.record(frame.width()) {
            out.truncate(start);
            return Err(err);
        }
        debug!("packed frame {index} ({}x{})", frame.width(), frame.height());
        Ok(())
    }

    /// Packs at most `cap` frames from `frames` into one buffer.
    ///
    /// Frames past the cap are never pulled from the iterator. The first
    /// failing frame aborts the run and the partial buffer is dropped.
    pub fn encode<I, E>(
        &mut self,
        frames: I,
        cap: usize,
    ) -> core::result::Result<Vec<u8>, EncodeError<E>>
    where
        I: IntoIterator<Item = core::result::Result<Frame, E>>,
    {
        self.reset();
        frames
            .into_iter()
            .take(cap)
            .enumerate()
            .try_fold(Vec::new(), |mut out, (index, frame)| {
                let frame = frame.map_err(|error| EncodeError::Source { index, error })?;
                self.push(&frame, &mut out)?;
                Ok(out)
            })
    }
}

/// Packs at most `cap` frames at the panel's bit depth.
pub fn encode<I, E>(frames: I, cap: usize) -> core::result::Result<Vec<u8>, EncodeError<E>>
where
    I: IntoIterator<Item = core::result::Result<Frame, E>>,
{
    Encoder::new(BIT_DEPTH)?.encode(frames, cap)
}
