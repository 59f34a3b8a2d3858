//! Binary-coded modulation timing.
//!
//! The panel shows plane `k` (0 being the most significant) of a `depth`-bit
//! frame for `2^(depth - 1 - k)` ticks, so the planes of one frame take
//! `2^depth - 1` ticks in total.
//!
//! ```text
//! depth 6, 120us tick
//! plane 0: 3840us
//! plane 1: 1920us
//! plane 2:  960us
//! plane 3:  480us
//! plane 4:  240us
//! plane 5:  120us
//!          ------
//!          7560us
//! ```

/// Reference time a single plane takes to shift out and latch.
pub const TICK_US: u32 = 120;

/// Ticks plane `plane` is shown for. Planes outside the frame, and planes
/// whose weight does not fit a `u32`, get 0.
pub const fn plane_ticks(plane: u32, depth: u32) -> u32 {
    if plane >= depth {
        return 0;
    }
    match 1u32.checked_shl(depth - 1 - plane) {
        Some(ticks) => ticks,
        None => 0,
    }
}

/// Saturates at `u32::MAX` from depth 32 on.
pub const fn frame_ticks(depth: u32) -> u32 {
    match 1u32.checked_shl(depth) {
        Some(ticks) => ticks - 1,
        None => u32::MAX,
    }
}

pub const fn frame_time_us(depth: u32, tick_us: u32) -> u32 {
    frame_ticks(depth).saturating_mul(tick_us)
}

/// Display schedule of one frame: `(plane, ticks)`, most significant first.
pub struct Schedule {
    depth: u32,
    plane: u32,
}

impl Schedule {
    pub fn new(depth: u32) -> Self {
        Self { depth, plane: 0 }
    }
}

impl Iterator for Schedule {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.plane >= self.depth {
            return None;
        }
        let plane = self.plane;
        self.plane += 1;
        Some((plane, plane_ticks(plane, self.depth)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.depth.saturating_sub(self.plane) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Schedule {}
