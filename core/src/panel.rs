//! Dual-scan panel geometry and the packed data word.
//!
//! A HUB75 style panel clocks two rows at once: row `y` of the top half and
//! row `y + SCAN_ROWS` of the bottom half share one data word. Each word
//! carries a single bit-plane for the six colour lines:
//!
//! ```text
//! bit   7    6    5    4    3    2    1    0
//!       B1   G1   -    R1   B2   -    G2   R2
//! ```
//!
//! The layout follows the GPIO wiring of the driver board and is not a
//! regular RGB packing.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::gamma::correct;

pub const PANEL_HEIGHT: usize = 32;
/// Rows driven per plane; each covers a top and a bottom row.
pub const SCAN_ROWS: usize = PANEL_HEIGHT / 2;

pub const R1: u8 = 0x10;
pub const G1: u8 = 0x40;
pub const B1: u8 = 0x80;
pub const R2: u8 = 0x01;
pub const G2: u8 = 0x02;
pub const B2: u8 = 0x08;

pub const TOP: u8 = R1 | G1 | B1;
pub const BOTTOM: u8 = R2 | G2 | B2;
pub const ALL: u8 = TOP | BOTTOM;

#[inline]
fn bit(value: u8, mask: u8, line: u8) -> u8 {
    if correct(value) & mask != 0 { line } else { 0 }
}

/// Packs one plane of a top/bottom pixel pair into a data word.
pub fn pack_pixel(top: Rgb888, bottom: Rgb888, mask: u8) -> u8 {
    bit(top.r(), mask, R1)
        | bit(top.g(), mask, G1)
        | bit(top.b(), mask, B1)
        | bit(bottom.r(), mask, R2)
        | bit(bottom.g(), mask, G2)
        | bit(bottom.b(), mask, B2)
}

/// Colour lines lit for one pixel within one plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lines {
    pub r: bool,
    pub g: bool,
    pub b: bool,
}

impl Lines {
    /// Scales the lit lines by the plane weight.
    pub fn weighted(self, mask: u8) -> (u8, u8, u8) {
        let w = |on: bool| if on { mask } else { 0 };
        (w(self.r), w(self.g), w(self.b))
    }
}

/// Splits a data word back into the top and bottom pixel lines.
pub fn unpack_pixel(word: u8) -> (Lines, Lines) {
    let top = Lines {
        r: word & R1 != 0,
        g: word & G1 != 0,
        b: word & B1 != 0,
    };
    let bottom = Lines {
        r: word & R2 != 0,
        g: word & G2 != 0,
        b: word & B2 != 0,
    };
    (top, bottom)
}
