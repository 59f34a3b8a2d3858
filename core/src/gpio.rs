//! Mapping of packed data words onto a 32-bit GPIO output register.
//!
//! The driver writes a whole row through the set/clear registers of GPIO
//! bank 0, so the colour and address lines have to sit at fixed offsets
//! from each other:
//! * every pin is in `0..32`
//! * A, B, C, D are contiguous
//! * R1, G1, B1 are n, n+2, n+3
//! * R2, G2, B2 are n, n+1, n+3

use crate::{
    error::{Error, Result},
    panel::{BOTTOM, R1, TOP},
};

/// GPIO numbers of every panel line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAssignment {
    pub r1: u8,
    pub g1: u8,
    pub b1: u8,
    pub r2: u8,
    pub g2: u8,
    pub b2: u8,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub clk: u8,
    pub lat: u8,
    pub oe: u8,
}

impl PinAssignment {
    pub const REFERENCE: Self = Self {
        r1: 2,
        g1: 4,
        b1: 5,
        r2: 18,
        g2: 19,
        b2: 21,
        a: 12,
        b: 13,
        c: 14,
        d: 15,
        clk: 22,
        lat: 25,
        oe: 26,
    };

    fn all(&self) -> [u8; 13] {
        [
            self.r1, self.g1, self.b1, self.r2, self.g2, self.b2, self.a, self.b, self.c,
            self.d, self.clk, self.lat, self.oe,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinLayout {
    pins: PinAssignment,
    rgb_mask: u32,
    addr_mask: u32,
}

impl PinLayout {
    pub fn new(pins: PinAssignment) -> Result<Self> {
        let all = pins.all();
        if all.iter().any(|&p| p >= 32) {
            return Err(Error::PinLayout("pins must be in 0..32"));
        }
        let mut seen = 0u32;
        for &p in &all {
            if seen & (1 << p) != 0 {
                return Err(Error::PinLayout("pin assigned twice"));
            }
            seen |= 1 << p;
        }
        if pins.b != pins.a + 1 || pins.c != pins.b + 1 || pins.d != pins.c + 1 {
            return Err(Error::PinLayout("A, B, C, D must be contiguous"));
        }
        if pins.g1 != pins.r1 + 2 || pins.b1 != pins.g1 + 1 {
            return Err(Error::PinLayout("R1, G1, B1 must be n, n+2, n+3"));
        }
        if pins.g2 != pins.r2 + 1 || pins.b2 != pins.g2 + 2 {
            return Err(Error::PinLayout("R2, G2, B2 must be n, n+1, n+3"));
        }

        let bits = |ps: &[u8]| ps.iter().fold(0u32, |acc, &p| acc | (1 << p));
        Ok(Self {
            pins,
            rgb_mask: bits(&all[..6]),
            addr_mask: bits(&all[6..10]),
        })
    }

    pub fn pins(&self) -> &PinAssignment {
        &self.pins
    }

    pub fn rgb_mask(&self) -> u32 {
        self.rgb_mask
    }

    pub fn addr_mask(&self) -> u32 {
        self.addr_mask
    }

    /// Lines to set for a data word.
    pub fn rgb_word(&self, word: u8) -> u32 {
        // R1 is bit 4 of the word
        let top = (word & TOP) as u32;
        let offset = self.pins.r1 as i32 - R1.trailing_zeros() as i32;
        let top = if offset >= 0 {
            top << offset
        } else {
            top >> -offset
        };
        let bottom = ((word & BOTTOM) as u32) << self.pins.r2;
        top | bottom
    }

    /// Lines to clear for a data word.
    pub fn clear_word(&self, word: u8) -> u32 {
        !self.rgb_word(word) & self.rgb_mask
    }

    /// Address lines selecting scan row `row`.
    pub fn addr_word(&self, row: usize) -> u32 {
        ((row as u32) << self.pins.a) & self.addr_mask
    }
}
