//! Bit-plane selection masks.

use crate::error::{Error, Result};

/// Bit depth the panel firmware is built for.
pub const BIT_DEPTH: u32 = 6;
/// A channel is eight bits, the lowest plane always stays below the top bit.
pub const MAX_BIT_DEPTH: u32 = 7;

/// Masks ordered from the most significant plane down.
pub type PlaneMasks = heapless::Vec<u8, { MAX_BIT_DEPTH as usize }>;

/// Builds the ordered list of plane masks for `bit_depth` planes.
///
/// Planes are taken from the top of the channel, so a depth of 6 drops the
/// two least significant bits: `[128, 64, 32, 16, 8, 4]`.
pub fn masks(bit_depth: u32) -> Result<PlaneMasks> {
    if bit_depth == 0 || bit_depth > MAX_BIT_DEPTH {
        return Err(Error::InvalidBitDepth(bit_depth));
    }
    let mut masks = PlaneMasks::new();
    for plane in (1..=bit_depth).rev() {
        let mask = 1u8 << (plane + (7 - bit_depth));
        masks
            .push(mask)
            .map_err(|_| Error::InvalidBitDepth(bit_depth))?;
    }
    Ok(masks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth() {
        let masks = masks(BIT_DEPTH).unwrap();
        assert_eq!(masks.as_slice(), &[128, 64, 32, 16, 8, 4]);
    }

    #[test]
    fn depth_bounds() {
        assert_eq!(masks(1).unwrap().as_slice(), &[128]);
        assert_eq!(
            masks(7).unwrap().as_slice(),
            &[128, 64, 32, 16, 8, 4, 2]
        );
        assert_eq!(masks(0), Err(Error::InvalidBitDepth(0)));
        assert_eq!(masks(8), Err(Error::InvalidBitDepth(8)));
    }

    #[test]
    fn single_bit_descending() {
        for depth in 1..=MAX_BIT_DEPTH {
            let masks = masks(depth).unwrap();
            assert_eq!(masks.len(), depth as usize);
            assert!(masks.iter().all(|m| m.count_ones() == 1));
            assert!(masks.windows(2).all(|w| w[0] == w[1] << 1));
        }
    }
}
