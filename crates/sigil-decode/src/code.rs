//! Packed 16-bit sigil codes.
//!
//! Bit `i` of a code is cell `i` of the canonical layout, with **dark = 1**.

use sigil_core::CELL_COUNT;

/// Bit at cell `index`.
#[inline]
pub fn bit(code: u16, index: usize) -> u8 {
    ((code >> index) & 1) as u8
}

/// Rewrite a canonical code as it would be captured under the rotation
/// described by `map` (`map[canonical] = sampled`).
pub fn rotate_code(canonical: u16, map: &[usize; CELL_COUNT]) -> u16 {
    let mut out = 0u16;
    for (i, &j) in map.iter().enumerate() {
        out |= u16::from(bit(canonical, i)) << j;
    }
    out
}

/// Inverse of [`rotate_code`]: recover the canonical code from a captured
/// one.
pub fn canonicalize_code(captured: u16, map: &[usize; CELL_COUNT]) -> u16 {
    let mut out = 0u16;
    for (i, &j) in map.iter().enumerate() {
        out |= u16::from(bit(captured, j)) << i;
    }
    out
}
