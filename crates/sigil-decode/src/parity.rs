//! Parity equations and the id codec.
//!
//! The four parity sets are the coverage sets of a shortened Hamming(13,9)
//! code over the nine data bits: every data bit is covered by at least two
//! equations, so any single-bit flip breaks parity.

use sigil_core::{ANCHOR_CELLS, DATA_CELLS, PARITY_CELLS};

use crate::code::bit;

/// Data-bit positions (indices into the 9-bit data vector, MSB first)
/// feeding each parity equation.
pub const PARITY_SOURCES: [&[usize]; 4] = [
    &[0, 1, 3, 4, 6, 8],
    &[0, 2, 3, 5, 6],
    &[1, 2, 3, 7, 8],
    &[4, 5, 6, 7, 8],
];

/// Highest encodable identifier.
pub const MAX_ID: u16 = 511;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EncodeError {
    #[error("id {0} out of range 0..={MAX_ID}")]
    IdOutOfRange(u16),
}

/// The nine data bits of `id`, most-significant first.
pub fn data_bits_of_id(id: u16) -> [u8; 9] {
    std::array::from_fn(|k| ((id >> (8 - k)) & 1) as u8)
}

/// Reassemble an id from data bits, most-significant first.
pub fn id_of_data_bits(data: &[u8; 9]) -> u16 {
    data.iter().fold(0u16, |acc, &b| (acc << 1) | u16::from(b))
}

/// The four parity bits for a data vector.
pub fn parity_bits(data: &[u8; 9]) -> [u8; 4] {
    std::array::from_fn(|j| {
        PARITY_SOURCES[j]
            .iter()
            .fold(0u8, |acc, &k| acc ^ (data[k] & 1))
    })
}

/// Encode `id` as the canonical 16-bit cell pattern: anchors dark, sync
/// light, data and parity filled per the fixed tables.
pub fn encode_id(id: u16) -> Result<u16, EncodeError> {
    if id > MAX_ID {
        return Err(EncodeError::IdOutOfRange(id));
    }
    let data = data_bits_of_id(id);
    let parity = parity_bits(&data);

    let mut code = 0u16;
    for cell in ANCHOR_CELLS {
        code |= 1 << cell;
    }
    for (k, &cell) in DATA_CELLS.iter().enumerate() {
        code |= u16::from(data[k]) << cell;
    }
    for (j, &cell) in PARITY_CELLS.iter().enumerate() {
        code |= u16::from(parity[j]) << cell;
    }
    Ok(code)
}

/// Data bits stored in a canonical code, in table order.
pub(crate) fn data_bits_of_code(code: u16) -> [u8; 9] {
    std::array::from_fn(|k| bit(code, DATA_CELLS[k]))
}

/// Parity bits stored in a canonical code, in table order.
pub(crate) fn parity_bits_of_code(code: u16) -> [u8; 4] {
    std::array::from_fn(|j| bit(code, PARITY_CELLS[j]))
}
