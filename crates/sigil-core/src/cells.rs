//! Fixed cell roles of the 16-cell sigil format.
//!
//! The role tables are format constants, not configuration. Together they
//! partition the indices `0..16` into 2 anchors, 1 sync, 9 data and 4
//! parity cells.

use serde::{Deserialize, Serialize};

/// Number of triangular cells in a sigil.
pub const CELL_COUNT: usize = 16;

/// Cells that must always read dark (bit 1) in the canonical orientation.
pub const ANCHOR_CELLS: [usize; 2] = [0, 9];

/// Cell that must always read light (bit 0) in the canonical orientation.
pub const SYNC_CELL: usize = 15;

/// Payload cells, most-significant bit first.
pub const DATA_CELLS: [usize; 9] = [1, 3, 4, 5, 7, 8, 11, 12, 13];

/// Parity cells, in parity-equation order.
pub const PARITY_CELLS: [usize; 4] = [2, 6, 10, 14];

/// Role of one cell in the format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRole {
    Anchor,
    Sync,
    Data,
    Parity,
}

/// Role of the cell at `index` (must be `< CELL_COUNT`).
pub fn role_of(index: usize) -> CellRole {
    debug_assert!(index < CELL_COUNT);
    match index {
        0 | 9 => CellRole::Anchor,
        15 => CellRole::Sync,
        2 | 6 | 10 | 14 => CellRole::Parity,
        _ => CellRole::Data,
    }
}
