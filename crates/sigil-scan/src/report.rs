//! Role-tagged bit readout for rendering hosts.

use serde::Serialize;

use sigil_core::{role_of, CellRole, CELL_COUNT};
use sigil_decode::bit;

/// One cell of a decoded pattern, tagged with its format role.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CellBit {
    pub index: usize,
    pub role: CellRole,
    pub bit: u8,
}

/// Expand a packed canonical code into per-cell readings, for display
/// overlays and debug panels.
pub fn cell_readout(code: u16) -> [CellBit; CELL_COUNT] {
    std::array::from_fn(|i| CellBit {
        index: i,
        role: role_of(i),
        bit: bit(code, i),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_core::{ANCHOR_CELLS, SYNC_CELL};
    use sigil_decode::encode_id;

    #[test]
    fn readout_tags_structural_cells() {
        let code = encode_id(123).expect("encode");
        let cells = cell_readout(code);
        for i in ANCHOR_CELLS {
            assert_eq!(cells[i].role, CellRole::Anchor);
            assert_eq!(cells[i].bit, 1);
        }
        assert_eq!(cells[SYNC_CELL].role, CellRole::Sync);
        assert_eq!(cells[SYNC_CELL].bit, 0);
    }
}
