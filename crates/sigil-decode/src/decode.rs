//! Candidate validation and best-candidate selection.

use log::debug;
use serde::{Deserialize, Serialize};

use sigil_core::{Rotation, RotationMaps, CELL_COUNT};

use crate::extract::{extract_candidates, DecodeParams, RotationCandidate};
use crate::parity::{data_bits_of_code, id_of_data_bits, parity_bits, parity_bits_of_code};

/// One fully validated frame decode.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DecodeResult {
    /// Identifier in `0..=511`.
    pub id: u16,
    /// Canonical 16-bit cell pattern, dark = 1.
    pub code: u16,
    /// Data bits, most-significant first.
    pub data_bits: [u8; 9],
    /// Parity bits, in equation order.
    pub parity_bits: [u8; 4],
    /// Physical rotation the marker was captured in.
    pub rotation: Rotation,
    /// Light minus dark reference luminance; the frame's quality score.
    pub contrast: f32,
    pub dark_ref: f32,
    pub light_ref: f32,
}

/// Validate parity for one surviving candidate.
fn validate_candidate(c: &RotationCandidate) -> Option<DecodeResult> {
    let data_bits = data_bits_of_code(c.code);
    let stored = parity_bits_of_code(c.code);
    let expected = parity_bits(&data_bits);
    if stored != expected {
        debug!(
            "{:?}: parity mismatch (stored {:?}, expected {:?})",
            c.rotation, stored, expected
        );
        return None;
    }
    Some(DecodeResult {
        id: id_of_data_bits(&data_bits),
        code: c.code,
        data_bits,
        parity_bits: stored,
        rotation: c.rotation,
        contrast: c.contrast,
        dark_ref: c.dark_ref,
        light_ref: c.light_ref,
    })
}

/// Pick the highest-contrast parity-valid candidate.
///
/// More than one rotation can coincidentally pass the structural checks on
/// noisy data; parity agreement plus the contrast score decide.
pub fn select_best(candidates: &[RotationCandidate]) -> Option<DecodeResult> {
    let mut best: Option<DecodeResult> = None;
    for c in candidates {
        let Some(r) = validate_candidate(c) else {
            continue;
        };
        let replace = match &best {
            None => true,
            Some(b) => r.contrast > b.contrast,
        };
        if replace {
            best = Some(r);
        }
    }
    best
}

/// Decode one frame's sample vector: evaluate all rotation hypotheses,
/// validate parity, and keep the best candidate. `None` means no detection
/// this frame, which is not an error.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "trace", skip(samples, maps, params))
)]
pub fn decode_samples(
    samples: &[u8; CELL_COUNT],
    maps: &RotationMaps,
    params: &DecodeParams,
) -> Option<DecodeResult> {
    let candidates = extract_candidates(samples, maps, params);
    let result = select_best(&candidates);
    if let Some(r) = &result {
        debug!(
            "decoded id {} at {}° (contrast {:.1})",
            r.id,
            r.rotation.degrees(),
            r.contrast
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{bit, rotate_code};
    use crate::parity::encode_id;
    use sigil_core::{CanonicalLayout, CellRole, PARITY_CELLS};

    const DARK: u8 = 40;
    const LIGHT: u8 = 220;

    fn maps() -> RotationMaps {
        RotationMaps::from_layout(&CanonicalLayout::new())
    }

    fn samples_from_code(code: u16) -> [u8; CELL_COUNT] {
        std::array::from_fn(|i| if bit(code, i) == 1 { DARK } else { LIGHT })
    }

    #[test]
    fn every_id_round_trips() {
        let maps = maps();
        let params = DecodeParams::default();
        for id in 0..=511u16 {
            let code = encode_id(id).expect("encode");
            let r = decode_samples(&samples_from_code(code), &maps, &params)
                .unwrap_or_else(|| panic!("id {id} must decode"));
            assert_eq!(r.id, id);
            assert_eq!(r.code, code);
            assert_eq!(r.rotation, Rotation::Deg0);
        }
    }

    #[test]
    fn rotation_invariance() {
        let maps = maps();
        let params = DecodeParams::default();
        for id in [0u16, 1, 73, 256, 511] {
            let code = encode_id(id).expect("encode");
            for rotation in Rotation::ALL {
                let captured = rotate_code(code, maps.map(rotation));
                let r = decode_samples(&samples_from_code(captured), &maps, &params)
                    .unwrap_or_else(|| panic!("id {id} under {rotation:?} must decode"));
                assert_eq!(r.id, id, "{rotation:?}");
                assert_eq!(r.rotation, rotation);
            }
        }
    }

    #[test]
    fn flipping_any_parity_bit_rejects_the_frame() {
        let maps = maps();
        let params = DecodeParams::default();
        for id in [0u16, 42, 511] {
            let code = encode_id(id).expect("encode");
            for cell in PARITY_CELLS {
                let corrupted = code ^ (1 << cell);
                assert!(
                    decode_samples(&samples_from_code(corrupted), &maps, &params).is_none(),
                    "id {id}, parity cell {cell}"
                );
            }
        }
    }

    #[test]
    fn flipping_any_data_bit_rejects_the_frame() {
        let maps = maps();
        let params = DecodeParams::default();
        let code = encode_id(345).expect("encode");
        for cell in 0..CELL_COUNT {
            if sigil_core::role_of(cell) != CellRole::Data {
                continue;
            }
            let corrupted = code ^ (1 << cell);
            assert!(
                decode_samples(&samples_from_code(corrupted), &maps, &params).is_none(),
                "data cell {cell}"
            );
        }
    }

    #[test]
    fn contrast_below_floor_never_decodes() {
        let maps = maps();
        let params = DecodeParams::default();
        let code = encode_id(511).expect("encode");
        let samples: [u8; CELL_COUNT] =
            std::array::from_fn(|i| if bit(code, i) == 1 { 100 } else { 110 });
        assert!(decode_samples(&samples, &maps, &params).is_none());
    }

    #[test]
    fn select_best_prefers_higher_contrast() {
        // two parity-valid candidates; selection is by contrast, not order
        let low = RotationCandidate {
            code: encode_id(7).expect("encode"),
            rotation: Rotation::Deg0,
            contrast: 50.0,
            dark_ref: 40.0,
            light_ref: 90.0,
        };
        let high = RotationCandidate {
            code: encode_id(8).expect("encode"),
            rotation: Rotation::Deg120,
            contrast: 120.0,
            dark_ref: 30.0,
            light_ref: 150.0,
        };
        let best = select_best(&[low, high]).expect("one valid candidate");
        assert_eq!(best.id, 8);
        let best = select_best(&[high, low]).expect("one valid candidate");
        assert_eq!(best.id, 8);
    }

    #[test]
    fn select_best_skips_parity_invalid_candidates() {
        let valid = RotationCandidate {
            code: encode_id(7).expect("encode"),
            rotation: Rotation::Deg0,
            contrast: 50.0,
            dark_ref: 40.0,
            light_ref: 90.0,
        };
        // corrupt one parity cell of an otherwise stronger candidate
        let invalid = RotationCandidate {
            code: encode_id(8).expect("encode") ^ (1 << PARITY_CELLS[0]),
            rotation: Rotation::Deg240,
            contrast: 200.0,
            dark_ref: 20.0,
            light_ref: 220.0,
        };
        let best = select_best(&[invalid, valid]).expect("valid candidate wins");
        assert_eq!(best.id, 7);
        assert!(select_best(&[invalid]).is_none());
    }
}
