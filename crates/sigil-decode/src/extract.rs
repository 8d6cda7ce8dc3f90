//! Per-rotation bit extraction with a contrast-adaptive threshold.

use log::trace;
use serde::{Deserialize, Serialize};

use sigil_core::{Rotation, RotationMaps, ANCHOR_CELLS, CELL_COUNT, SYNC_CELL};

use crate::code::bit;

/// Decoder thresholds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DecodeParams {
    /// Minimum light-minus-dark reference spread. Hypotheses below this
    /// noise floor are rejected early (poor lighting, motion blur,
    /// occlusion).
    pub min_contrast: f32,
    /// Averaging radius handed to the luminance sampler, in canonical
    /// pixels.
    pub sample_radius: f32,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            min_contrast: 20.0,
            sample_radius: 4.0,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeParamsError {
    #[error("min_contrast must be positive and finite")]
    InvalidContrastFloor,
    #[error("sample_radius must be non-negative and finite")]
    InvalidSampleRadius,
}

impl DecodeParams {
    pub fn validate(&self) -> Result<(), DecodeParamsError> {
        if !self.min_contrast.is_finite() || self.min_contrast <= 0.0 {
            return Err(DecodeParamsError::InvalidContrastFloor);
        }
        if !self.sample_radius.is_finite() || self.sample_radius < 0.0 {
            return Err(DecodeParamsError::InvalidSampleRadius);
        }
        Ok(())
    }
}

/// One rotation hypothesis that survived the structural checks.
#[derive(Clone, Copy, Debug)]
pub struct RotationCandidate {
    /// Canonical-frame bits, dark = 1.
    pub code: u16,
    pub rotation: Rotation,
    /// Light minus dark reference luminance.
    pub contrast: f32,
    pub dark_ref: f32,
    pub light_ref: f32,
}

/// Evaluate all three rotation hypotheses against one sample vector.
///
/// Each hypothesis remaps the samples into its candidate canonical frame,
/// checks the anchor/sync luminance ordering, derives a midpoint threshold
/// from the anchor and sync references, binarizes, and re-verifies the
/// structural bits after quantization. Zero or more hypotheses survive.
pub fn extract_candidates(
    samples: &[u8; CELL_COUNT],
    maps: &RotationMaps,
    params: &DecodeParams,
) -> Vec<RotationCandidate> {
    let mut out = Vec::with_capacity(3);

    for rotation in Rotation::ALL {
        let map = maps.map(rotation);
        let canon: [u8; CELL_COUNT] = std::array::from_fn(|i| samples[map[i]]);

        let a0 = f32::from(canon[ANCHOR_CELLS[0]]);
        let a1 = f32::from(canon[ANCHOR_CELLS[1]]);
        let sync = f32::from(canon[SYNC_CELL]);
        if a0 >= sync || a1 >= sync {
            trace!("{rotation:?}: anchors not darker than sync");
            continue;
        }

        let dark_ref = 0.5 * (a0 + a1);
        let light_ref = sync;
        let contrast = light_ref - dark_ref;
        if contrast < params.min_contrast {
            trace!("{rotation:?}: contrast {contrast:.1} below floor");
            continue;
        }

        // midpoint threshold, calibrated per frame
        let threshold = dark_ref + 0.5 * contrast;
        let mut code = 0u16;
        for (i, &v) in canon.iter().enumerate() {
            if f32::from(v) < threshold {
                code |= 1 << i;
            }
        }

        // the luminance ordering check is necessary but not sufficient once
        // quantized: an anchor far above dark_ref can land past the midpoint
        if bit(code, ANCHOR_CELLS[0]) != 1
            || bit(code, ANCHOR_CELLS[1]) != 1
            || bit(code, SYNC_CELL) != 0
        {
            trace!("{rotation:?}: structural bits wrong after binarization");
            continue;
        }

        out.push(RotationCandidate {
            code,
            rotation,
            contrast,
            dark_ref,
            light_ref,
        });
    }

    out
}
