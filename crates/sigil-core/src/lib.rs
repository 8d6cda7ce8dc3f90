//! Core geometry and format constants for sigil marker decoding.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! binarize samples or track detections; it defines the canonical 16-cell
//! layout, the three rotation permutations of an equilateral marker, and
//! the luminance sampling seam the decoder reads through.

mod cells;
mod layout;
mod logger;
mod rotation;
mod sample;

pub use cells::{
    role_of, CellRole, ANCHOR_CELLS, CELL_COUNT, DATA_CELLS, PARITY_CELLS, SYNC_CELL,
};
pub use layout::{canon_height, order_vertices, CanonicalLayout, Cell, CANON_WIDTH};
pub use rotation::{Rotation, RotationMaps};
pub use sample::{GrayPatch, GrayPatchView, LuminanceSampler, PatchSampler, PatchSamplerError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{advance_frame, current_frame, init_with_level};
