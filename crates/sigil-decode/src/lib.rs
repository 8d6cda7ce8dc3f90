//! Sigil bit extraction and decoding.
//!
//! This crate turns one frame's 16 luminance samples into at most one
//! validated decode:
//! - evaluate all three rotation hypotheses with a per-frame adaptive
//!   threshold ([`extract_candidates`]),
//! - validate four parity equations per surviving candidate and keep the
//!   highest-contrast valid one ([`decode_samples`]).
//!
//! It does **not** detect triangles or sample images; it consumes a sample
//! vector an external collaborator produced through
//! `sigil_core::LuminanceSampler`.

mod code;
mod decode;
mod extract;
mod parity;

pub use code::{bit, canonicalize_code, rotate_code};
pub use decode::{decode_samples, select_best, DecodeResult};
pub use extract::{extract_candidates, DecodeParams, DecodeParamsError, RotationCandidate};
pub use parity::{
    data_bits_of_id, encode_id, id_of_data_bits, parity_bits, EncodeError, MAX_ID, PARITY_SOURCES,
};
