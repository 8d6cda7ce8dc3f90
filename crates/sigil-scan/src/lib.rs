//! High-level facade crate for the `sigil-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the underlying crates,
//! - the per-frame [`SigilScanner`] pipeline (sample → decode → confirm),
//! - a synthetic sigil rasterizer for tests and demos.
//!
//! ## Quickstart
//!
//! ```
//! use std::time::Instant;
//! use sigil_scan::{PatchSampler, Rotation, ScanParams, SigilScanner};
//! use sigil_scan::render::{render_sigil_patch, RenderLevels};
//! use sigil_scan::encode_id;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut scanner = SigilScanner::new(ScanParams::default())?;
//! let code = encode_id(42)?;
//! let patch = render_sigil_patch(
//!     scanner.layout(),
//!     scanner.rotation_maps(),
//!     code,
//!     Rotation::Deg0,
//!     RenderLevels::default(),
//! );
//! let sampler = PatchSampler::new(patch.view())?;
//! let report = scanner.process_frame(&sampler, Instant::now());
//! assert_eq!(report.result.map(|r| r.id), Some(42));
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `sigil_scan::core`: canonical layout, rotation maps, sampling seam.
//! - `sigil_scan::decode`: bit extraction, parity, id codec.
//! - `sigil_scan::track`: confirmation/lock state machine.
//! - `sigil_scan::render`: synthetic patch rasterizer.

pub use sigil_core as core;
pub use sigil_decode as decode;
pub use sigil_track as track;

pub mod render;
mod report;
mod scanner;

pub use report::{cell_readout, CellBit};
pub use scanner::{FrameReport, ScanConfigError, ScanParams, SigilScanner};

pub use sigil_core::{
    order_vertices, CanonicalLayout, CellRole, GrayPatch, GrayPatchView, LuminanceSampler,
    PatchSampler, Rotation, RotationMaps,
};
pub use sigil_decode::{decode_samples, encode_id, DecodeParams, DecodeResult};
pub use sigil_track::{ConfirmationTracker, TrackStatus, TrackerParams};
