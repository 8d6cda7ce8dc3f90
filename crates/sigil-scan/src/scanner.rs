//! Per-frame scan pipeline: sample, decode, confirm.

use std::time::Instant;

use log::debug;
use serde::{Deserialize, Serialize};

use sigil_core::{CanonicalLayout, LuminanceSampler, RotationMaps, CELL_COUNT};
use sigil_decode::{decode_samples, DecodeParams, DecodeParamsError, DecodeResult};
use sigil_track::{ConfirmationTracker, TrackStatus, TrackerParams, TrackerParamsError};

/// Combined pipeline configuration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ScanParams {
    #[serde(default)]
    pub decode: DecodeParams,
    #[serde(default)]
    pub tracker: TrackerParams,
}

#[derive(thiserror::Error, Debug)]
pub enum ScanConfigError {
    #[error(transparent)]
    Decode(#[from] DecodeParamsError),
    #[error(transparent)]
    Tracker(#[from] TrackerParamsError),
}

/// What one processed frame reports to the rendering host.
#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    /// The frame's decode, if any. Absence is not an error.
    pub result: Option<DecodeResult>,
    /// Confirmation status after this frame.
    pub status: TrackStatus,
}

/// The per-frame pipeline.
///
/// Owns the layout, the precomputed rotation maps, and the confirmation
/// state. One `process_*` call per frame; callers serialize frames (the
/// tracker's state has no meaning under interleaved updates).
pub struct SigilScanner {
    layout: CanonicalLayout,
    maps: RotationMaps,
    decode: DecodeParams,
    tracker: ConfirmationTracker,
}

impl SigilScanner {
    pub fn new(params: ScanParams) -> Result<Self, ScanConfigError> {
        params.decode.validate()?;
        let tracker = ConfirmationTracker::new(params.tracker)?;
        let layout = CanonicalLayout::new();
        let maps = RotationMaps::from_layout(&layout);
        Ok(Self {
            layout,
            maps,
            decode: params.decode,
            tracker,
        })
    }

    /// Canonical layout, including the query points an external warp
    /// collaborator must be able to answer for.
    #[inline]
    pub fn layout(&self) -> &CanonicalLayout {
        &self.layout
    }

    #[inline]
    pub fn rotation_maps(&self) -> &RotationMaps {
        &self.maps
    }

    /// Process one frame with a detected triangle: sample the 16 canonical
    /// cells, decode, and update the confirmation state.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, sampler)))]
    pub fn process_frame<S: LuminanceSampler>(&mut self, sampler: &S, now: Instant) -> FrameReport {
        sigil_core::advance_frame();
        let samples = self.read_samples(sampler);
        let result = decode_samples(&samples, &self.maps, &self.decode);
        if result.is_none() {
            debug!("frame produced no valid candidate");
        }
        let status = self.tracker.observe(result.as_ref().map(|r| r.id), now);
        FrameReport { result, status }
    }

    /// Process a frame in which the external detector found no candidate
    /// triangle.
    pub fn process_empty_frame(&mut self, now: Instant) -> FrameReport {
        sigil_core::advance_frame();
        let status = self.tracker.observe(None, now);
        FrameReport {
            result: None,
            status,
        }
    }

    /// Advance the auto-unlock deadline between frames.
    pub fn tick(&mut self, now: Instant) -> TrackStatus {
        self.tracker.tick(now)
    }

    /// Status after the last processed frame or tick.
    pub fn status(&self) -> TrackStatus {
        self.tracker.status()
    }

    fn read_samples<S: LuminanceSampler>(&self, sampler: &S) -> [u8; CELL_COUNT] {
        std::array::from_fn(|i| {
            let p = self.layout.centroid(i);
            sampler.sample(p.x, p.y, self.decode.sample_radius)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let params = ScanParams {
            decode: DecodeParams {
                min_contrast: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            SigilScanner::new(params),
            Err(ScanConfigError::Decode(_))
        ));

        let params = ScanParams {
            tracker: TrackerParams {
                unlock_timeout: Duration::ZERO,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            SigilScanner::new(params),
            Err(ScanConfigError::Tracker(_))
        ));
    }

    #[test]
    fn processed_frames_advance_the_log_frame_counter() {
        let mut scanner = SigilScanner::new(ScanParams::default()).expect("scanner");
        let before = sigil_core::current_frame();
        scanner.process_empty_frame(Instant::now());
        assert!(sigil_core::current_frame() > before);
    }

    #[test]
    fn empty_frames_keep_scanning() {
        let mut scanner = SigilScanner::new(ScanParams::default()).expect("scanner");
        let now = Instant::now();
        let report = scanner.process_empty_frame(now);
        assert!(report.result.is_none());
        assert_eq!(report.status, TrackStatus::Scanning);
    }
}
