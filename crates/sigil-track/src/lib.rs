//! Debounced identity confirmation for per-frame sigil decodes.
//!
//! A stream of per-frame decode attempts (possibly empty) is converted into
//! a stable "locked identifier" with hysteresis: an id must appear in N
//! consecutive accepted frames before it locks, and the lock expires only
//! after a fixed idle timeout with no qualifying frame.
//!
//! Time is explicit. The tracker stores at most one pending unlock deadline
//! and evaluates it against a caller-supplied `now`, both in the per-frame
//! entry point and in [`ConfirmationTracker::tick`]; there are no ambient
//! timers or callbacks. Callers serialize frame processing.

use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

/// Tracker behaviour knobs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TrackerParams {
    /// Consecutive matching frames required to lock (default: 3).
    pub frames_to_lock: u32,
    /// Idle time after which a lock expires (default: 5 s). Every
    /// qualifying frame while locked reschedules the deadline, so
    /// continuous detection keeps the lock alive indefinitely.
    pub unlock_timeout: Duration,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            frames_to_lock: 3,
            unlock_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TrackerParamsError {
    #[error("frames_to_lock must be >= 1")]
    ZeroFramesToLock,
    #[error("unlock_timeout must be positive")]
    ZeroUnlockTimeout,
}

impl TrackerParams {
    pub fn validate(&self) -> Result<(), TrackerParamsError> {
        if self.frames_to_lock == 0 {
            return Err(TrackerParamsError::ZeroFramesToLock);
        }
        if self.unlock_timeout.is_zero() {
            return Err(TrackerParamsError::ZeroUnlockTimeout);
        }
        Ok(())
    }
}

/// Externally visible confirmation status, recomputed after every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TrackStatus {
    /// No candidate id under consideration.
    Scanning,
    /// A candidate id has appeared in `count` of the `needed` consecutive
    /// frames.
    Confirming { id: u16, count: u32, needed: u32 },
    /// The id has been confirmed and is stable for display.
    Locked { id: u16 },
}

/// Converts a stream of per-frame decodes into a stable locked id.
///
/// Misses are tolerant by design: a frame with no result leaves the streak
/// untouched instead of resetting it, so sporadic single-frame dropouts do
/// not force re-confirmation from scratch.
#[derive(Debug)]
pub struct ConfirmationTracker {
    params: TrackerParams,
    tracked: Option<u16>,
    streak: u32,
    locked: Option<u16>,
    deadline: Option<Instant>,
}

impl ConfirmationTracker {
    pub fn new(params: TrackerParams) -> Result<Self, TrackerParamsError> {
        params.validate()?;
        Ok(Self {
            params,
            tracked: None,
            streak: 0,
            locked: None,
            deadline: None,
        })
    }

    /// Feed one processed frame's outcome (`None` = no decode this frame)
    /// and return the resulting status.
    pub fn observe(&mut self, decoded: Option<u16>, now: Instant) -> TrackStatus {
        self.expire(now);

        if let Some(id) = decoded {
            match self.tracked {
                Some(t) if t == id => self.streak += 1,
                _ => {
                    // a different id invalidates any existing lock
                    // immediately; no stale lockedId lingers until the old
                    // deadline fires
                    if self.locked.is_some() && self.locked != Some(id) {
                        debug!("lock on {:?} cleared by new id {id}", self.locked);
                        self.locked = None;
                        self.deadline = None;
                    }
                    self.tracked = Some(id);
                    self.streak = 1;
                }
            }

            if self.streak >= self.params.frames_to_lock {
                if self.locked != Some(id) {
                    debug!("locked id {id} after {} frames", self.streak);
                }
                self.locked = Some(id);
                self.deadline = Some(now + self.params.unlock_timeout);
            }
        }

        self.status()
    }

    /// Evaluate the unlock deadline between frames.
    pub fn tick(&mut self, now: Instant) -> TrackStatus {
        self.expire(now);
        self.status()
    }

    /// Status after the last processed frame or tick.
    pub fn status(&self) -> TrackStatus {
        if let Some(id) = self.locked {
            TrackStatus::Locked { id }
        } else if let Some(id) = self.tracked {
            TrackStatus::Confirming {
                id,
                count: self.streak,
                needed: self.params.frames_to_lock,
            }
        } else {
            TrackStatus::Scanning
        }
    }

    /// Currently locked id, if any.
    pub fn locked_id(&self) -> Option<u16> {
        self.locked
    }

    fn expire(&mut self, now: Instant) {
        let expired = matches!(self.deadline, Some(d) if now >= d);
        if expired {
            debug!("lock on {:?} expired", self.locked);
            self.tracked = None;
            self.streak = 0;
            self.locked = None;
            self.deadline = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ConfirmationTracker {
        ConfirmationTracker::new(TrackerParams::default()).expect("valid params")
    }

    fn t(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn rejects_invalid_params() {
        let bad = TrackerParams {
            frames_to_lock: 0,
            ..Default::default()
        };
        assert!(matches!(
            ConfirmationTracker::new(bad),
            Err(TrackerParamsError::ZeroFramesToLock)
        ));
        let bad = TrackerParams {
            unlock_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            ConfirmationTracker::new(bad),
            Err(TrackerParamsError::ZeroUnlockTimeout)
        ));
    }

    #[test]
    fn locks_after_n_consecutive_frames() {
        let base = Instant::now();
        let mut tr = tracker();
        assert_eq!(
            tr.observe(Some(42), t(base, 0)),
            TrackStatus::Confirming {
                id: 42,
                count: 1,
                needed: 3
            }
        );
        assert_eq!(
            tr.observe(Some(42), t(base, 33)),
            TrackStatus::Confirming {
                id: 42,
                count: 2,
                needed: 3
            }
        );
        assert_eq!(tr.observe(Some(42), t(base, 66)), TrackStatus::Locked { id: 42 });
    }

    #[test]
    fn n_minus_one_frames_then_other_id_never_locks() {
        let base = Instant::now();
        let mut tr = tracker();
        tr.observe(Some(7), t(base, 0));
        tr.observe(Some(7), t(base, 33));
        let status = tr.observe(Some(8), t(base, 66));
        assert_eq!(
            status,
            TrackStatus::Confirming {
                id: 8,
                count: 1,
                needed: 3
            }
        );
        assert_eq!(tr.locked_id(), None);
    }

    #[test]
    fn miss_does_not_reset_the_streak() {
        // tolerant policy: a no-result frame leaves counters unchanged
        let base = Instant::now();
        let mut tr = tracker();
        tr.observe(Some(9), t(base, 0));
        tr.observe(Some(9), t(base, 33));
        assert_eq!(
            tr.observe(None, t(base, 66)),
            TrackStatus::Confirming {
                id: 9,
                count: 2,
                needed: 3
            }
        );
        assert_eq!(tr.observe(Some(9), t(base, 99)), TrackStatus::Locked { id: 9 });
    }

    #[test]
    fn lock_survives_single_dropout() {
        let base = Instant::now();
        let mut tr = tracker();
        for ms in [0, 33, 66] {
            tr.observe(Some(5), t(base, ms));
        }
        assert_eq!(tr.observe(None, t(base, 99)), TrackStatus::Locked { id: 5 });
    }

    #[test]
    fn lock_expires_only_after_full_timeout() {
        let base = Instant::now();
        let mut tr = tracker();
        for ms in [0, 33, 66] {
            tr.observe(Some(5), t(base, ms));
        }
        // just before the deadline: still locked
        assert_eq!(tr.tick(t(base, 66 + 4_999)), TrackStatus::Locked { id: 5 });
        // at the deadline: back to scanning, fully reset
        assert_eq!(tr.tick(t(base, 66 + 5_000)), TrackStatus::Scanning);
        assert_eq!(tr.locked_id(), None);
    }

    #[test]
    fn qualifying_frames_reschedule_the_deadline() {
        let base = Instant::now();
        let mut tr = tracker();
        for ms in [0, 33, 66] {
            tr.observe(Some(5), t(base, ms));
        }
        // keep detecting at 4 s intervals: each frame restarts the 5 s
        // deadline, so the lock outlives the original one
        tr.observe(Some(5), t(base, 4_000));
        tr.observe(Some(5), t(base, 8_000));
        assert_eq!(tr.tick(t(base, 12_900)), TrackStatus::Locked { id: 5 });
        assert_eq!(tr.tick(t(base, 13_000)), TrackStatus::Scanning);
    }

    #[test]
    fn new_id_while_locked_clears_the_lock_immediately() {
        let base = Instant::now();
        let mut tr = tracker();
        for ms in [0, 33, 66] {
            tr.observe(Some(5), t(base, ms));
        }
        let status = tr.observe(Some(6), t(base, 99));
        assert_eq!(
            status,
            TrackStatus::Confirming {
                id: 6,
                count: 1,
                needed: 3
            }
        );
        assert_eq!(tr.locked_id(), None);
        // the old deadline must not fire later and wipe the new streak
        tr.observe(Some(6), t(base, 132));
        assert_eq!(
            tr.tick(t(base, 6_000)),
            TrackStatus::Confirming {
                id: 6,
                count: 2,
                needed: 3
            }
        );
    }

    #[test]
    fn relock_after_expiry_requires_full_confirmation() {
        let base = Instant::now();
        let mut tr = tracker();
        for ms in [0, 33, 66] {
            tr.observe(Some(5), t(base, ms));
        }
        tr.tick(t(base, 10_000));
        assert_eq!(
            tr.observe(Some(5), t(base, 10_033)),
            TrackStatus::Confirming {
                id: 5,
                count: 1,
                needed: 3
            }
        );
    }
}
