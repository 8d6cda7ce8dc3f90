//! Minimal logger for scan hosts.
//!
//! A per-frame pipeline correlates log lines by frame, not by wall time:
//! every line is prefixed with the current frame counter and the record's
//! target, as in `[f000042 DEBUG sigil_decode] ...`. The scanner advances
//! the counter once per processed frame via [`advance_frame`]; hosts that
//! drive decoding themselves can do the same. Use [`init_with_level`] to
//! install the logger once at startup.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

static FRAME: AtomicU64 = AtomicU64::new(0);

struct ScanLogger {
    level: LevelFilter,
}

impl Log for ScanLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let frame = FRAME.load(Ordering::Relaxed);
        let mut stderr = std::io::stderr();
        let _ = writeln!(
            stderr,
            "[f{:06} {:>5} {}] {}",
            frame,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<ScanLogger> = OnceLock::new();

/// Advance the frame counter all subsequent log lines are tagged with, and
/// return the new frame number.
pub fn advance_frame() -> u64 {
    FRAME.fetch_add(1, Ordering::Relaxed) + 1
}

/// Frame number log lines are currently tagged with.
pub fn current_frame() -> u64 {
    FRAME.load(Ordering::Relaxed)
}

/// Install the frame-tagged logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| ScanLogger { level });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber honoring `RUST_LOG`, with span close
/// events so per-frame pipeline spans report their duration.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .finish()
        .try_init();
}
