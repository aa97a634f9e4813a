//! Orientation input: sensor line parsing, the latest-value slot, and the
//! background reader thread.
//!
//! The IMU driver prints one line per sample. Only the most recent yaw ever
//! matters to the presentation loop, so the reader overwrites a single shared
//! slot instead of queueing samples.

use crate::error::Result;
use log::{debug, warn};
use std::io::BufRead;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Extract a yaw reading from one line of sensor output.
///
/// A line matches if it contains a `Yaw: <signed decimal>` token; the first
/// such token wins. Lines without one yield `None` and are simply skipped.
pub fn parse_yaw(line: &str) -> Option<f64> {
    let mut rest = line;
    while let Some(idx) = rest.find("Yaw:") {
        rest = &rest[idx + 4..];
        if let Some(value) = leading_number(rest.trim_start()) {
            return Some(value);
        }
    }
    None
}

/// Parse the signed decimal number at the start of `s`, if any.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
    }
    s[..end].parse().ok()
}

/// Single-slot hand-off for the most recent yaw sample.
///
/// Written only by the reader thread, read only by the main loop. The writer
/// may overwrite between reads (benign staleness); a reader never sees a
/// partially written value. "No sample yet" is explicit, so a yaw of zero is
/// never mistaken for an empty slot.
#[derive(Clone, Default)]
pub struct LatestYaw {
    slot: Arc<Mutex<Option<f64>>>,
}

impl LatestYaw {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a newer sample.
    pub fn store(&self, yaw: f64) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(yaw);
    }

    /// The most recent sample, if one has ever arrived. Does not consume it.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether any sample has arrived yet.
    #[must_use]
    pub fn has_sample(&self) -> bool {
        self.latest().is_some()
    }
}

/// Background reader that consumes sensor output lines and publishes the
/// most recent yaw.
///
/// The thread blocks only on the sensor stream, never on the main loop. It
/// has no cancellation of its own: it exits when the stream ends, which
/// happens when the sensor process is terminated.
pub struct OrientationReader {
    latest: LatestYaw,
}

impl OrientationReader {
    /// Spawn the reader over any line-oriented stream.
    pub fn spawn<R>(stream: R) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let latest = LatestYaw::new();
        let slot = latest.clone();
        thread::Builder::new()
            .name("orientation-reader".into())
            .spawn(move || read_loop(stream, &slot))?;
        Ok(Self { latest })
    }

    /// The most recent yaw sample, if one has ever arrived.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.latest.latest()
    }

    /// Handle to the shared slot, for components that poll it directly.
    #[must_use]
    pub fn slot(&self) -> LatestYaw {
        self.latest.clone()
    }
}

fn read_loop<R: BufRead>(stream: R, slot: &LatestYaw) {
    for line in stream.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Sensor stream read failed: {}", e);
                break;
            }
        };
        match parse_yaw(&line) {
            Some(yaw) => slot.store(yaw),
            None => debug!("Ignoring sensor line without yaw: {:?}", line),
        }
    }
    debug!("Sensor stream ended, orientation reader exiting");
}
