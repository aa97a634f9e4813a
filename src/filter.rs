//! Yaw smoothing and debounce.
//!
//! Raw IMU yaw is jittery; a first-order exponential low-pass suppresses the
//! jitter at the cost of a short response lag. On top of that, updates are
//! debounced jointly by magnitude and time so the viewport neither flickers
//! on small drifts nor storms with updates while the angle drifts slowly.

use std::time::{Duration, Instant};

/// Exponential low-pass filter with joint magnitude/time debounce.
///
/// A rejected sample is a no-op: the filter state is left untouched, so the
/// next sample is smoothed against the last *accepted* value.
pub struct YawFilter {
    alpha: f64,
    threshold_degrees: f64,
    min_interval: Duration,
    previous_yaw: f64,
    last_update: Instant,
}

impl YawFilter {
    /// Create a filter seeded with an initial yaw. `now` stamps the initial
    /// state, so the first acceptance is also time-gated.
    #[must_use]
    pub fn new(
        alpha: f64,
        threshold_degrees: f64,
        min_interval: Duration,
        initial_yaw: f64,
        now: Instant,
    ) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self {
            alpha,
            threshold_degrees,
            min_interval,
            previous_yaw: initial_yaw,
            last_update: now,
        }
    }

    /// Feed one raw sample. Returns the smoothed yaw when the update is
    /// accepted, `None` when the debounce gate rejects it.
    ///
    /// Acceptance requires both that the smoothed value moved at least the
    /// threshold away from the previous accepted value and that at least the
    /// minimum interval elapsed since the last acceptance. Both boundaries
    /// are inclusive.
    pub fn apply(&mut self, raw_yaw: f64, now: Instant) -> Option<f64> {
        let filtered = self.previous_yaw * (1.0 - self.alpha) + raw_yaw * self.alpha;

        let moved_enough = (filtered - self.previous_yaw).abs() >= self.threshold_degrees;
        let waited_enough = now.duration_since(self.last_update) >= self.min_interval;
        if !moved_enough || !waited_enough {
            return None;
        }

        self.previous_yaw = filtered;
        self.last_update = now;
        Some(filtered)
    }

    /// The last accepted yaw value.
    #[must_use]
    pub fn previous_yaw(&self) -> f64 {
        self.previous_yaw
    }
}
