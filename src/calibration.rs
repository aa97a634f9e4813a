//! Yaw calibration: the user-defined yaw range and its mapping onto the
//! normalized pan coordinate.
//!
//! Calibration is interactive and runs once, before the presentation loop:
//! wait briefly for the sensor's first reading, then ask the operator for the
//! yaw values reported while looking at the leftmost and rightmost screens.

use crate::error::{Error, Result};
use crate::orientation::LatestYaw;
use log::{info, warn};
use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

/// How often the calibration step polls the sensor slot
const SENSOR_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// User-calibrated yaw range.
///
/// The span may run in either direction (`left_yaw` greater or smaller than
/// `right_yaw`); the mapping flips with the span's sign. A zero span is
/// rejected at construction so `normalize` can never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationRange {
    left_yaw: f64,
    right_yaw: f64,
}

impl CalibrationRange {
    pub fn new(left_yaw: f64, right_yaw: f64) -> Result<Self> {
        if left_yaw == right_yaw {
            return Err(Error::Calibration(format!(
                "left and right yaw are both {left_yaw}; the range needs a nonzero span"
            )));
        }
        Ok(Self { left_yaw, right_yaw })
    }

    #[must_use]
    pub fn left_yaw(&self) -> f64 {
        self.left_yaw
    }

    #[must_use]
    pub fn right_yaw(&self) -> f64 {
        self.right_yaw
    }

    /// Map a yaw angle onto the normalized pan coordinate in [-1, 1].
    ///
    /// Linear between the endpoints (`left_yaw` maps to -1, `right_yaw` to
    /// +1), clamped outside them.
    #[must_use]
    pub fn normalize(&self, yaw: f64) -> f64 {
        let t = (yaw - self.left_yaw) / (self.right_yaw - self.left_yaw);
        (-1.0 + t * 2.0).clamp(-1.0, 1.0)
    }
}

/// Outcome of the interactive calibration step.
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    /// The operator-supplied yaw range
    pub range: CalibrationRange,
    /// The sensor's steady reading at startup, when one arrived in time
    pub initial_yaw: Option<f64>,
}

/// Run the interactive calibration step.
///
/// Blocks the calling thread: waits up to `sensor_timeout` for the first
/// sensor sample (purely informational, used to seed the filter), then reads
/// the two reference yaw values from `input`, reprompting on non-numeric
/// entries or a zero span. A closed `input` aborts with a
/// [`Error::Calibration`].
pub fn calibrate<R, W>(
    latest: &LatestYaw,
    sensor_timeout: Duration,
    mut input: R,
    mut output: W,
) -> Result<Calibration>
where
    R: BufRead,
    W: Write,
{
    info!("Calibrating head position...");

    let start = Instant::now();
    let mut initial_yaw = None;
    while start.elapsed() < sensor_timeout {
        if let Some(yaw) = latest.latest() {
            initial_yaw = Some(yaw);
            break;
        }
        thread::sleep(SENSOR_POLL_INTERVAL);
    }
    match initial_yaw {
        Some(yaw) => info!("Initial yaw value: {:.2}", yaw),
        None => warn!(
            "No sensor reading within {:.1}s; continuing without a neutral yaw",
            sensor_timeout.as_secs_f64()
        ),
    }

    loop {
        let left = prompt_value(
            &mut input,
            &mut output,
            "Look at the leftmost screen and enter the reported yaw: ",
        )?;
        let right = prompt_value(
            &mut input,
            &mut output,
            "Look at the rightmost screen and enter the reported yaw: ",
        )?;
        match CalibrationRange::new(left, right) {
            Ok(range) => return Ok(Calibration { range, initial_yaw }),
            Err(e) => writeln!(output, "{e}, try again")?,
        }
    }
}

/// Read one numeric value, reprompting until the operator enters a number.
fn prompt_value<R, W>(input: &mut R, output: &mut W, prompt: &str) -> Result<f64>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::Calibration("input closed during calibration".into()));
        }
        match line.trim().parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "Not a number: {:?}, try again", line.trim())?,
        }
    }
}
