//! Head-tracked AR glasses viewer for a wide virtual desktop.
//!
//! The desktop spans two monitor-width segments captured as one wide RGB
//! frame. A head-mounted IMU reports yaw; as the user turns their head, the
//! visible monitor-width window pans across the wide frame, simulating a
//! world-fixed multi-monitor array seen through a narrow-field headset.
//!
//! The pipeline, once per display refresh:
//! 1. The background [`orientation::OrientationReader`] keeps the latest yaw
//!    sample in a single shared slot.
//! 2. [`filter::YawFilter`] smooths the raw yaw and debounces small or
//!    too-frequent changes.
//! 3. [`calibration::CalibrationRange`] maps the accepted yaw onto a
//!    normalized pan coordinate in [-1, 1].
//! 4. [`compositor::compose`] slices the wide frame into the displayed
//!    window, which goes to the presentation sink.
//!
//! # Examples
//!
//! ```
//! use glasswide::calibration::CalibrationRange;
//! use glasswide::compositor::{compose, Frame};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Calibrated range: looking left reads -30°, looking right +30°
//! let range = CalibrationRange::new(-30.0, 30.0)?;
//!
//! // A tiny two-segment frame, 4 + 4 columns wide, 2 rows tall
//! let frame = Frame::new(8, 2, vec![0u8; 8 * 2 * 3])?;
//!
//! // Looking straight ahead shows the right-hand segment unmodified
//! let pan = range.normalize(0.0);
//! let view = compose(&frame, pan)?;
//! assert_eq!((view.width(), view.height()), (4, 2));
//! # Ok(())
//! # }
//! ```

/// Sensor line parsing, the latest-yaw slot, and the background reader
pub mod orientation;

/// Yaw smoothing and debounce
pub mod filter;

/// Interactive calibration and the yaw-to-pan mapping
pub mod calibration;

/// Fixed-size frame reads from the capture stream
pub mod frame_source;

/// Viewport compositing of the wide frame into the displayed window
pub mod compositor;

/// Presentation sink (pixel blit and quit polling)
pub mod display;

/// Virtual display setup and teardown
pub mod screens;

/// Capture and sensor process collaborators
pub mod capture;

/// Main application module
pub mod app;

/// Error types and result handling
pub mod error;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

pub use error::{Error, Result};
