//! Error types for the viewer.

use thiserror::Error;

/// Main error type for the viewer
#[derive(Error, Debug)]
pub enum Error {
    /// Sensor line did not contain a usable yaw reading
    #[error("Sensor parse error: {0}")]
    Parse(String),

    /// Short or malformed frame read (recovered per cycle)
    #[error("Frame read error: {0}")]
    FrameRead(String),

    /// Capture stream stopped delivering frames or was closed
    #[error("Capture stream stalled: {0}")]
    StreamStalled(String),

    /// Calibration input was invalid (zero-span range, closed input)
    #[error("Calibration error: {0}")]
    Calibration(String),

    /// A collaborator process or tool is missing or failed to start
    #[error("Setup error: {0}")]
    Setup(String),

    /// Compositing failed for a single cycle
    #[error("Composite error: {0}")]
    Composite(String),

    /// Presentation window operation failed
    #[error("Display error: {0}")]
    Display(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
