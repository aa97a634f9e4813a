//! Configuration management for the viewer

use crate::constants::{
    DEFAULT_CALIBRATION_TIMEOUT_SECS, DEFAULT_CAPTURE_GEOMETRY, DEFAULT_CAPTURE_OUTPUT,
    DEFAULT_FIFO_PATH, DEFAULT_FRAME_READ_TIMEOUT_SECS, DEFAULT_MIN_UPDATE_INTERVAL_SECS,
    DEFAULT_SEGMENT_HEIGHT, DEFAULT_SEGMENT_WIDTH, DEFAULT_SMOOTHING_ALPHA, DEFAULT_WINDOW_TITLE,
    DEFAULT_YAW_THRESHOLD_DEGREES, SENSOR_DRIVER_CANDIDATES,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capture stream configuration
    pub capture: CaptureConfig,

    /// Yaw filter configuration
    pub filter: FilterConfig,

    /// Sensor driver configuration
    pub sensor: SensorConfig,

    /// Presentation configuration
    pub display: DisplayConfig,
}

/// Capture stream parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Width of one captured segment in pixels
    pub segment_width: usize,

    /// Height of the captured region in pixels
    pub segment_height: usize,

    /// Named pipe the capture tool streams frames into
    pub fifo_path: PathBuf,

    /// Physical output to capture
    pub output: String,

    /// Capture region passed to wf-recorder
    pub geometry: String,
}

/// Yaw filter parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Smoothing constant for the exponential low-pass (0, 1]
    pub smoothing_alpha: f64,

    /// Minimum yaw change in degrees for an update to be accepted
    pub yaw_threshold_degrees: f64,

    /// Minimum time between accepted updates, in seconds
    pub min_update_interval_secs: f64,
}

/// Sensor driver parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Candidate locations for the IMU driver executable, tried in order
    pub driver_paths: Vec<PathBuf>,

    /// How long to wait for the first reading during calibration, in seconds
    pub calibration_timeout_secs: f64,
}

/// Presentation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window title
    pub window_title: String,

    /// How long a frame read may block before the stream counts as stalled,
    /// in seconds
    pub frame_read_timeout_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            filter: FilterConfig::default(),
            sensor: SensorConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            segment_width: DEFAULT_SEGMENT_WIDTH,
            segment_height: DEFAULT_SEGMENT_HEIGHT,
            fifo_path: PathBuf::from(DEFAULT_FIFO_PATH),
            output: DEFAULT_CAPTURE_OUTPUT.to_string(),
            geometry: DEFAULT_CAPTURE_GEOMETRY.to_string(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            yaw_threshold_degrees: DEFAULT_YAW_THRESHOLD_DEGREES,
            min_update_interval_secs: DEFAULT_MIN_UPDATE_INTERVAL_SECS,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            driver_paths: SENSOR_DRIVER_CANDIDATES.iter().map(PathBuf::from).collect(),
            calibration_timeout_secs: DEFAULT_CALIBRATION_TIMEOUT_SECS,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            frame_read_timeout_secs: DEFAULT_FRAME_READ_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.capture.segment_width == 0 || self.capture.segment_height == 0 {
            return Err(Error::Config("Segment dimensions must be nonzero".to_string()));
        }

        let alpha = self.filter.smoothing_alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(Error::Config(
                "Smoothing alpha must be in (0.0, 1.0]".to_string(),
            ));
        }
        if self.filter.yaw_threshold_degrees <= 0.0 {
            return Err(Error::Config(
                "Yaw threshold must be greater than 0".to_string(),
            ));
        }
        if self.filter.min_update_interval_secs < 0.0 {
            return Err(Error::Config(
                "Minimum update interval must not be negative".to_string(),
            ));
        }

        if self.sensor.driver_paths.is_empty() {
            return Err(Error::Config(
                "At least one sensor driver path is required".to_string(),
            ));
        }
        if self.sensor.calibration_timeout_secs < 0.0 {
            return Err(Error::Config(
                "Calibration timeout must not be negative".to_string(),
            ));
        }

        if self.display.frame_read_timeout_secs <= 0.0 {
            return Err(Error::Config(
                "Frame read timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# glasswide configuration

# Capture stream
capture:
  segment_width: 1920
  segment_height: 1080
  fifo_path: "/tmp/screen_capture"
  output: "HDMI-A-1"
  geometry: "1920x1080+0+0"

# Yaw filter
filter:
  smoothing_alpha: 0.2
  yaw_threshold_degrees: 5.0
  min_update_interval_secs: 0.3

# Sensor driver
sensor:
  driver_paths:
    - "./nrealAirLinuxDriver"
    - "/home/nrealAirLinuxDriver/build/nrealAirLinuxDriver"
    - "/usr/local/bin/nrealAirLinuxDriver"
  calibration_timeout_secs: 10.0

# Presentation
display:
  window_title: "glasswide"
  frame_read_timeout_secs: 5.0
"#;
