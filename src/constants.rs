//! Constants used throughout the application

/// Width of one captured screen segment in pixels
pub const DEFAULT_SEGMENT_WIDTH: usize = 1920;

/// Height of the captured region in pixels
pub const DEFAULT_SEGMENT_HEIGHT: usize = 1080;

/// Number of horizontally adjacent segments in the capture stream
pub const NUM_SEGMENTS: usize = 2;

/// Bytes per pixel for raw RGB24 frames
pub const BYTES_PER_PIXEL: usize = 3;

/// Smoothing constant for the yaw low-pass filter
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.2;

/// Minimum yaw change (degrees) for an update to be accepted
pub const DEFAULT_YAW_THRESHOLD_DEGREES: f64 = 5.0;

/// Minimum time between accepted updates (seconds)
pub const DEFAULT_MIN_UPDATE_INTERVAL_SECS: f64 = 0.3;

/// Default named pipe the capture tool streams frames into
pub const DEFAULT_FIFO_PATH: &str = "/tmp/screen_capture";

/// Default physical output captured by wf-recorder
pub const DEFAULT_CAPTURE_OUTPUT: &str = "HDMI-A-1";

/// Default capture region passed to wf-recorder
pub const DEFAULT_CAPTURE_GEOMETRY: &str = "1920x1080+0+0";

/// How long to wait for the first sensor reading during calibration (seconds)
pub const DEFAULT_CALIBRATION_TIMEOUT_SECS: f64 = 10.0;

/// How long a frame read may block before the stream counts as stalled (seconds)
pub const DEFAULT_FRAME_READ_TIMEOUT_SECS: f64 = 5.0;

/// Default window title for the presentation sink
pub const DEFAULT_WINDOW_TITLE: &str = "glasswide";

/// Candidate locations for the IMU driver executable
pub const SENSOR_DRIVER_CANDIDATES: &[&str] = &[
    "./nrealAirLinuxDriver",
    "/home/nrealAirLinuxDriver/build/nrealAirLinuxDriver",
    "/usr/local/bin/nrealAirLinuxDriver",
];

/// Mode string for the virtual outputs
pub const VIRTUAL_OUTPUT_MODE: &str = "1920x1080";

/// Positions of the two virtual outputs, to the right of the physical array
pub const VIRTUAL_OUTPUT_POSITIONS: [(u32, u32); 2] = [(5760, 0), (7680, 0)];
