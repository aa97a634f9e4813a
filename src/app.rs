//! Main application module: collaborator wiring, calibration, and the
//! presentation loop.

use crate::{
    calibration::{self, Calibration},
    capture::{self, CaptureProcess, SensorProcess},
    compositor,
    config::Config,
    constants::NUM_SEGMENTS,
    display::{PresentationSink, WindowSink},
    error::{Error, Result},
    filter::YawFilter,
    frame_source::FrameSource,
    orientation::OrientationReader,
    screens::{DesktopEnv, VirtualScreenGuard},
};
use log::{error, info, warn};
use std::fs::File;
use std::io::{self, BufReader};
use std::time::{Duration, Instant};

/// The running viewer session.
///
/// Owns every collaborator handle. The guards tear the session down on drop,
/// so virtual screens are removed and child processes killed on every exit
/// path, fatal errors included.
pub struct ViewerApp {
    config: Config,
    orientation: OrientationReader,
    // Held for their Drop impls; torn down in reverse declaration order
    _sensor: SensorProcess,
    _capture: CaptureProcess,
    _screens: Option<VirtualScreenGuard>,
}

impl ViewerApp {
    /// Set up the session: virtual outputs, the capture FIFO and process,
    /// and the sensor driver with its background orientation reader.
    ///
    /// Every failure here is a [`Error::Setup`]-class condition: the
    /// environment is missing a collaborator and the process should exit.
    pub fn new(config: Config, manage_virtual_screens: bool) -> Result<Self> {
        config.validate()?;
        info!("Initializing viewer session");

        let screens = if manage_virtual_screens {
            Some(VirtualScreenGuard::add(DesktopEnv::detect())?)
        } else {
            info!("Skipping virtual screen setup");
            None
        };

        capture::ensure_fifo(&config.capture.fifo_path)?;
        let capture_process = CaptureProcess::start(
            &config.capture.output,
            &config.capture.geometry,
            &config.capture.fifo_path,
        )?;

        let driver = capture::find_sensor_driver(&config.sensor.driver_paths)?;
        let mut sensor = SensorProcess::start(&driver)?;
        let orientation = OrientationReader::spawn(BufReader::new(sensor.take_stdout()?))?;

        Ok(Self {
            config,
            orientation,
            _sensor: sensor,
            _capture: capture_process,
            _screens: screens,
        })
    }

    /// Calibrate interactively, then run the presentation loop until the
    /// user quits or a fatal error occurs.
    pub fn run(&mut self) -> Result<()> {
        let calibration = calibration::calibrate(
            &self.orientation.slot(),
            Duration::from_secs_f64(self.config.sensor.calibration_timeout_secs),
            io::stdin().lock(),
            io::stdout(),
        )?;

        let now = Instant::now();
        let mut filter = YawFilter::new(
            self.config.filter.smoothing_alpha,
            self.config.filter.yaw_threshold_degrees,
            Duration::from_secs_f64(self.config.filter.min_update_interval_secs),
            calibration.initial_yaw.unwrap_or(0.0),
            now,
        );

        let width = self.config.capture.segment_width;
        let height = self.config.capture.segment_height;
        // Opening the FIFO read end blocks until wf-recorder has its write
        // end open, which it does right after startup
        let fifo = File::open(&self.config.capture.fifo_path)?;
        let frames = FrameSource::spawn(
            fifo,
            width * NUM_SEGMENTS,
            height,
            Duration::from_secs_f64(self.config.display.frame_read_timeout_secs),
        )?;

        let mut sink = WindowSink::new(&self.config.display.window_title, width, height)?;

        self.presentation_loop(&frames, &mut filter, &calibration, &mut sink)
    }

    /// One cycle per captured frame: read, filter, map, compose, present,
    /// poll for quit. Per-cycle errors skip the cycle; a stalled stream is
    /// fatal.
    fn presentation_loop(
        &self,
        frames: &FrameSource,
        filter: &mut YawFilter,
        calibration: &Calibration,
        sink: &mut dyn PresentationSink,
    ) -> Result<()> {
        info!("Entering presentation loop");
        loop {
            let frame = match frames.next_frame() {
                Ok(frame) => Some(frame),
                Err(Error::FrameRead(msg)) => {
                    warn!("Skipping cycle: {}", msg);
                    None
                }
                // Stalled or closed capture stream: the collaborator died
                Err(e) => return Err(e),
            };

            if sink.quit_requested() {
                info!("Quit requested");
                break;
            }

            // The frame is consumed even on skipped cycles, so the capture
            // pipe never backs up
            let Some(frame) = frame else { continue };

            let Some(raw_yaw) = self.orientation.latest() else {
                // No sensor sample yet; nothing to display
                continue;
            };

            let Some(yaw) = filter.apply(raw_yaw, Instant::now()) else {
                // Debounced; keep the previous view
                continue;
            };

            let pan = calibration.range.normalize(yaw);
            match compositor::compose(&frame, pan) {
                Ok(view) => sink.present(&view)?,
                Err(e) => {
                    // A single bad cycle must never end the session
                    error!("Compositing failed for this cycle: {}", e);
                    continue;
                }
            }
        }

        info!("Presentation loop finished, shutting down");
        Ok(())
    }
}
