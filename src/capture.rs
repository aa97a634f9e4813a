//! Capture and sensor process collaborators.
//!
//! Both are opaque external processes: `wf-recorder` streams the captured
//! region into a named pipe the loop reads frames from, and the IMU driver
//! prints orientation lines on stdout. The core only consumes their output;
//! starting and stopping them happens here, once per session.

use crate::error::{Error, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

/// Create the capture FIFO if it does not exist yet.
pub fn ensure_fifo(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    let status = Command::new("mkfifo")
        .arg(path)
        .status()
        .map_err(|e| Error::Setup(format!("failed to run mkfifo: {e}")))?;
    if !status.success() {
        return Err(Error::Setup(format!("mkfifo {} failed: {status}", path.display())));
    }
    Ok(())
}

/// Locate the sensor driver binary among the candidate paths.
pub fn find_sensor_driver(candidates: &[PathBuf]) -> Result<PathBuf> {
    for candidate in candidates {
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }
    let looked_in: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
    Err(Error::Setup(format!(
        "sensor driver not found; looked in: {}",
        looked_in.join(", ")
    )))
}

/// Handle to the running `wf-recorder` capture process.
pub struct CaptureProcess {
    child: Child,
    stopped: bool,
}

impl CaptureProcess {
    /// Stream the given region of `output` into the FIFO.
    pub fn start(output: &str, geometry: &str, fifo: &Path) -> Result<Self> {
        info!("Starting screen capture on {} ({})", output, geometry);
        let child = Command::new("wf-recorder")
            .args(["-o", output, "-g", geometry, "-f"])
            .arg(fifo)
            .spawn()
            .map_err(|e| Error::Setup(format!("failed to start wf-recorder: {e}")))?;
        Ok(Self { child, stopped: false })
    }

    /// Kill the capture process and reap it. Idempotent.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        info!("Stopping screen capture");
        if let Err(e) = self.child.kill() {
            warn!("Failed to kill wf-recorder: {}", e);
        }
        let _ = self.child.wait();
    }
}

impl Drop for CaptureProcess {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handle to the running IMU driver process.
pub struct SensorProcess {
    child: Child,
    stopped: bool,
}

impl SensorProcess {
    /// Spawn the driver with piped stdout. The driver expects to run from
    /// its own directory.
    pub fn start(path: &Path) -> Result<Self> {
        info!("Starting sensor driver {}", path.display());
        let mut command = Command::new(path);
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            command.current_dir(dir);
        }
        let child = command
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Setup(format!("failed to start sensor driver: {e}")))?;
        Ok(Self { child, stopped: false })
    }

    /// Take the stdout pipe for the orientation reader. Can only be done
    /// once.
    pub fn take_stdout(&mut self) -> Result<ChildStdout> {
        self.child
            .stdout
            .take()
            .ok_or_else(|| Error::Setup("sensor driver stdout already taken".into()))
    }

    /// Kill the driver and reap it. This is also what tears down the
    /// orientation reader thread: its stream ends when the driver dies.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        info!("Stopping sensor driver");
        if let Err(e) = self.child.kill() {
            warn!("Failed to kill sensor driver: {}", e);
        }
        let _ = self.child.wait();
    }
}

impl Drop for SensorProcess {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_sensor_driver_missing() {
        let candidates = vec![PathBuf::from("/nonexistent/driver-a"), PathBuf::from("/nonexistent/driver-b")];
        let err = find_sensor_driver(&candidates).unwrap_err();
        assert!(matches!(err, Error::Setup(_)));
        assert!(err.to_string().contains("driver-b"));
    }

    #[test]
    fn test_find_sensor_driver_picks_first_existing() {
        let candidates = vec![PathBuf::from("/nonexistent/driver"), PathBuf::from("/bin/sh")];
        assert_eq!(find_sensor_driver(&candidates).unwrap(), PathBuf::from("/bin/sh"));
    }

    #[test]
    fn test_ensure_fifo_existing_path_is_ok() {
        // An existing path is left alone, whatever it is
        assert!(ensure_fifo(Path::new("/tmp")).is_ok());
    }
}
