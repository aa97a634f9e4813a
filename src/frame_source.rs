//! Fixed-size frame reads from the capture stream.
//!
//! The capture tool writes raw RGB24 frames back to back with no framing, so
//! a frame is exactly `width * height * 3` bytes and a short read means the
//! stream is corrupt or ending.
//!
//! The blocking read happens on a relay thread so the main loop can give up
//! after a bounded timeout instead of hanging forever when the capture
//! process dies. The channel holds at most one frame, which keeps
//! presentation order identical to read order with at most one frame in
//! flight.

use crate::compositor::Frame;
use crate::constants::BYTES_PER_PIXEL;
use crate::error::{Error, Result};
use log::debug;
use std::io::{ErrorKind, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::time::Duration;

/// Reads exactly one raw RGB24 frame per call from the capture byte stream.
pub struct FrameSource {
    frames: Receiver<Result<Frame>>,
    timeout: Duration,
}

impl FrameSource {
    /// Spawn the relay thread over any byte stream delivering `width x height`
    /// RGB24 frames.
    pub fn spawn<R>(stream: R, width: usize, height: usize, timeout: Duration) -> Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        thread::Builder::new()
            .name("frame-reader".into())
            .spawn(move || relay_frames(stream, width, height, &tx))?;
        Ok(Self { frames: rx, timeout })
    }

    /// Blocking read of the next frame, bounded by the configured timeout.
    ///
    /// A short or malformed frame surfaces as [`Error::FrameRead`] for that
    /// cycle; a stream that stops delivering (or closes) surfaces as
    /// [`Error::StreamStalled`].
    pub fn next_frame(&self) -> Result<Frame> {
        match self.frames.recv_timeout(self.timeout) {
            Ok(frame) => frame,
            Err(RecvTimeoutError::Timeout) => Err(Error::StreamStalled(format!(
                "no frame within {:.1}s",
                self.timeout.as_secs_f64()
            ))),
            Err(RecvTimeoutError::Disconnected) => {
                Err(Error::StreamStalled("capture stream closed".into()))
            }
        }
    }
}

enum FillOutcome {
    Full,
    /// Clean end of stream before any byte of the next frame
    Eof,
    /// Stream ended partway through a frame
    Short(usize),
}

fn relay_frames<R: Read>(mut stream: R, width: usize, height: usize, tx: &SyncSender<Result<Frame>>) {
    let frame_len = width * height * BYTES_PER_PIXEL;
    loop {
        let mut data = vec![0u8; frame_len];
        let message = match fill_frame(&mut stream, &mut data) {
            Ok(FillOutcome::Full) => Frame::new(width, height, data),
            Ok(FillOutcome::Eof) => {
                debug!("Capture stream ended");
                break;
            }
            Ok(FillOutcome::Short(got)) => {
                // The stream is gone after a partial frame; report the short
                // read, then let the channel disconnect
                let _ = tx.send(Err(Error::FrameRead(format!(
                    "short frame: {got} of {frame_len} bytes"
                ))));
                break;
            }
            Err(e) => Err(Error::FrameRead(format!("capture read failed: {e}"))),
        };
        if tx.send(message).is_err() {
            // Receiver dropped, the loop is shutting down
            break;
        }
    }
}

/// Read until `buf` is full, distinguishing a clean EOF from a torn frame.
fn fill_frame<R: Read>(stream: &mut R, buf: &mut [u8]) -> std::io::Result<FillOutcome> {
    let mut filled = 0;
    while filled < buf.len() {
        match stream.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(FillOutcome::Eof),
            Ok(0) => return Ok(FillOutcome::Short(filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(FillOutcome::Full)
}
