//! Presentation sink: pixel blit and quit polling.
//!
//! The loop only needs two things from the surface it draws on: show one
//! segment-sized RGB frame, and report whether the user asked to quit. The
//! trait keeps the loop testable without a window system.

use crate::compositor::Frame;
use crate::error::{Error, Result};
use log::info;
use minifb::{Key, Window, WindowOptions};

/// Where composed viewport frames go, one per cycle.
pub trait PresentationSink {
    /// Display one segment-sized RGB frame.
    fn present(&mut self, frame: &Frame) -> Result<()>;

    /// True when the user asked to quit (window closed, Escape, or Q).
    fn quit_requested(&mut self) -> bool;
}

/// minifb-backed window sink.
pub struct WindowSink {
    window: Window,
    buffer: Vec<u32>,
}

impl WindowSink {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        info!("Opening {}x{} presentation window", width, height);
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::Display(format!("failed to open window: {e}")))?;
        Ok(Self {
            window,
            buffer: vec![0; width * height],
        })
    }
}

impl PresentationSink for WindowSink {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.buffer.clear();
        self.buffer.extend(frame.data().chunks_exact(3).map(|px| {
            (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2])
        }));

        self.window
            .update_with_buffer(&self.buffer, frame.width(), frame.height())
            .map_err(|e| Error::Display(format!("failed to present frame: {e}")))
    }

    fn quit_requested(&mut self) -> bool {
        // Pump events even on cycles that skip presentation, otherwise quit
        // requests go unseen while the head is still
        self.window.update();
        !self.window.is_open()
            || self.window.is_key_down(Key::Escape)
            || self.window.is_key_down(Key::Q)
    }
}
