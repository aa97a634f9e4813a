//! Virtual display setup and teardown.
//!
//! The wide virtual desktop is made of two extra outputs added next to the
//! physical one. KDE exposes these through `kscreen-doctor`; wlroots-based
//! compositors (Hyprland, Sway) through `wlr-randr`. Both are driven as
//! external tools; a missing tool is a setup error.

use crate::constants::{VIRTUAL_OUTPUT_MODE, VIRTUAL_OUTPUT_POSITIONS};
use crate::error::{Error, Result};
use log::{info, warn};
use std::process::Command;

/// Desktop environment, which selects the display configuration tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopEnv {
    Kde,
    Wlroots,
}

impl DesktopEnv {
    /// Detect from `XDG_CURRENT_DESKTOP`. KDE gets `kscreen-doctor`;
    /// everything else is assumed wlroots-based and gets `wlr-randr`.
    #[must_use]
    pub fn detect() -> Self {
        match std::env::var("XDG_CURRENT_DESKTOP") {
            Ok(v) if v.eq_ignore_ascii_case("kde") => Self::Kde,
            _ => Self::Wlroots,
        }
    }

    /// The display configuration tool for this environment.
    #[must_use]
    pub fn tool(self) -> &'static str {
        match self {
            Self::Kde => "kscreen-doctor",
            Self::Wlroots => "wlr-randr",
        }
    }
}

/// Whether a command resolves on PATH.
fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Count connected displays as reported by the configuration tool.
pub fn connected_displays(env: DesktopEnv) -> Result<usize> {
    let output = Command::new(env.tool())
        .output()
        .map_err(|e| Error::Setup(format!("failed to run {}: {e}", env.tool())))?;
    let text = String::from_utf8_lossy(&output.stdout);
    Ok(text.matches("connected").count())
}

fn run_tool(cmd: &str, args: &[String]) -> Result<()> {
    let status = Command::new(cmd)
        .args(args)
        .status()
        .map_err(|e| Error::Setup(format!("failed to run {cmd}: {e}")))?;
    if !status.success() {
        return Err(Error::Setup(format!("{cmd} {} failed: {status}", args.join(" "))));
    }
    Ok(())
}

/// Virtual outputs held for the lifetime of the session.
///
/// Removal runs on drop, so the outputs disappear on every exit path
/// (normal quit, fatal error, or an unwinding panic).
pub struct VirtualScreenGuard {
    env: DesktopEnv,
    active: bool,
}

impl VirtualScreenGuard {
    /// Add the two virtual outputs next to the physical array.
    pub fn add(env: DesktopEnv) -> Result<Self> {
        if !command_exists(env.tool()) {
            return Err(Error::Setup(format!(
                "{} not found; cannot configure virtual outputs",
                env.tool()
            )));
        }

        info!("Adding virtual screens...");
        let displays = connected_displays(env)?;
        info!("Detected {} connected displays", displays);
        if displays >= 3 {
            info!("3 or more physical monitors present; virtual screens are added without modifying them");
        }

        for (i, (x, y)) in VIRTUAL_OUTPUT_POSITIONS.iter().enumerate() {
            let name = format!("Virtual-{}", i + 1);
            let args = match env {
                DesktopEnv::Kde => vec![format!("output.{name}.position.{x},{y}")],
                DesktopEnv::Wlroots => vec![
                    "--output".into(),
                    name,
                    "--mode".into(),
                    VIRTUAL_OUTPUT_MODE.into(),
                    "--pos".into(),
                    format!("{x},{y}"),
                ],
            };
            run_tool(env.tool(), &args)?;
        }
        info!("Virtual screens added");

        Ok(Self { env, active: true })
    }

    /// Disable the virtual outputs. Idempotent; failures are logged, not
    /// propagated, since teardown must always run to completion.
    pub fn remove(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        info!("Removing virtual screens...");
        for i in 1..=VIRTUAL_OUTPUT_POSITIONS.len() {
            let name = format!("Virtual-{i}");
            let args = match self.env {
                DesktopEnv::Kde => vec![format!("output.{name}.disable")],
                DesktopEnv::Wlroots => vec!["--output".into(), name, "--off".into()],
            };
            if let Err(e) = run_tool(self.env.tool(), &args) {
                warn!("Failed to remove a virtual screen: {}", e);
            }
        }
        info!("Virtual screens removed");
    }
}

impl Drop for VirtualScreenGuard {
    fn drop(&mut self) {
        self.remove();
    }
}
