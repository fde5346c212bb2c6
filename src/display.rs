//! Presentation of the orientation estimate.
//!
//! The presenter is read-only with respect to the estimator: it is handed a
//! copy of the latest [`Orientation`] and the yaw toggle once per tick.

use crate::core::types::Orientation;
use crate::error::Result;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared yaw-display switch.
///
/// Clones share the same flag, so an input thread can flip it while the
/// viewer loop reads it.
#[derive(Debug, Clone, Default)]
pub struct DisplayToggle {
    enabled: Arc<AtomicBool>,
}

impl DisplayToggle {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Invert the flag, returning the new value
    pub fn flip(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::Relaxed)
    }
}

/// On-screen text for one frame.
///
/// # Example
/// ```
/// use disha::Orientation;
/// use disha::display::osd_text;
///
/// let o = Orientation::new(1.0, -2.5, 30.0);
/// assert_eq!(osd_text(&o, false), "Pitch: -2.50, Roll: 1.00");
/// assert_eq!(osd_text(&o, true), "Pitch: -2.50, Roll: 1.00, Yaw: 30.00");
/// ```
pub fn osd_text(orientation: &Orientation, yaw_enabled: bool) -> String {
    let mut text = format!(
        "Pitch: {:.2}, Roll: {:.2}",
        orientation.pitch, orientation.roll
    );
    if yaw_enabled {
        text.push_str(&format!(", Yaw: {:.2}", orientation.yaw));
    }
    text
}

/// Consumer of the estimate, called once per viewer tick.
pub trait Presenter {
    fn render(&mut self, orientation: &Orientation, yaw_enabled: bool) -> Result<()>;
}

/// Writes one OSD line per render to any writer (stdout in the binary).
///
/// Renders closer together than the configured interval are skipped.
pub struct ConsolePresenter<W: Write> {
    out: W,
    min_interval: Duration,
    last_render: Option<Instant>,
    frames: u64,
}

impl<W: Write> ConsolePresenter<W> {
    /// # Arguments
    /// * `out` - Destination for OSD lines
    /// * `min_interval` - Minimum spacing between renders (zero renders every tick)
    pub fn new(out: W, min_interval: Duration) -> Self {
        Self {
            out,
            min_interval,
            last_render: None,
            frames: 0,
        }
    }

    /// Number of frames actually written
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn due(&self, now: Instant) -> bool {
        match self.last_render {
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
            None => true,
        }
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn render(&mut self, orientation: &Orientation, yaw_enabled: bool) -> Result<()> {
        let now = Instant::now();
        if !self.due(now) {
            return Ok(());
        }
        writeln!(self.out, "{}", osd_text(orientation, yaw_enabled))?;
        self.out.flush()?;
        self.last_render = Some(now);
        self.frames += 1;
        Ok(())
    }
}
