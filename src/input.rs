//! Keyboard commands for the viewer.
//!
//! A reader thread turns text lines into [`ViewerEvent`]s and sends them over
//! a channel; the viewer loop drains the channel without blocking.

use crate::error::{Error, Result};
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::io::BufRead;
use std::thread::{self, JoinHandle};

/// External input understood by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Flip whether yaw is shown
    ToggleYaw,
    /// Stop the viewer loop
    Quit,
}

/// Map one input line to an event.
///
/// `z` toggles yaw; `q`, `quit` and `esc` quit. Matching ignores case and
/// surrounding whitespace.
pub fn parse_command(line: &str) -> Option<ViewerEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "z" => Some(ViewerEvent::ToggleYaw),
        "q" | "quit" | "esc" => Some(ViewerEvent::Quit),
        _ => None,
    }
}

/// Create the event channel
pub fn event_channel() -> (Sender<ViewerEvent>, Receiver<ViewerEvent>) {
    unbounded()
}

/// Spawn a thread reading commands from `reader` until end of input, or
/// until the receiving side hangs up.
pub fn spawn_event_reader<R>(reader: R, tx: Sender<ViewerEvent>) -> Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("input-reader".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else {
                    log::warn!("Input reader stopped: unreadable input");
                    break;
                };
                let Some(event) = parse_command(&line) else {
                    if !line.trim().is_empty() {
                        log::info!("Unknown command {:?} (z = toggle yaw, q = quit)", line.trim());
                    }
                    continue;
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
            log::debug!("Input reader exiting");
        })
        .map_err(|e| Error::Other(format!("Failed to spawn input reader: {}", e)))
}
