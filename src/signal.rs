//! Ctrl-C handling for the viewer.
//!
//! The first Ctrl-C clears the viewer's running flag: the loop finishes its
//! tick, logs the final estimate and releases the port. A second Ctrl-C
//! during that shutdown exits the process at once.

use crate::error::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exit status when a repeated Ctrl-C forces the process down
pub const FORCED_EXIT_CODE: i32 = 130;

/// Clear `running`. Returns `true` for the first stop request, `false` if the
/// flag was already cleared (by Ctrl-C or by a quit command).
pub fn request_stop(running: &AtomicBool) -> bool {
    running.swap(false, Ordering::Relaxed)
}

/// Install the process Ctrl-C handler for the viewer's `running` flag.
///
/// Can only be called once per process.
pub fn install_stop_handler(running: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        if request_stop(&running) {
            log::info!("Ctrl-C: stopping viewer (press again to force exit)");
        } else {
            log::warn!("Ctrl-C during shutdown: exiting immediately");
            std::process::exit(FORCED_EXIT_CODE);
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_stops() {
        let running = AtomicBool::new(true);
        assert!(request_stop(&running));
        assert!(!running.load(Ordering::Relaxed));
    }

    #[test]
    fn test_repeat_request_is_reported() {
        let running = AtomicBool::new(true);
        request_stop(&running);
        assert!(!request_stop(&running));
    }

    #[test]
    fn test_quit_then_interrupt_is_repeat() {
        // A quit command clears the same flag the handler watches
        let running = AtomicBool::new(true);
        running.store(false, Ordering::Relaxed);
        assert!(!request_stop(&running));
    }
}
