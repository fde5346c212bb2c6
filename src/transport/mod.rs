//! Transport layer for I/O abstraction
//!
//! Byte sources the sample ingestion reads from: a live serial port, a
//! recorded capture, or an in-memory buffer for tests (`mock` feature).

use crate::error::Result;

#[cfg(any(test, feature = "mock"))]
mod mock;
mod replay;
mod serial;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use replay::ReplayTransport;
pub use serial::SerialTransport;

/// Transport trait for sample streams
pub trait Transport: Send {
    /// Read data into buffer, returns number of bytes read.
    ///
    /// Must return within a small bounded time; `Ok(0)` means nothing arrived.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Number of bytes that can be read without waiting
    fn available(&mut self) -> Result<usize> {
        Ok(0) // Default implementation
    }

    /// True once the transport can never produce more bytes
    fn is_closed(&self) -> bool {
        false
    }
}
