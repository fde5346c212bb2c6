//! Mock transport for testing

use super::Transport;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory transport; clones share the same buffer so a test can keep
/// injecting bytes after handing the transport to a sample source.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

struct MockTransportInner {
    read_buffer: VecDeque<u8>,
    pending_error: Option<std::io::ErrorKind>,
    closed: bool,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        MockTransport {
            inner: Arc::new(Mutex::new(MockTransportInner {
                read_buffer: VecDeque::new(),
                pending_error: None,
                closed: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockTransportInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inject data to be read
    pub fn inject_read(&self, data: &[u8]) {
        self.lock().read_buffer.extend(data);
    }

    /// Inject a line, appending the newline terminator
    pub fn inject_line(&self, line: &str) {
        let mut inner = self.lock();
        inner.read_buffer.extend(line.as_bytes());
        inner.read_buffer.push_back(b'\n');
    }

    /// Make the next read fail with an I/O error of `kind`
    pub fn fail_next_read(&self, kind: std::io::ErrorKind) {
        self.lock().pending_error = Some(kind);
    }

    /// Mark the stream as ended
    pub fn close(&self) {
        self.lock().closed = true;
    }

    /// Bytes not yet read
    pub fn pending(&self) -> usize {
        self.lock().read_buffer.len()
    }

    /// Clear read buffer
    pub fn clear_read(&self) {
        self.lock().read_buffer.clear();
    }
}

impl Transport for MockTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut inner = self.lock();
        if let Some(kind) = inner.pending_error.take() {
            return Err(Error::Io(std::io::Error::new(kind, "injected failure")));
        }

        let available = inner.read_buffer.len().min(buffer.len());
        for (slot, byte) in buffer.iter_mut().zip(inner.read_buffer.drain(..available)) {
            *slot = byte;
        }
        Ok(available)
    }

    fn available(&mut self) -> Result<usize> {
        Ok(self.lock().read_buffer.len())
    }

    fn is_closed(&self) -> bool {
        let inner = self.lock();
        inner.closed && inner.read_buffer.is_empty()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_and_read_partially() {
        let mut transport = MockTransport::new();
        transport.inject_read(b"abcdef");

        let mut buf = [0u8; 4];
        assert_eq!(transport.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(transport.available().unwrap(), 2);
        assert_eq!(transport.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(transport.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_clones_share_buffer() {
        let mut reader = MockTransport::new();
        let writer = reader.clone();
        writer.inject_line("x");
        assert_eq!(writer.pending(), 2);

        let mut buf = [0u8; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"x\n");

        writer.inject_read(b"yz");
        writer.clear_read();
        assert_eq!(reader.available().unwrap(), 0);
    }

    #[test]
    fn test_injected_error_fires_once() {
        let mut transport = MockTransport::new();
        transport.fail_next_read(std::io::ErrorKind::BrokenPipe);

        let mut buf = [0u8; 4];
        assert!(matches!(transport.read(&mut buf), Err(Error::Io(_))));
        assert_eq!(transport.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_closed_only_after_drained() {
        let mut transport = MockTransport::new();
        transport.inject_read(b"ab");
        transport.close();
        assert!(!transport.is_closed());

        let mut buf = [0u8; 4];
        transport.read(&mut buf).unwrap();
        assert!(transport.is_closed());
    }
}
