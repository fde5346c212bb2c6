//! Replay transport for recorded captures

use super::Transport;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Reads a recorded byte stream, e.g. a file of captured sample lines.
///
/// End of input reads as zero bytes and marks the transport closed.
pub struct ReplayTransport<R> {
    reader: R,
    finished: bool,
}

impl ReplayTransport<BufReader<File>> {
    /// Open a capture file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        log::info!("Replaying capture: {}", path.as_ref().display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> ReplayTransport<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            finished: false,
        }
    }
}

impl<R: Read + Send> Transport for ReplayTransport<R> {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        if self.finished || buffer.is_empty() {
            return Ok(0);
        }
        loop {
            match self.reader.read(buffer) {
                Ok(0) => {
                    self.finished = true;
                    return Ok(0);
                }
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.finished
    }
}
