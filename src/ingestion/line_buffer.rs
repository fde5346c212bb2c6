//! Newline framing for text sample streams.

/// Pending bytes allowed without a newline before they are discarded.
pub const MAX_PENDING_BYTES: usize = 1024;

/// Accumulates raw bytes and yields complete lines.
///
/// Lines are split on `\n`; `\r` and surrounding whitespace are trimmed.
/// A line that is not valid UTF-8 comes back empty so it parses as no sample.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
    dropped_bytes: u64,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append received bytes.
    ///
    /// If no newline has been seen within [`MAX_PENDING_BYTES`], the
    /// unterminated data is discarded.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);

        if self.pending.len() > MAX_PENDING_BYTES && !self.pending.contains(&b'\n') {
            self.dropped_bytes += self.pending.len() as u64;
            self.pending.clear();
        }
    }

    /// True if a complete line is buffered
    #[inline]
    pub fn has_line(&self) -> bool {
        self.pending.contains(&b'\n')
    }

    /// Pop the oldest complete line.
    pub fn next_line(&mut self) -> Option<String> {
        let newline = self.pending.iter().position(|&b| b == b'\n')?;
        let raw: Vec<u8> = self.pending.drain(..=newline).collect();

        Some(match std::str::from_utf8(&raw[..newline]) {
            Ok(text) => text.trim().to_string(),
            Err(_) => String::new(),
        })
    }

    /// Bytes buffered after the last complete line
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Total bytes discarded for lack of a newline
    pub fn dropped_bytes(&self) -> u64 {
        self.dropped_bytes
    }
}
