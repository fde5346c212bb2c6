//! Sample sources polled once per viewer tick.

use super::line_buffer::LineBuffer;
use super::parser::parse_sample;
use crate::core::types::Sample;
use crate::error::Result;
use crate::transport::Transport;

/// Extra reads allowed per poll while the transport reports pending bytes.
const MAX_DRAIN_READS: usize = 8;

/// Producer of zero or one sample per poll.
pub trait SampleSource {
    /// Poll for the next sample.
    ///
    /// `Ok(None)` is the normal "no sample this tick" answer, including for
    /// malformed or partial input. `Err` is reserved for transport failures.
    fn try_read(&mut self) -> Result<Option<Sample>>;

    /// True once the source can never yield another sample
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Per-source line counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Complete lines taken from the stream
    pub lines: u64,
    /// Lines that decoded into a sample
    pub samples: u64,
    /// Lines discarded as malformed
    pub malformed: u64,
}

/// Line-oriented sample source over any [`Transport`].
///
/// Each poll consumes at most one line. The transport is only read when no
/// complete line is already buffered, so a backlog drains one line per tick.
pub struct LineSampleSource<T: Transport> {
    transport: T,
    lines: LineBuffer,
    stats: SourceStats,
}

impl<T: Transport> LineSampleSource<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            lines: LineBuffer::new(),
            stats: SourceStats::default(),
        }
    }

    pub fn stats(&self) -> SourceStats {
        self.stats
    }

    /// Bytes discarded because no newline arrived in time
    pub fn dropped_bytes(&self) -> u64 {
        self.lines.dropped_bytes()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give the transport back, dropping any buffered partial line
    pub fn into_inner(self) -> T {
        self.transport
    }

    fn fill(&mut self) -> Result<()> {
        let mut chunk = [0u8; 256];

        let n = self.transport.read(&mut chunk)?;
        self.lines.extend(&chunk[..n]);

        for _ in 0..MAX_DRAIN_READS {
            if self.lines.has_line() || self.transport.available()? == 0 {
                break;
            }
            let n = self.transport.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            self.lines.extend(&chunk[..n]);
        }
        Ok(())
    }
}

impl<T: Transport> SampleSource for LineSampleSource<T> {
    fn try_read(&mut self) -> Result<Option<Sample>> {
        if !self.lines.has_line() {
            self.fill()?;
        }

        let Some(line) = self.lines.next_line() else {
            return Ok(None);
        };
        self.stats.lines += 1;

        match parse_sample(&line) {
            Some(sample) => {
                self.stats.samples += 1;
                Ok(Some(sample))
            }
            None => {
                self.stats.malformed += 1;
                log::debug!("Discarding malformed line: {:?}", line);
                Ok(None)
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.transport.is_closed() && !self.lines.has_line()
    }
}
