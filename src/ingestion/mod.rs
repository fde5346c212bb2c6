//! Sample ingestion.
//!
//! Turns a byte stream into at most one [`Sample`](crate::Sample) per poll.
//! Malformed input never surfaces as an error: it is simply no sample.

mod line_buffer;
mod parser;
mod source;

pub use line_buffer::{LineBuffer, MAX_PENDING_BYTES};
pub use parser::{FIELD_SEPARATORS, parse_sample};
pub use source::{LineSampleSource, SampleSource, SourceStats};
