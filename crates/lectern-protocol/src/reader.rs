//! Bounded line framing over a buffered input stream.
//!
//! Splits the incoming byte stream into request lines in arrival order. A
//! line longer than the configured bound is consumed to its delimiter so
//! the stream stays framed, but its payload is discarded and only the
//! observed size is reported.

use std::io::{self, BufRead};

/// Maximum size of a single request line in bytes.
pub const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// One framed line from the input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestLine {
    /// A complete line within the size bound, delimiter excluded.
    Complete(Vec<u8>),
    /// A line that exceeded the size bound.
    Oversized {
        /// Observed size of the discarded line in bytes.
        size: usize,
    },
}

/// Reads newline-delimited request lines with a size bound.
///
/// A final line terminated by end-of-input rather than a newline is still a
/// complete line.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    max_bytes: usize,
}

impl<R: BufRead> LineReader<R> {
    /// Creates a reader bounded by [`MAX_REQUEST_BYTES`].
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self::with_limit(reader, MAX_REQUEST_BYTES)
    }

    /// Creates a reader with an explicit line-size bound.
    #[must_use]
    pub const fn with_limit(reader: R, max_bytes: usize) -> Self {
        Self { reader, max_bytes }
    }

    /// Size bound applied to each line.
    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Produces the next line, or `None` once the input is exhausted.
    ///
    /// Reads are retried on interruption.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the stream fails mid-line.
    pub fn next_line(&mut self) -> io::Result<Option<RequestLine>> {
        let mut accumulator = LineAccumulator::new(self.max_bytes);

        loop {
            let (used, finished) = {
                let available = match self.reader.fill_buf() {
                    Ok(chunk) => chunk,
                    Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                    Err(error) => return Err(error),
                };
                if available.is_empty() {
                    if accumulator.is_empty() {
                        return Ok(None);
                    }
                    break;
                }
                let mut segments = available.splitn(2, |byte| *byte == b'\n');
                let head = segments.next().unwrap_or_default();
                accumulator.push(head);
                match segments.next() {
                    Some(_) => (head.len() + 1, true),
                    None => (head.len(), false),
                }
            };
            self.reader.consume(used);
            if finished {
                break;
            }
        }

        Ok(Some(accumulator.finish()))
    }
}

/// Collects line content while enforcing the size bound.
///
/// Once the bound is crossed the buffered prefix is dropped and only the
/// running size is tracked, so a hostile line cannot grow the buffer.
struct LineAccumulator {
    buffer: Vec<u8>,
    observed: usize,
    max_bytes: usize,
    overflowed: bool,
}

impl LineAccumulator {
    const fn new(max_bytes: usize) -> Self {
        Self {
            buffer: Vec::new(),
            observed: 0,
            max_bytes,
            overflowed: false,
        }
    }

    fn push(&mut self, content: &[u8]) {
        self.observed += content.len();
        if self.overflowed || self.observed > self.max_bytes {
            self.overflowed = true;
            self.buffer.clear();
        } else {
            self.buffer.extend_from_slice(content);
        }
    }

    fn is_empty(&self) -> bool {
        self.observed == 0
    }

    fn finish(self) -> RequestLine {
        if self.overflowed {
            RequestLine::Oversized {
                size: self.observed,
            }
        } else {
            RequestLine::Complete(self.buffer)
        }
    }
}
