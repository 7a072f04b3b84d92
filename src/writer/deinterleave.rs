use std::io::{self, Write};

use memchr::memchr;

use crate::format::FASTQ_LINES;

/// Routes interleaved FASTQ records alternately to two writers
///
/// Every four lines the output switches sides, starting with side one. Bytes are forwarded as
/// they arrive; nothing is held back waiting for a record to complete.
#[derive(Debug)]
pub struct Deinterleaver<W1: Write, W2: Write> {
    first: W1,
    second: W2,

    /// Completed lines of the current record
    line: usize,

    /// The current record goes to the second writer
    on_second: bool,
}
impl<W1: Write, W2: Write> Deinterleaver<W1, W2> {
    pub fn new(first: W1, second: W2) -> Self {
        Self {
            first,
            second,
            line: 0,
            on_second: false,
        }
    }

    pub fn into_inner(self) -> (W1, W2) {
        (self.first, self.second)
    }
}
impl<W1: Write, W2: Write> Write for Deinterleaver<W1, W2> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut rest = buf;
        while !rest.is_empty() {
            let (segment, line_done) = match memchr(b'\n', rest) {
                Some(i) => (&rest[..=i], true),
                None => (rest, false),
            };
            if self.on_second {
                self.second.write_all(segment)?;
            } else {
                self.first.write_all(segment)?;
            }
            if line_done {
                self.line += 1;
                if self.line == FASTQ_LINES {
                    self.line = 0;
                    self.on_second = !self.on_second;
                }
            }
            rest = &rest[segment.len()..];
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}
