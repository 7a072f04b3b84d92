use std::io::{self, BufRead, Read};

use crate::format::FASTQ_LINES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    First,
    Second,
}

/// Alternates whole FASTQ records from two mate streams into one interleaved stream
///
/// Records are taken one at a time from each side in turn. Once one side runs out, the
/// remaining records of the other side follow unpaired. A final line without a newline gets
/// one, so records from the two sides never run together.
///
/// The result cannot seek; wrap it in a [`PipeSource`](crate::PipeSource).
#[derive(Debug)]
pub struct Interleave<R1: BufRead, R2: BufRead> {
    first: R1,
    second: R2,

    /// Current record, served out by `read`
    record: Vec<u8>,

    /// Bytes of `record` already served
    pos: usize,

    /// Side the next record comes from
    side: Side,
}
impl<R1: BufRead, R2: BufRead> Interleave<R1, R2> {
    pub fn new(first: R1, second: R2) -> Self {
        Self {
            first,
            second,
            record: Vec::new(),
            pos: 0,
            side: Side::First,
        }
    }

    fn next_record(&mut self) -> io::Result<bool> {
        self.record.clear();
        self.pos = 0;
        for _ in 0..2 {
            let side = self.side;
            self.side = match side {
                Side::First => Side::Second,
                Side::Second => Side::First,
            };
            let found = match side {
                Side::First => read_record(&mut self.first, &mut self.record)?,
                Side::Second => read_record(&mut self.second, &mut self.record)?,
            };
            if found {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
impl<R1: BufRead, R2: BufRead> Read for Interleave<R1, R2> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.record.len() && !self.next_record()? {
            return Ok(0);
        }
        let n = buf.len().min(self.record.len() - self.pos);
        buf[..n].copy_from_slice(&self.record[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Appends one FASTQ record from `reader` to `out`, returning false at end of stream
fn read_record<R: BufRead>(reader: &mut R, out: &mut Vec<u8>) -> io::Result<bool> {
    let mut lines = 0;
    while lines < FASTQ_LINES {
        if reader.read_until(b'\n', out)? == 0 {
            break;
        }
        if out.last() != Some(&b'\n') {
            out.push(b'\n');
        }
        lines += 1;
    }
    Ok(lines > 0)
}
