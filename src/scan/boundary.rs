use crate::format::{RecordFormat, QUALITY_SENTINEL};

use super::lines::{line_end, next_line_start};

/// Outcome of a boundary search over a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// A record starts at this offset
    Found(usize),

    /// Undecided until more bytes arrive
    ///
    /// Nothing before the given offset can start a record, so the next search may resume
    /// there (with the byte before it kept as lookbehind).
    Pending(usize),

    /// The stream ended without another record start
    End,
}

/// Whether a sentinel at a line start really opens a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Record,
    NotRecord,
    Undecided,
}

/// Finds the earliest legal record start at or after `from`
///
/// Candidates are sentinels at the start of a line. For FASTA every candidate is a record.
/// For FASTQ a candidate is only accepted if the line two lines below it begins with `+`,
/// which rejects quality lines that happen to begin with `@`.
///
/// `eof` tells the scanner that no more bytes follow the buffer.
#[must_use]
pub fn find_boundary(buf: &[u8], from: usize, format: RecordFormat, eof: bool) -> Scan {
    let sentinel = format.sentinel();
    let mut pos = from;
    while let Some(candidate) = next_line_start(buf, pos, sentinel) {
        match verify(buf, candidate, format, eof) {
            Verdict::Record => return Scan::Found(candidate),
            Verdict::NotRecord => pos = candidate + 1,
            Verdict::Undecided if eof => return Scan::End,
            Verdict::Undecided => return Scan::Pending(candidate),
        }
    }
    if eof {
        Scan::End
    } else {
        Scan::Pending(buf.len().max(from))
    }
}

fn verify(buf: &[u8], candidate: usize, format: RecordFormat, eof: bool) -> Verdict {
    match format {
        RecordFormat::Fasta => Verdict::Record,
        RecordFormat::Fastq => {
            let Some(header_end) = line_end(buf, candidate, eof) else {
                return Verdict::Undecided;
            };
            let Some(sequence_end) = line_end(buf, header_end, eof) else {
                return Verdict::Undecided;
            };
            match buf.get(sequence_end) {
                Some(&QUALITY_SENTINEL) => Verdict::Record,
                Some(_) => Verdict::NotRecord,
                None => Verdict::Undecided,
            }
        }
    }
}
