use crate::format::{FASTQ_LINES, FASTQ_SENTINEL};
use crate::record::RecordIdentity;

use super::lines::{line_end, skip_lines};

/// Outcome of synchronizing a boundary with mate pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairScan {
    /// The boundary that keeps mates together
    Boundary(usize),

    /// Both records must be in the buffer before deciding
    Pending,

    /// The candidate is the last record of the stream and stays with the closing chunk
    End,
}

/// Moves a FASTQ record boundary so it never separates two mates
///
/// `start` must be a verified record start. The record at `start` is compared with the record
/// right after it:
/// * same fragment: they form a pair and the boundary stays at `start`
/// * different fragments: the record at `start` closes a pair that began earlier (or is a
///   single), so the boundary moves past it
#[must_use]
pub fn sync_pair(buf: &[u8], start: usize, eof: bool) -> PairScan {
    let Some(next) = skip_lines(buf, start, FASTQ_LINES, eof) else {
        return if eof { PairScan::End } else { PairScan::Pending };
    };
    if next >= buf.len() {
        return if eof { PairScan::End } else { PairScan::Pending };
    }
    if buf[next] != FASTQ_SENTINEL {
        return PairScan::Boundary(next);
    }
    let Some(next_header_end) = line_end(buf, next, eof) else {
        return PairScan::Pending;
    };

    let Some(header_end) = line_end(buf, start, eof) else {
        return PairScan::Pending;
    };
    let current = RecordIdentity::parse(&buf[start..header_end]);
    let following = RecordIdentity::parse(&buf[next..next_header_end]);
    if current.same_fragment(&following) {
        PairScan::Boundary(start)
    } else {
        PairScan::Boundary(next)
    }
}
