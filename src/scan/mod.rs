//! Record boundary discovery
//!
//! The functions here operate on in-memory buffers and never touch a stream. A buffer handed
//! to them is a window onto the input: offsets are relative to the buffer, and the caller
//! tells them whether the stream ends where the buffer ends.

mod boundary;
mod lines;
mod pair;

pub use boundary::{find_boundary, Scan};
pub use pair::{sync_pair, PairScan};

use crate::format::RecordFormat;

/// Finds the next chunk boundary at or after `from`
///
/// This is [`find_boundary`] followed, for interleaved input, by [`sync_pair`] so that the
/// boundary never separates two mates.
#[must_use]
pub fn locate(buf: &[u8], from: usize, format: RecordFormat, interleaved: bool, eof: bool) -> Scan {
    match find_boundary(buf, from, format, eof) {
        Scan::Found(candidate) if interleaved => match sync_pair(buf, candidate, eof) {
            PairScan::Boundary(boundary) => Scan::Found(boundary),
            PairScan::Pending => Scan::Pending(candidate),
            PairScan::End => Scan::End,
        },
        scan => scan,
    }
}
