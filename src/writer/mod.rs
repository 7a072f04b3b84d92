//! Output routing
//!
//! Sinks receive the bytes of emitted chunks and nothing else. They do not interpret the
//! records they carry, with the exception of [`Deinterleaver`], which only counts lines.

mod deinterleave;
mod sink;

pub use deinterleave::Deinterleaver;
pub use sink::{split_files, split_paired_files, ChunkSink, PairedSink, SingleSink, SplitSink};
