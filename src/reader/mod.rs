//! Input streams
//!
//! A [`Source`] is the only thing the chunker reads from. Files are memory mapped and seek
//! when skipping; pipes drain. [`Window`] holds the bytes read ahead of the current chunk.

mod interleave;
mod source;
mod window;

pub use interleave::Interleave;
pub use source::{MappedFile, PipeSource, SeekSource, Source};
pub use window::{Window, DEFAULT_BUFFER_CAPACITY};
