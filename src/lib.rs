//! Record-aligned chunking of FASTA and FASTQ files
//!
//! An input is cut every `stride` bytes, and each cut is moved forward to the next record
//! start, so every chunk holds whole records and the chunks concatenate back to the input.
//! Interleaved paired-end FASTQ can be cut without separating mates.

mod chunker;
mod error;
mod format;
mod plan;
pub mod reader;
mod record;
pub mod scan;
pub mod writer;

#[cfg(test)]
mod fixtures;

pub use chunker::{ChunkSummary, Chunker};
pub use error::{ConfigError, Error, FormatError, ReadError, Result};
pub use format::{RecordFormat, FASTA_SENTINEL, FASTQ_SENTINEL};
pub use plan::{
    ChunkPlan, ChunkPlanBuilder, ChunkTarget, Decision, Layout, Strider, DEFAULT_MARGIN,
    DEFAULT_STREAM_STRIDE,
};
pub use reader::{Interleave, PipeSource, SeekSource, Source, DEFAULT_BUFFER_CAPACITY};
pub use record::{Mate, RecordIdentity};
pub use writer::{ChunkSink, PairedSink, SingleSink, SplitSink};

#[cfg(test)]
mod testing {
    use std::io::Cursor;

    use super::*;
    use anyhow::Result;

    const READS: &[u8] = b"@a/1\nACGT\n+\n@III\n@a/2\nTTGA\n+\nIIII\n@b/1\nGGCA\n+\nIII@\n@b/2\nCATG\n+\n+III\n";

    #[test]
    fn test_chunk_interleaved_stream() -> Result<()> {
        let plan = ChunkPlan::builder().bytes(20).interleaved(true).build()?;
        let chunker = Chunker::new(plan);

        let mut sink = SingleSink::new(Vec::new());
        let summary = chunker.process(PipeSource::new(READS), &mut sink)?;
        assert_eq!(summary.emitted, 2);
        assert_eq!(summary.total_chunks, None);
        assert_eq!(sink.into_inner(), READS);
        Ok(())
    }

    #[test]
    fn test_chunks_hold_whole_pairs() -> Result<()> {
        let plan = ChunkPlan::builder().bytes(20).interleaved(true).first(2).build()?;
        let chunker = Chunker::new(plan);

        let mut sink = SingleSink::new(Vec::new());
        let summary = chunker.process(SeekSource::new(Cursor::new(READS.to_vec()))?, &mut sink)?;
        assert_eq!(summary.emitted, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(sink.into_inner(), &READS[34..]);
        Ok(())
    }

    #[test]
    fn test_identity() {
        let id = RecordIdentity::parse(b"@b/2 sample=1");
        assert_eq!(id.mate(), Some(Mate::Second));
        assert!(id.same_fragment(&RecordIdentity::parse(b"@b/1")));
    }
}
