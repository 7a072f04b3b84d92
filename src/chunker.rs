//! Chunk extraction
//!
//! The [`Chunker`] walks an input once, front to back. For every chunk index it asks the
//! [`Strider`] whether to emit or skip, moves the stream to one byte before the chunk's search
//! start, and lets the scanner find the record that opens the next chunk. Emitted bytes go to a
//! [`ChunkSink`]; skipped bytes are sought over or drained.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info, info_span, warn};

use crate::error::{ConfigError, Result};
use crate::format::RecordFormat;
use crate::plan::{ChunkPlan, Decision, Layout, Strider};
use crate::reader::{
    Interleave, PipeSource, SeekSource, Source, Window, DEFAULT_BUFFER_CAPACITY,
};
use crate::scan::{locate, Scan};
use crate::writer::ChunkSink;

/// What happened to one input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkSummary {
    /// Detected record format, `None` for an empty input
    pub format: Option<RecordFormat>,

    /// Planned chunk size in bytes
    pub stride: u64,

    /// Planned number of chunks, if the input size was known
    pub total_chunks: Option<u64>,

    /// Chunks written to the sink
    pub emitted: u64,

    /// Chunks passed over
    pub skipped: u64,

    /// Bytes written to the sink
    pub bytes_emitted: u64,
}

/// Splits FASTA and FASTQ inputs into record-aligned chunks
///
/// # Examples
///
/// ```
/// # use std::io::Cursor;
/// # use seqchunk::{ChunkPlan, Chunker, Result, SeekSource, SingleSink};
/// # fn main() -> Result<()> {
/// let input = b"@r1\nACGT\n+\nIIII\n@r2\nGGCC\n+\nIIII\n@r3\nTTAA\n+\nIIII\n".to_vec();
///
/// // keep only the second of every two chunks
/// let plan = ChunkPlan::builder().bytes(16).first(2).step(2).step_count(1).build()?;
/// let chunker = Chunker::new(plan);
///
/// let mut sink = SingleSink::new(Vec::new());
/// let summary = chunker.process(SeekSource::new(Cursor::new(input))?, &mut sink)?;
/// assert_eq!(summary.emitted, 1);
/// assert_eq!(sink.into_inner(), b"@r2\nGGCC\n+\nIIII\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    plan: ChunkPlan,

    /// Bytes requested from a source per read
    capacity: usize,
}
impl Chunker {
    #[must_use]
    pub fn new(plan: ChunkPlan) -> Self {
        Self::with_capacity(plan, DEFAULT_BUFFER_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(plan: ChunkPlan, capacity: usize) -> Self {
        Self { plan, capacity }
    }

    #[must_use]
    pub fn plan(&self) -> &ChunkPlan {
        &self.plan
    }

    /// Chunks one input into `sink`
    ///
    /// The input starts at the source's current position. An empty input is not an error: it
    /// is logged and yields a summary with no chunks.
    pub fn process<S, K>(&self, source: S, sink: &mut K) -> Result<ChunkSummary>
    where
        S: Source,
        K: ChunkSink + ?Sized,
    {
        let mut window = Window::with_capacity(source, self.capacity);
        let Some(first) = window.peek()? else {
            warn!("Input is empty, no chunks extracted");
            return Ok(ChunkSummary::default());
        };
        let format = RecordFormat::sniff(first)?;
        if self.plan.interleaved() {
            format.check_interleaved()?;
        }

        let origin = window.start();
        let size = window
            .source()
            .known_len()
            .map(|len| len.saturating_sub(origin));
        let layout = self.plan.layout(size)?;
        let strider = self.plan.strider(layout.total_chunks);
        debug!(
            %format,
            stride = layout.stride,
            total_chunks = ?layout.total_chunks,
            seekable = window.source().is_seekable(),
            "Planned input"
        );

        let mut run = Run {
            window,
            format,
            layout,
            interleaved: self.plan.interleaved(),
            margin: self.plan.margin(),
            origin,
            boundary: origin,
        };
        let summary = run.drive(&strider, sink)?;
        info!(
            %format,
            stride = summary.stride,
            emitted = summary.emitted,
            skipped = summary.skipped,
            bytes = summary.bytes_emitted,
            "Chunked input"
        );
        Ok(summary)
    }

    /// Chunks a file, memory mapping it for reading
    pub fn process_path<P, K>(&self, path: P, sink: &mut K) -> Result<ChunkSummary>
    where
        P: AsRef<Path>,
        K: ChunkSink + ?Sized,
    {
        let path = path.as_ref();
        let _span = info_span!("input", path = %path.display()).entered();
        self.process(SeekSource::open(path)?, sink)
    }

    /// Chunks two mate files as one interleaved FASTQ stream
    ///
    /// Records are alternated in process, so the stream cannot seek and skipped chunks are
    /// drained. The chunk layout is planned from the combined size of both files. Use an
    /// interleaved plan to keep mates in the same chunk.
    pub fn process_pair<P1, P2, K>(
        &self,
        first: P1,
        second: P2,
        sink: &mut K,
    ) -> Result<ChunkSummary>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
        K: ChunkSink + ?Sized,
    {
        let (first, second) = (first.as_ref(), second.as_ref());
        let _span = info_span!(
            "pair",
            first = %first.display(),
            second = %second.display()
        )
        .entered();

        let len = fs::metadata(first)?.len() + fs::metadata(second)?.len();
        let reader = Interleave::new(
            BufReader::new(File::open(first)?),
            BufReader::new(File::open(second)?),
        );
        self.process(PipeSource::with_len(reader, len), sink)
    }

    /// Chunks a list of files one after another into the same sink
    ///
    /// Every input gets its own layout. The first error aborts the whole list.
    pub fn process_paths<I, P, K>(&self, paths: I, sink: &mut K) -> Result<Vec<ChunkSummary>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        K: ChunkSink + ?Sized,
    {
        paths
            .into_iter()
            .map(|path| self.process_path(path, &mut *sink))
            .collect()
    }
}

/// Bytes that passed through one chunk
struct Extent {
    /// Start of the next chunk, `None` once the stream is done
    boundary: Option<u64>,

    /// Bytes written to the sink
    written: u64,
}

/// Per-input chunking state
struct Run<S: Source> {
    window: Window<S>,
    format: RecordFormat,
    layout: Layout,
    interleaved: bool,
    margin: u64,

    /// Absolute offset of the first byte of the input
    origin: u64,

    /// Absolute offset where the current chunk starts
    boundary: u64,
}
impl<S: Source> Run<S> {
    fn drive<K: ChunkSink + ?Sized>(
        &mut self,
        strider: &Strider,
        sink: &mut K,
    ) -> Result<ChunkSummary> {
        let mut summary = ChunkSummary {
            format: Some(self.format),
            stride: self.layout.stride,
            total_chunks: self.layout.total_chunks,
            ..ChunkSummary::default()
        };

        for index in 1u64.. {
            let decision = strider.decide(index);
            if decision == Decision::Stop || self.window.peek()?.is_none() {
                break;
            }
            let emit = decision == Decision::Emit;
            let start = self.boundary;

            if emit {
                sink.open(index)?;
            }
            let extent = self.extract(index, sink, emit)?;
            if emit {
                sink.close(index)?;
                summary.emitted += 1;
                summary.bytes_emitted += extent.written;
            } else {
                summary.skipped += 1;
            }
            debug!(
                chunk = index,
                ?decision,
                start = start - self.origin,
                boundary = ?extent.boundary.map(|b| b - self.origin),
                bytes = extent.written,
                "Closed chunk"
            );

            match extent.boundary {
                Some(boundary) => self.boundary = boundary,
                None => break,
            }
        }
        Ok(summary)
    }

    /// Moves the stream to the end of chunk `index`, writing its bytes if `emit` is set
    fn extract<K: ChunkSink + ?Sized>(
        &mut self,
        index: u64,
        sink: &mut K,
        emit: bool,
    ) -> Result<Extent> {
        if self.layout.is_final(index) {
            let written = self.advance_to(u64::MAX, sink, emit)?;
            return Ok(Extent {
                boundary: None,
                written,
            });
        }

        let search = self
            .origin
            .saturating_add(self.layout.search_start(index, self.margin));
        if self.boundary >= search {
            return Err(ConfigError::StrideTooSmall {
                chunk: index,
                boundary: self.boundary - self.origin,
                edge: search - self.origin,
            }
            .into());
        }

        // keep the byte before the search start so its line start can be tested
        let mut written = self.advance_to(search - 1, sink, emit)?;
        let mut from = 1;
        loop {
            if self.window.len() <= from && !self.window.is_eof() {
                self.window.fill()?;
                continue;
            }
            let scan = locate(
                self.window.bytes(),
                from,
                self.format,
                self.interleaved,
                self.window.is_eof(),
            );
            match scan {
                Scan::Found(offset) => {
                    let boundary = self.window.start() + offset as u64;
                    written += self.advance_to(boundary, sink, emit)?;
                    return Ok(Extent {
                        boundary: Some(boundary),
                        written,
                    });
                }
                Scan::End => {
                    written += self.advance_to(u64::MAX, sink, emit)?;
                    return Ok(Extent {
                        boundary: None,
                        written,
                    });
                }
                Scan::Pending(resume) => {
                    let keep = self.window.start() + resume as u64 - 1;
                    written += self.advance_to(keep, sink, emit)?;
                    from = 1;
                    self.window.fill()?;
                }
            }
        }
    }

    /// Emits or discards everything before `target`, returning the bytes emitted
    fn advance_to<K: ChunkSink + ?Sized>(
        &mut self,
        target: u64,
        sink: &mut K,
        emit: bool,
    ) -> Result<u64> {
        if emit {
            Ok(self.window.copy_to(target, sink)?)
        } else if target == u64::MAX {
            // nothing after a skipped final chunk is needed
            Ok(0)
        } else {
            self.window.skip_to(target)?;
            Ok(0)
        }
    }
}
