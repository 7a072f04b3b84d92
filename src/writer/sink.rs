use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use auto_impl::auto_impl;

use super::Deinterleaver;

/// Destination for emitted chunks
///
/// The chunker calls `open` before the first byte of a chunk, `write_all` for its bytes in
/// order, and `close` once the chunk is complete. Sinks never see skipped chunks.
#[auto_impl(&mut, Box)]
pub trait ChunkSink {
    /// Prepares a destination for chunk `index` (1-based)
    fn open(&mut self, index: u64) -> io::Result<()>;

    /// Writes the next bytes of the open chunk
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Finishes chunk `index`
    fn close(&mut self, index: u64) -> io::Result<()>;
}

fn no_open_chunk() -> io::Error {
    io::Error::other("no chunk destination is open")
}

/// Writes every emitted chunk into one continuous stream
///
/// Reusing the sink across inputs concatenates their chunks.
#[derive(Debug)]
pub struct SingleSink<W: Write> {
    inner: W,
}
impl<W: Write> SingleSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn by_ref(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
impl<W: Write> ChunkSink for SingleSink<W> {
    fn open(&mut self, _index: u64) -> io::Result<()> {
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }

    fn close(&mut self, _index: u64) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Writes each emitted chunk to its own destination
///
/// The destination is created by `open_chunk` from the chunk index and dropped once the chunk
/// is closed.
pub struct SplitSink<F, W>
where
    F: FnMut(u64) -> io::Result<W>,
    W: Write,
{
    open_chunk: F,
    current: Option<W>,
    opened: u64,
}
impl<F, W> SplitSink<F, W>
where
    F: FnMut(u64) -> io::Result<W>,
    W: Write,
{
    pub fn new(open_chunk: F) -> Self {
        Self {
            open_chunk,
            current: None,
            opened: 0,
        }
    }

    /// Number of destinations opened so far
    #[must_use]
    pub fn opened(&self) -> u64 {
        self.opened
    }
}
impl<F, W> ChunkSink for SplitSink<F, W>
where
    F: FnMut(u64) -> io::Result<W>,
    W: Write,
{
    fn open(&mut self, index: u64) -> io::Result<()> {
        self.current = Some((self.open_chunk)(index)?);
        self.opened += 1;
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.current
            .as_mut()
            .ok_or_else(no_open_chunk)?
            .write_all(bytes)
    }

    fn close(&mut self, _index: u64) -> io::Result<()> {
        match self.current.take() {
            Some(mut writer) => writer.flush(),
            None => Err(no_open_chunk()),
        }
    }
}

/// Splits chunks into files named by `naming`
pub fn split_files<N>(
    mut naming: N,
) -> SplitSink<impl FnMut(u64) -> io::Result<BufWriter<File>>, BufWriter<File>>
where
    N: FnMut(u64) -> PathBuf,
{
    SplitSink::new(move |index| File::create(naming(index)).map(BufWriter::new))
}

/// Writes each emitted chunk of interleaved FASTQ to a pair of destinations
///
/// Records alternate between side one and side two, so both mates of a pair land in the pair
/// of destinations opened for the same chunk index.
pub struct PairedSink<F, W1, W2>
where
    F: FnMut(u64) -> io::Result<(W1, W2)>,
    W1: Write,
    W2: Write,
{
    open_pair: F,
    current: Option<Deinterleaver<W1, W2>>,
    opened: u64,
}
impl<F, W1, W2> PairedSink<F, W1, W2>
where
    F: FnMut(u64) -> io::Result<(W1, W2)>,
    W1: Write,
    W2: Write,
{
    pub fn new(open_pair: F) -> Self {
        Self {
            open_pair,
            current: None,
            opened: 0,
        }
    }

    /// Number of destination pairs opened so far
    #[must_use]
    pub fn opened(&self) -> u64 {
        self.opened
    }
}
impl<F, W1, W2> ChunkSink for PairedSink<F, W1, W2>
where
    F: FnMut(u64) -> io::Result<(W1, W2)>,
    W1: Write,
    W2: Write,
{
    fn open(&mut self, index: u64) -> io::Result<()> {
        let (first, second) = (self.open_pair)(index)?;
        self.current = Some(Deinterleaver::new(first, second));
        self.opened += 1;
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.current
            .as_mut()
            .ok_or_else(no_open_chunk)?
            .write_all(bytes)
    }

    fn close(&mut self, _index: u64) -> io::Result<()> {
        match self.current.take() {
            Some(mut pair) => pair.flush(),
            None => Err(no_open_chunk()),
        }
    }
}

/// Splits interleaved chunks into pairs of files named by `naming`
pub fn split_paired_files<N>(
    mut naming: N,
) -> PairedSink<
    impl FnMut(u64) -> io::Result<(BufWriter<File>, BufWriter<File>)>,
    BufWriter<File>,
    BufWriter<File>,
>
where
    N: FnMut(u64) -> (PathBuf, PathBuf),
{
    PairedSink::new(move |index| {
        let (first, second) = naming(index);
        Ok((
            BufWriter::new(File::create(first)?),
            BufWriter::new(File::create(second)?),
        ))
    })
}
