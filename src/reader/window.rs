use std::io;

use crate::writer::ChunkSink;

use super::Source;

/// Default number of bytes pulled from a source per read (8K)
pub const DEFAULT_BUFFER_CAPACITY: usize = 8192;

/// Bytes read from a source but not yet consumed
///
/// The window covers the absolute stream range `start..start + len`. Bytes leave the window
/// only by being written to a sink or discarded, so every byte of the input is accounted for
/// exactly once. Scanning past a chunk edge leaves the start of the next chunk in the window,
/// where the next extraction picks it up without rereading.
#[derive(Debug)]
pub struct Window<S: Source> {
    /// Underlying stream, positioned at `start + buf.len()`
    source: S,

    /// Unconsumed bytes
    buf: Vec<u8>,

    /// Absolute offset of `buf[0]`
    start: u64,

    /// The source returned end of stream
    eof: bool,

    /// Bytes requested from the source per read
    capacity: usize,
}
impl<S: Source> Window<S> {
    pub fn new(source: S) -> Self {
        Self::with_capacity(source, DEFAULT_BUFFER_CAPACITY)
    }

    pub fn with_capacity(source: S, capacity: usize) -> Self {
        Self {
            start: source.position(),
            source,
            buf: Vec::new(),
            eof: false,
            capacity: capacity.max(1),
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> u64 {
        self.start + self.buf.len() as u64
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns true once the source has signalled end of stream
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Returns true when no bytes are left in the window or the source
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.eof && self.buf.is_empty()
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Appends up to one buffer capacity of bytes from the source
    ///
    /// Returns the number of bytes added; 0 means end of stream.
    pub fn fill(&mut self) -> io::Result<usize> {
        if self.eof {
            return Ok(0);
        }
        let filled = self.buf.len();
        self.buf.resize(filled + self.capacity, 0);
        let read = loop {
            match self.source.read(&mut self.buf[filled..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.buf.truncate(filled);
                    return Err(e);
                }
            }
        };
        self.buf.truncate(filled + read);
        if read == 0 {
            self.eof = true;
        }
        Ok(read)
    }

    /// Returns the first unconsumed byte, reading if needed
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        while self.buf.is_empty() && self.fill()? > 0 {}
        Ok(self.buf.first().copied())
    }

    /// Drops the first `n` bytes of the window
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.buf.len());
        self.buf.drain(..n);
        self.start += n as u64;
    }

    /// Discards everything before the absolute offset `target`
    ///
    /// Bytes beyond the window are passed over with [`Source::advance`], so a seekable source
    /// never reads them.
    pub fn skip_to(&mut self, target: u64) -> io::Result<()> {
        if target <= self.end() {
            self.consume(target.saturating_sub(self.start) as usize);
            return Ok(());
        }
        let wanted = target - self.end();
        self.start = self.end();
        self.buf.clear();
        let advanced = self.source.advance(wanted)?;
        self.start += advanced;
        if advanced < wanted {
            self.eof = true;
        }
        Ok(())
    }

    /// Writes everything before the absolute offset `target` to `sink`
    ///
    /// Stops early at end of stream. Returns the number of bytes written.
    pub fn copy_to<K: ChunkSink + ?Sized>(&mut self, target: u64, sink: &mut K) -> io::Result<u64> {
        let mut written = 0;
        while self.start < target {
            if self.buf.is_empty() && self.fill()? == 0 {
                break;
            }
            let n = (target - self.start).min(self.buf.len() as u64) as usize;
            sink.write_all(&self.buf[..n])?;
            self.consume(n);
            written += n as u64;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod testing {
    use std::io::Cursor;

    use super::*;
    use crate::reader::{PipeSource, SeekSource};
    use crate::writer::SingleSink;

    const DATA: &[u8] = b"0123456789abcdefghij";

    #[test]
    fn test_copy_then_skip() -> anyhow::Result<()> {
        let source = SeekSource::new(Cursor::new(DATA.to_vec()))?;
        let mut window = Window::with_capacity(source, 3);
        let mut sink = SingleSink::new(Vec::new());

        assert_eq!(window.copy_to(5, &mut sink)?, 5);
        assert_eq!(window.start(), 5);

        window.skip_to(12)?;
        assert_eq!(window.start(), 12);
        assert_eq!(window.copy_to(u64::MAX, &mut sink)?, 8);
        assert!(window.is_exhausted());
        assert_eq!(sink.into_inner(), b"01234cdefghij");
        Ok(())
    }

    #[test]
    fn test_skip_within_window() -> anyhow::Result<()> {
        let mut window = Window::with_capacity(PipeSource::new(DATA), 16);
        assert_eq!(window.peek()?, Some(b'0'));
        assert_eq!(window.len(), 16);

        window.skip_to(4)?;
        assert_eq!(window.bytes()[0], b'4');
        assert_eq!(window.source().position(), 16);
        Ok(())
    }

    #[test]
    fn test_skip_past_end() -> anyhow::Result<()> {
        let mut window = Window::with_capacity(PipeSource::new(DATA), 4);
        window.skip_to(100)?;
        assert!(window.is_eof());
        assert_eq!(window.start(), DATA.len() as u64);
        assert_eq!(window.peek()?, None);
        Ok(())
    }

    #[test]
    fn test_peek_empty() -> anyhow::Result<()> {
        let mut window = Window::new(PipeSource::new(&b""[..]));
        assert_eq!(window.peek()?, None);
        assert!(window.is_exhausted());
        Ok(())
    }
}
