use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use auto_impl::auto_impl;
use memmap2::Mmap;

use crate::error::{ReadError, Result};

/// A byte stream the chunker reads from
///
/// Sources only ever move forward. Skipping is expressed through [`Source::advance`], which
/// seeks when the stream allows it and reads-and-discards otherwise.
#[auto_impl(&mut, Box)]
pub trait Source {
    /// Reads bytes into `buf`, returning 0 at end of stream
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Moves forward by up to `n` bytes without returning them
    ///
    /// Returns the number of bytes actually passed over, which is less than `n` only at end
    /// of stream.
    fn advance(&mut self, n: u64) -> io::Result<u64>;

    /// Absolute offset of the next byte to be read
    fn position(&self) -> u64;

    /// Total length of the stream, if known up front
    fn known_len(&self) -> Option<u64>;

    /// Returns true if [`Source::advance`] seeks rather than drains
    fn is_seekable(&self) -> bool;
}

/// A seekable source, such as a file or an in-memory buffer
#[derive(Debug)]
pub struct SeekSource<R: Read + Seek> {
    inner: R,
    pos: u64,
    len: u64,
}
impl<R: Read + Seek> SeekSource<R> {
    /// Wraps a seekable reader, starting at its current position
    pub fn new(mut inner: R) -> io::Result<Self> {
        let pos = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(pos))?;
        Ok(Self { inner, pos, len })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
impl SeekSource<Cursor<MappedFile>> {
    /// Opens a file as a memory-mapped source
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mapped = MappedFile::open(path)?;
        Ok(Self::new(Cursor::new(mapped))?)
    }
}
impl<R: Read + Seek> Source for SeekSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }

    fn advance(&mut self, n: u64) -> io::Result<u64> {
        let target = self.pos.saturating_add(n).min(self.len);
        let advanced = target.saturating_sub(self.pos);
        self.pos = self.inner.seek(SeekFrom::Start(target))?;
        Ok(advanced)
    }

    fn position(&self) -> u64 {
        self.pos
    }

    fn known_len(&self) -> Option<u64> {
        Some(self.len)
    }

    fn is_seekable(&self) -> bool {
        true
    }
}

/// A forward-only source, such as a pipe or standard input
///
/// Skipped bytes are read and discarded.
#[derive(Debug)]
pub struct PipeSource<R: Read> {
    inner: R,
    pos: u64,
    len: Option<u64>,
}
impl<R: Read> PipeSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pos: 0,
            len: None,
        }
    }

    /// Wraps a stream whose total length is known even though it cannot seek
    pub fn with_len(inner: R, len: u64) -> Self {
        Self {
            inner,
            pos: 0,
            len: Some(len),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
impl<R: Read> Source for PipeSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }

    fn advance(&mut self, n: u64) -> io::Result<u64> {
        let drained = io::copy(&mut (&mut self.inner).take(n), &mut io::sink())?;
        self.pos += drained;
        Ok(drained)
    }

    fn position(&self) -> u64 {
        self.pos
    }

    fn known_len(&self) -> Option<u64> {
        self.len
    }

    fn is_seekable(&self) -> bool {
        false
    }
}

/// Read-only memory map of a whole file
///
/// Empty files are not mapped.
#[derive(Debug)]
pub struct MappedFile(Option<Mmap>);
impl MappedFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Verify input file is a file before attempting to map
        let file = File::open(path)?;
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(ReadError::IncompatibleFile(path.display().to_string()).into());
        }
        if metadata.len() == 0 {
            return Ok(Self(None));
        }

        // Safety: the file is open and won't be modified while mapped
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self(Some(mmap)))
    }
}
impl AsRef<[u8]> for MappedFile {
    fn as_ref(&self) -> &[u8] {
        match &self.0 {
            Some(mmap) => &mmap[..],
            None => &[],
        }
    }
}

#[cfg(test)]
mod testing {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_seek_source_advance() -> anyhow::Result<()> {
        let mut source = SeekSource::new(Cursor::new(b"0123456789".to_vec()))?;
        assert!(source.is_seekable());
        assert_eq!(source.known_len(), Some(10));

        assert_eq!(source.advance(4)?, 4);
        let mut buf = [0u8; 2];
        assert_eq!(source.read(&mut buf)?, 2);
        assert_eq!(&buf, b"45");
        assert_eq!(source.position(), 6);

        // advancing past the end stops at the end
        assert_eq!(source.advance(100)?, 4);
        assert_eq!(source.position(), 10);
        assert_eq!(source.read(&mut buf)?, 0);
        Ok(())
    }

    #[test]
    fn test_pipe_source_drains() -> anyhow::Result<()> {
        let mut source = PipeSource::new(&b"0123456789"[..]);
        assert!(!source.is_seekable());
        assert_eq!(source.known_len(), None);

        assert_eq!(source.advance(7)?, 7);
        let mut buf = [0u8; 8];
        assert_eq!(source.read(&mut buf)?, 3);
        assert_eq!(&buf[..3], b"789");
        assert_eq!(source.advance(5)?, 0);
        assert_eq!(source.position(), 10);
        Ok(())
    }

    #[test]
    fn test_mapped_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b">chr1\nACGT\n")?;
        file.flush()?;

        let mut source = SeekSource::open(file.path())?;
        assert_eq!(source.known_len(), Some(11));
        let mut buf = [0u8; 5];
        assert_eq!(source.read(&mut buf)?, 5);
        assert_eq!(&buf, b">chr1");
        Ok(())
    }

    #[test]
    fn test_mapped_empty_file() -> anyhow::Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        let source = SeekSource::open(file.path())?;
        assert_eq!(source.known_len(), Some(0));
        Ok(())
    }

    #[test]
    fn test_mapped_directory() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(SeekSource::open(dir.path()).is_err());
        Ok(())
    }
}
