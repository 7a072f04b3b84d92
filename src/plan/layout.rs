use crate::error::{ConfigError, Result};

/// Fallback stride for streamed input where a chunk count cannot be resolved (64 MiB)
pub const DEFAULT_STREAM_STRIDE: u64 = 64 * 1024 * 1024;

/// What the user asked the chunk size to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkTarget {
    /// An explicit stride in bytes
    Bytes(u64),
    /// A desired number of chunks; the stride is derived from the input size
    Count(u64),
}
impl ChunkTarget {
    /// Resolves the stride in bytes for an input of the given size
    ///
    /// A chunk count needs a known size; streamed input must use an explicit stride
    /// (see [`DEFAULT_STREAM_STRIDE`]).
    pub fn stride(&self, size: Option<u64>) -> Result<u64> {
        match (*self, size) {
            (Self::Bytes(bytes), _) => Ok(bytes),
            (Self::Count(count), Some(size)) => Ok(size.div_ceil(count).max(1)),
            (Self::Count(_), None) => Err(ConfigError::UnknownInputSize.into()),
        }
    }
}

/// Concrete chunk geometry for one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Planned length of a chunk before boundary alignment
    pub stride: u64,

    /// Number of chunks the input splits into, if its size is known
    pub total_chunks: Option<u64>,
}
impl Layout {
    /// Computes the layout of an input of `size` bytes (`None` if unknown)
    pub fn new(target: ChunkTarget, size: Option<u64>, margin: u64) -> Result<Self> {
        let stride = target.stride(size)?;
        if stride <= margin {
            return Err(ConfigError::StrideWithinMargin { stride, margin }.into());
        }
        Ok(Self {
            stride,
            total_chunks: size.map(|size| size / stride + 1),
        })
    }

    /// Planned offset where chunk `index` (1-based) ends
    #[must_use]
    pub fn edge(&self, index: u64) -> u64 {
        index.saturating_mul(self.stride)
    }

    /// Offset from which the boundary closing chunk `index` is searched
    #[must_use]
    pub fn search_start(&self, index: u64, margin: u64) -> u64 {
        self.edge(index).saturating_sub(margin)
    }

    /// Whether `index` is the last planned chunk, which always runs to the end of the input
    #[must_use]
    pub fn is_final(&self, index: u64) -> bool {
        self.total_chunks == Some(index)
    }
}
