/// Custom Result type for seqchunk operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the seqchunk library, encompassing all possible error cases
/// that can occur while planning, scanning, and emitting chunks.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Errors in the chunk plan or its interaction with the input
    ConfigError(#[from] ConfigError),
    /// Errors related to the record format of an input
    FormatError(#[from] FormatError),
    /// Errors opening an input for reading
    ReadError(#[from] ReadError),
    /// Standard I/O errors from reading, seeking, or writing
    IoError(#[from] std::io::Error),
}
impl Error {
    /// Returns true if the error was caused by the chunk plan rather than the data or I/O
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigError(_))
    }
}

/// Errors in the chunk plan
///
/// All of these are fatal. Everything except [`ConfigError::StrideTooSmall`] is reported
/// before any byte of input is read.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Both a chunk size in bytes and a chunk count were given
    #[error("Chunk size and chunk count are mutually exclusive")]
    SizeAndCount,

    /// Neither a chunk size in bytes nor a chunk count was given
    #[error("One of chunk size or chunk count is required")]
    MissingTarget,

    /// The chunk size in bytes is zero
    #[error("Chunk size must be at least one byte")]
    ZeroStride,

    /// The requested number of chunks is zero
    #[error("Chunk count must be at least one")]
    ZeroCount,

    /// Chunk indices are 1-based
    #[error("First chunk must be at least 1")]
    ZeroFirstChunk,

    /// The step size is zero
    #[error("Step size must be at least 1")]
    ZeroStep,

    /// No chunk would be emitted per step
    #[error("Step count must be at least 1")]
    ZeroStepCount,

    /// More chunks per step were requested than the step contains
    ///
    /// # Fields
    /// * `count` - The number of chunks emitted per step
    /// * `step` - The step size
    #[error("Step count ({count}) exceeds step size ({step})")]
    StepCountExceedsStep { count: u64, step: u64 },

    /// The last chunk precedes the first chunk
    #[error("Last chunk ({last}) is before first chunk ({first})")]
    LastBeforeFirst { first: u64, last: u64 },

    /// The stride does not leave room beyond the security margin
    #[error("Chunk size ({stride}) must exceed the security margin ({margin})")]
    StrideWithinMargin { stride: u64, margin: u64 },

    /// A chunk count cannot be turned into a stride without knowing the input size
    #[error("Chunk count requires a known input size; give an explicit chunk size for streamed input")]
    UnknownInputSize,

    /// The previous chunk boundary already lies past the next search start
    ///
    /// This happens when a single record (or mate pair) is longer than the stride.
    ///
    /// # Fields
    /// * `chunk` - The chunk whose boundary could not be placed
    /// * `boundary` - Offset of the previous chunk boundary
    /// * `edge` - Offset where the search for the next boundary should have started
    #[error(
        "Chunk size is too small for the records: chunk {chunk} boundary at byte {boundary} already passes the next edge at byte {edge}"
    )]
    StrideTooSmall { chunk: u64, boundary: u64, edge: u64 },
}

/// Errors related to the record format of an input
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The first byte of the input is neither a FASTA nor a FASTQ sentinel
    ///
    /// # Arguments
    /// * `u8` - The byte that was found
    #[error("Unrecognized record format: first byte is {0:#04x}")]
    Unrecognized(u8),

    /// Interleaved (paired) chunking only applies to FASTQ input
    #[error("Interleaved chunking is only supported for FASTQ input")]
    UnsupportedInterleaved,
}

/// Errors opening an input for reading
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The path is not a regular file (e.g., a directory or special file)
    ///
    /// # Arguments
    /// * `String` - The offending path
    #[error("File is not regular: {0}")]
    IncompatibleFile(String),
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
        assert!(!err.is_config());
    }

    #[test]
    fn test_display_is_transparent() {
        let err: Error = ConfigError::StepCountExceedsStep { count: 3, step: 2 }.into();
        assert!(err.is_config());
        assert_eq!(err.to_string(), "Step count (3) exceeds step size (2)");

        let err: Error = FormatError::Unrecognized(b'X').into();
        assert_eq!(err.to_string(), "Unrecognized record format: first byte is 0x58");
    }
}
