//! Record format detection
//!
//! Inputs are classified from their first byte alone. The sentinel that opens a record header
//! differs between the two supported formats, so no further parsing is needed.

use crate::error::{FormatError, Result};

/// First byte of every FASTA record header
pub const FASTA_SENTINEL: u8 = b'>';

/// First byte of every FASTQ record header
pub const FASTQ_SENTINEL: u8 = b'@';

/// First byte of the third line (quality header) of every FASTQ record
pub const QUALITY_SENTINEL: u8 = b'+';

/// Number of lines in a FASTQ record
pub const FASTQ_LINES: usize = 4;

/// The record layouts a chunker can align to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordFormat {
    /// Single-line `>` header followed by any number of sequence lines
    Fasta,
    /// Four lines per record: `@` header, sequence, `+` header, quality
    Fastq,
}
impl RecordFormat {
    /// Classifies an input from its first byte
    pub fn sniff(first: u8) -> Result<Self> {
        match first {
            FASTA_SENTINEL => Ok(Self::Fasta),
            FASTQ_SENTINEL => Ok(Self::Fastq),
            other => Err(FormatError::Unrecognized(other).into()),
        }
    }

    /// The byte that opens a record header in this format
    #[must_use]
    pub fn sentinel(&self) -> u8 {
        match self {
            Self::Fasta => FASTA_SENTINEL,
            Self::Fastq => FASTQ_SENTINEL,
        }
    }

    /// Checks whether this format can be chunked with mate pairs kept together
    pub fn check_interleaved(&self) -> Result<()> {
        match self {
            Self::Fastq => Ok(()),
            Self::Fasta => Err(FormatError::UnsupportedInterleaved.into()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fasta => "fasta",
            Self::Fastq => "fastq",
        }
    }
}
impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;

    #[test]
    fn test_sniff() -> anyhow::Result<()> {
        assert_eq!(RecordFormat::sniff(b'>')?, RecordFormat::Fasta);
        assert_eq!(RecordFormat::sniff(b'@')?, RecordFormat::Fastq);
        Ok(())
    }

    #[test]
    fn test_sniff_unrecognized() {
        let err = RecordFormat::sniff(b'A').unwrap_err();
        assert!(matches!(
            err,
            Error::FormatError(FormatError::Unrecognized(b'A'))
        ));
    }

    #[test]
    fn test_interleaved_requires_fastq() {
        assert!(RecordFormat::Fastq.check_interleaved().is_ok());
        assert!(matches!(
            RecordFormat::Fasta.check_interleaved(),
            Err(Error::FormatError(FormatError::UnsupportedInterleaved))
        ));
    }
}
