use crate::format::{FASTA_SENTINEL, FASTQ_SENTINEL};

/// Which side of a fragment a record belongs to, taken from a trailing `/1` or `/2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mate {
    First,
    Second,
}

/// The identity of a record as read from its header line
///
/// A header such as `@frag7/2 2:N:0:ACGT` splits into
/// * a name (`frag7`) with the mate suffix stripped
/// * the mate suffix (`/2`)
/// * a free-text description (`2:N:0:ACGT`)
///
/// Identities borrow from the scanned buffer and are never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordIdentity<'a> {
    /// Read name without sentinel, mate suffix, or description
    name: &'a [u8],

    /// Mate suffix, if the name carried one
    mate: Option<Mate>,

    /// Everything after the first whitespace of the header
    description: Option<&'a [u8]>,
}
impl<'a> RecordIdentity<'a> {
    /// Parses a header line
    ///
    /// The line may still carry its sentinel and line terminator; both are ignored.
    #[must_use]
    pub fn parse(header: &'a [u8]) -> Self {
        let mut line = header;
        if let Some((&first, rest)) = line.split_first() {
            if first == FASTQ_SENTINEL || first == FASTA_SENTINEL {
                line = rest;
            }
        }
        while let Some((&last, rest)) = line.split_last() {
            if last == b'\n' || last == b'\r' {
                line = rest;
            } else {
                break;
            }
        }

        let (name, description) =
            match line.iter().position(|b| *b == b' ' || *b == b'\t') {
                Some(split) => {
                    let desc = &line[split + 1..];
                    (&line[..split], (!desc.is_empty()).then_some(desc))
                }
                None => (line, None),
            };

        let (name, mate) = match name {
            [stem @ .., b'/', b'1'] => (stem, Some(Mate::First)),
            [stem @ .., b'/', b'2'] => (stem, Some(Mate::Second)),
            _ => (name, None),
        };

        Self {
            name,
            mate,
            description,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a [u8] {
        self.name
    }

    #[must_use]
    pub fn mate(&self) -> Option<Mate> {
        self.mate
    }

    #[must_use]
    pub fn description(&self) -> Option<&'a [u8]> {
        self.description
    }

    /// Two records are mates of one fragment iff their stripped names match
    #[must_use]
    pub fn same_fragment(&self, other: &RecordIdentity<'_>) -> bool {
        self.name == other.name
    }
}
