//! Seeded inputs and sinks shared by the tests

use std::io;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use seq_io::fasta::Record as _;
use seq_io::fastq::Record as _;

use crate::writer::ChunkSink;

const BASES: &[u8] = b"ACGT";

fn sequence(rng: &mut SmallRng, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| BASES[rng.random_range(0..BASES.len())])
        .collect()
}

/// Quality scores from `!` to `J`, which includes both `@` and `+`
fn quality(rng: &mut SmallRng, len: usize, at_first: bool) -> Vec<u8> {
    let mut qual: Vec<u8> = (0..len).map(|_| rng.random_range(b'!'..=b'J')).collect();
    if at_first {
        qual[0] = b'@';
    }
    qual
}

fn push_fastq(buf: &mut Vec<u8>, rng: &mut SmallRng, header: &str, at_first: bool) {
    let len = rng.random_range(10..=40);
    buf.extend_from_slice(header.as_bytes());
    buf.push(b'\n');
    buf.extend(sequence(rng, len));
    buf.extend_from_slice(b"\n+\n");
    buf.extend(quality(rng, len, at_first));
    buf.push(b'\n');
}

/// Single-end FASTQ; every fifth quality line begins with `@`
pub fn fastq(records: usize, seed: u64) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut buf = Vec::new();
    for i in 0..records {
        push_fastq(&mut buf, &mut rng, &format!("@read{i}"), i % 5 == 0);
    }
    buf
}

/// Interleaved FASTQ with mates named `frag{i}/1` and `frag{i}/2`
pub fn interleaved(pairs: usize, seed: u64) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut buf = Vec::new();
    for i in 0..pairs {
        push_fastq(&mut buf, &mut rng, &format!("@frag{i}/1 lane=1"), i % 3 == 0);
        push_fastq(&mut buf, &mut rng, &format!("@frag{i}/2 lane=1"), i % 4 == 0);
    }
    buf
}

/// Multi-line FASTA with up to four sequence lines per record
pub fn fasta(records: usize, seed: u64) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut buf = Vec::new();
    for i in 0..records {
        buf.extend_from_slice(format!(">contig{i} sample=A\n").as_bytes());
        for _ in 0..rng.random_range(1..=4) {
            let len = rng.random_range(1..=60);
            buf.extend(sequence(&mut rng, len));
            buf.push(b'\n');
        }
    }
    buf
}

/// Splits well-formed FASTQ into its four-line records
pub fn fastq_records(buf: &[u8]) -> Vec<Vec<u8>> {
    let lines: Vec<&[u8]> = buf.split_inclusive(|&b| b == b'\n').collect();
    lines.chunks(4).map(|record| record.concat()).collect()
}

/// Headers of every FASTQ record in `chunk`, failing if it holds a partial record
pub fn fastq_heads(chunk: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut reader = seq_io::fastq::Reader::new(chunk);
    let mut heads = Vec::new();
    while let Some(record) = reader.next() {
        heads.push(String::from_utf8_lossy(record?.head()).into_owned());
    }
    Ok(heads)
}

/// Headers of every FASTA record in `chunk`
pub fn fasta_heads(chunk: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut reader = seq_io::fasta::Reader::new(chunk);
    let mut heads = Vec::new();
    while let Some(record) = reader.next() {
        heads.push(String::from_utf8_lossy(record?.head()).into_owned());
    }
    Ok(heads)
}

/// Keeps every emitted chunk in memory
#[derive(Debug, Default)]
pub struct Collector {
    pub chunks: Vec<(u64, Vec<u8>)>,
}
impl Collector {
    pub fn indices(&self) -> Vec<u64> {
        self.chunks.iter().map(|(index, _)| *index).collect()
    }

    pub fn concat(&self) -> Vec<u8> {
        self.chunks.iter().flat_map(|(_, bytes)| bytes.clone()).collect()
    }
}
impl ChunkSink for Collector {
    fn open(&mut self, index: u64) -> io::Result<()> {
        self.chunks.push((index, Vec::new()));
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self.chunks.last_mut() {
            Some((_, chunk)) => {
                chunk.extend_from_slice(bytes);
                Ok(())
            }
            None => Err(io::Error::other("write before open")),
        }
    }

    fn close(&mut self, _index: u64) -> io::Result<()> {
        Ok(())
    }
}
