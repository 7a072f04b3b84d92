//! Chunk planning
//!
//! A [`ChunkPlan`] is resolved once from user options and reused for every input. The
//! per-input geometry ([`Layout`]) depends on the input size and is recomputed each time.

mod layout;
mod strider;

pub use layout::{ChunkTarget, Layout, DEFAULT_STREAM_STRIDE};
pub use strider::{Decision, Strider};

use crate::error::{ConfigError, Result};

/// Default distance before a planned edge where the boundary search begins
///
/// With no margin, every boundary lies at or after its planned edge.
pub const DEFAULT_MARGIN: u64 = 0;

/// A validated chunking plan
///
/// # Examples
///
/// ```
/// # use seqchunk::{ChunkPlan, Result};
/// # fn main() -> Result<()> {
/// // every other pair of chunks, starting with the third
/// let plan = ChunkPlan::builder()
///     .count(100)
///     .first(3)
///     .step(4)
///     .step_count(2)
///     .build()?;
/// assert!(plan.strider(Some(100)).is_selected(4));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    /// Explicit stride or desired chunk count
    target: ChunkTarget,

    /// First chunk to consider (1-based)
    first: u64,

    /// Last chunk to consider, unbounded if `None`
    last: Option<u64>,

    /// Period of the selection pattern
    step: u64,

    /// Chunks emitted at the start of every period
    step_count: u64,

    /// How far before a planned edge the boundary search begins
    margin: u64,

    /// Keep mate pairs of interleaved FASTQ together
    interleaved: bool,
}
impl ChunkPlan {
    #[must_use]
    pub fn builder() -> ChunkPlanBuilder {
        ChunkPlanBuilder::default()
    }

    #[must_use]
    pub fn target(&self) -> ChunkTarget {
        self.target
    }

    #[must_use]
    pub fn first(&self) -> u64 {
        self.first
    }

    #[must_use]
    pub fn last(&self) -> Option<u64> {
        self.last
    }

    #[must_use]
    pub fn step(&self) -> u64 {
        self.step
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    #[must_use]
    pub fn margin(&self) -> u64 {
        self.margin
    }

    #[must_use]
    pub fn interleaved(&self) -> bool {
        self.interleaved
    }

    /// Resolves the chunk geometry for an input of `size` bytes (`None` if unknown)
    pub fn layout(&self, size: Option<u64>) -> Result<Layout> {
        Layout::new(self.target, size, self.margin)
    }

    /// The chunk selector for an input with `total_chunks` planned chunks
    ///
    /// The last chunk is capped at the total when both are known.
    #[must_use]
    pub fn strider(&self, total_chunks: Option<u64>) -> Strider {
        let last = match (self.last, total_chunks) {
            (Some(last), Some(total)) => Some(last.min(total)),
            (last, total) => last.or(total),
        };
        Strider::new(self.first, last, self.step, self.step_count)
    }
}

/// Builder for [`ChunkPlan`]
///
/// Exactly one of [`bytes`](Self::bytes) or [`count`](Self::count) is required. Everything
/// else defaults to emitting every chunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkPlanBuilder {
    bytes: Option<u64>,
    count: Option<u64>,
    first: Option<u64>,
    last: Option<u64>,
    step: Option<u64>,
    step_count: Option<u64>,
    margin: Option<u64>,
    interleaved: Option<bool>,
}
impl ChunkPlanBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Planned chunk size in bytes
    #[must_use]
    pub fn bytes(mut self, bytes: u64) -> Self {
        self.bytes = Some(bytes);
        self
    }

    /// Desired number of chunks per input
    #[must_use]
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn first(mut self, first: u64) -> Self {
        self.first = Some(first);
        self
    }

    #[must_use]
    pub fn last(mut self, last: u64) -> Self {
        self.last = Some(last);
        self
    }

    #[must_use]
    pub fn step(mut self, step: u64) -> Self {
        self.step = Some(step);
        self
    }

    #[must_use]
    pub fn step_count(mut self, step_count: u64) -> Self {
        self.step_count = Some(step_count);
        self
    }

    #[must_use]
    pub fn margin(mut self, margin: u64) -> Self {
        self.margin = Some(margin);
        self
    }

    #[must_use]
    pub fn interleaved(mut self, interleaved: bool) -> Self {
        self.interleaved = Some(interleaved);
        self
    }

    pub fn build(self) -> Result<ChunkPlan> {
        let target = match (self.bytes, self.count) {
            (Some(_), Some(_)) => return Err(ConfigError::SizeAndCount.into()),
            (None, None) => return Err(ConfigError::MissingTarget.into()),
            (Some(0), None) => return Err(ConfigError::ZeroStride.into()),
            (None, Some(0)) => return Err(ConfigError::ZeroCount.into()),
            (Some(bytes), None) => ChunkTarget::Bytes(bytes),
            (None, Some(count)) => ChunkTarget::Count(count),
        };

        let first = self.first.unwrap_or(1);
        if first == 0 {
            return Err(ConfigError::ZeroFirstChunk.into());
        }
        if let Some(last) = self.last {
            if last < first {
                return Err(ConfigError::LastBeforeFirst { first, last }.into());
            }
        }

        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(ConfigError::ZeroStep.into());
        }
        let step_count = self.step_count.unwrap_or(step);
        if step_count == 0 {
            return Err(ConfigError::ZeroStepCount.into());
        }
        if step_count > step {
            return Err(ConfigError::StepCountExceedsStep {
                count: step_count,
                step,
            }
            .into());
        }

        let margin = self.margin.unwrap_or(DEFAULT_MARGIN);
        if let ChunkTarget::Bytes(stride) = target {
            if stride <= margin {
                return Err(ConfigError::StrideWithinMargin { stride, margin }.into());
            }
        }

        Ok(ChunkPlan {
            target,
            first,
            last: self.last,
            step,
            step_count,
            margin,
            interleaved: self.interleaved.unwrap_or(false),
        })
    }
}
