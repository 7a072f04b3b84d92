/// What to do with a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Route the chunk to the sink
    Emit,
    /// Pass over the chunk without reading it where possible
    Skip,
    /// No further chunk can be selected
    Stop,
}

/// Selects chunks by a first / last / step / step-count policy
///
/// Chunk `i` is emitted iff `i >= first` and `(i - first) % step < step_count`.
/// Indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strider {
    first: u64,
    last: Option<u64>,
    step: u64,
    step_count: u64,
}
impl Strider {
    /// Values are expected to be validated by [`ChunkPlanBuilder`](crate::ChunkPlanBuilder)
    #[must_use]
    pub fn new(first: u64, last: Option<u64>, step: u64, step_count: u64) -> Self {
        Self {
            first,
            last,
            step,
            step_count,
        }
    }

    #[must_use]
    pub fn is_selected(&self, index: u64) -> bool {
        index >= self.first && (index - self.first) % self.step < self.step_count
    }

    #[must_use]
    pub fn decide(&self, index: u64) -> Decision {
        if self.last.is_some_and(|last| index > last) {
            Decision::Stop
        } else if self.is_selected(index) {
            Decision::Emit
        } else {
            Decision::Skip
        }
    }

    /// The emitted chunk indices up to `last`, or unbounded if there is no last chunk
    pub fn selected(&self) -> impl Iterator<Item = u64> + '_ {
        (1..)
            .map(|index| (index, self.decide(index)))
            .take_while(|(_, decision)| *decision != Decision::Stop)
            .filter(|(_, decision)| *decision == Decision::Emit)
            .map(|(index, _)| index)
    }

    #[must_use]
    pub fn last(&self) -> Option<u64> {
        self.last
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_selection() {
        let strider = Strider::new(2, Some(12), 5, 2);
        let selected: Vec<u64> = strider.selected().collect();
        assert_eq!(selected, vec![2, 3, 7, 8, 12]);
        assert_eq!(strider.decide(1), Decision::Skip);
        assert_eq!(strider.decide(4), Decision::Skip);
        assert_eq!(strider.decide(13), Decision::Stop);
    }

    #[test]
    fn test_every_chunk() {
        let strider = Strider::new(1, Some(6), 3, 3);
        assert!((1..=6).all(|index| strider.decide(index) == Decision::Emit));
        assert_eq!(strider.decide(7), Decision::Stop);
    }

    #[test]
    fn test_unbounded() {
        let strider = Strider::new(3, None, 1, 1);
        assert_eq!(strider.decide(1), Decision::Skip);
        assert_eq!(strider.decide(u64::MAX), Decision::Emit);
        assert_eq!(strider.selected().take(3).collect::<Vec<_>>(), vec![3, 4, 5]);
    }
}
