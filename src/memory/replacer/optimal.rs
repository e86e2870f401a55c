//! Optimal (Belady's MIN) replacement policy.
//!
//! Evicts the resident page whose next reference lies furthest in the
//! future. This needs the complete trace before the run starts; there is
//! no streaming mode and no approximation when the trace is missing.

use std::collections::HashMap;

use tracing::trace;

use super::{Access, Replacer};
use crate::common::{Error, FrameId, PageKey, Result};
use crate::memory::FramePool;
use crate::trace::ReferenceEvent;

/// Lookahead-driven policy over a fully known trace.
///
/// Victim rule:
/// 1. A resident page that is never referenced again is evicted at once;
///    among several, the lowest frame index wins.
/// 2. Otherwise the page with the strictly latest next reference is
///    evicted; ties keep the lowest frame index.
#[derive(Debug, Clone)]
pub struct OptimalReplacer {
    /// The complete trace, indexed by step.
    trace: Vec<ReferenceEvent>,

    /// Ascending step indices at which each page is referenced.
    occurrences: HashMap<PageKey, Vec<usize>>,
}

impl OptimalReplacer {
    /// Index the complete trace.
    ///
    /// # Errors
    /// - `Error::LookaheadRequired` if the trace is empty
    pub fn new(trace: &[ReferenceEvent]) -> Result<Self> {
        if trace.is_empty() {
            return Err(Error::LookaheadRequired);
        }

        let mut occurrences: HashMap<PageKey, Vec<usize>> = HashMap::new();
        for event in trace {
            occurrences.entry(event.key()).or_default().push(event.step);
        }
        for steps in occurrences.values_mut() {
            steps.sort_unstable();
        }

        Ok(Self {
            trace: trace.to_vec(),
            occurrences,
        })
    }

    /// First step strictly after `step` at which `key` is referenced.
    pub fn next_use(&self, key: PageKey, step: usize) -> Option<usize> {
        let steps = self.occurrences.get(&key)?;
        let idx = steps.partition_point(|&s| s <= step);
        steps.get(idx).copied()
    }

    /// Number of references in the indexed trace.
    pub fn trace_len(&self) -> usize {
        self.trace.len()
    }
}

impl Replacer for OptimalReplacer {
    fn record_access(&mut self, _access: &Access, _pool: &mut FramePool) -> Result<()> {
        Ok(())
    }

    fn select_victim(
        &mut self,
        pool: &mut FramePool,
        incoming: &ReferenceEvent,
    ) -> Result<FrameId> {
        // The decision is only sound for the trace we indexed.
        if self.trace.get(incoming.step) != Some(incoming) {
            return Err(Error::LookaheadExhausted {
                step: incoming.step,
            });
        }

        let mut furthest: Option<(FrameId, usize)> = None;
        for (frame_id, key) in pool.resident() {
            match self.next_use(key, incoming.step) {
                None => {
                    trace!(%key, %frame_id, "never referenced again");
                    return Ok(frame_id);
                }
                Some(next) => {
                    if furthest.map_or(true, |(_, best)| next > best) {
                        furthest = Some((frame_id, next));
                    }
                }
            }
        }

        furthest
            .map(|(frame_id, _)| frame_id)
            .ok_or(Error::NoResidentFrames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_process(pages: &[u32]) -> Vec<ReferenceEvent> {
        pages
            .iter()
            .enumerate()
            .map(|(step, &page)| ReferenceEvent::new(step, 1, page))
            .collect()
    }

    fn pool_with(pages: &[u32]) -> FramePool {
        let mut pool = FramePool::new(pages.len()).unwrap();
        for (i, &page) in pages.iter().enumerate() {
            pool.assign(FrameId::new(i), PageKey::new(1, page)).unwrap();
        }
        pool
    }

    #[test]
    fn test_empty_trace_rejected() {
        assert!(matches!(
            OptimalReplacer::new(&[]),
            Err(Error::LookaheadRequired)
        ));
    }

    #[test]
    fn test_next_use() {
        let replacer = OptimalReplacer::new(&single_process(&[1, 2, 1, 3, 1])).unwrap();
        let key = PageKey::new(1, 1);

        assert_eq!(replacer.next_use(key, 0), Some(2));
        assert_eq!(replacer.next_use(key, 2), Some(4));
        assert_eq!(replacer.next_use(key, 4), None);
        assert_eq!(replacer.next_use(PageKey::new(2, 1), 0), None);
        assert_eq!(replacer.trace_len(), 5);
    }

    #[test]
    fn test_evicts_furthest_next_use() {
        // Resident 1,2,3; at step 3 page 4 faults. Next uses: 1→4, 2→5, 3→6.
        let trace = single_process(&[1, 2, 3, 4, 1, 2, 3]);
        let mut replacer = OptimalReplacer::new(&trace).unwrap();
        let mut pool = pool_with(&[1, 2, 3]);

        let victim = replacer.select_victim(&mut pool, &trace[3]).unwrap();
        assert_eq!(victim, FrameId::new(2));
    }

    #[test]
    fn test_never_used_again_wins() {
        // Page 2 never recurs, page 1 and 3 do.
        let trace = single_process(&[1, 2, 3, 4, 3, 1]);
        let mut replacer = OptimalReplacer::new(&trace).unwrap();
        let mut pool = pool_with(&[1, 2, 3]);

        let victim = replacer.select_victim(&mut pool, &trace[3]).unwrap();
        assert_eq!(victim, FrameId::new(1));
    }

    #[test]
    fn test_never_used_ties_lowest_frame() {
        let trace = single_process(&[1, 2, 3, 4]);
        let mut replacer = OptimalReplacer::new(&trace).unwrap();
        let mut pool = pool_with(&[1, 2, 3]);

        let victim = replacer.select_victim(&mut pool, &trace[3]).unwrap();
        assert_eq!(victim, FrameId::new(0));
    }

    #[test]
    fn test_rejects_unknown_step() {
        let trace = single_process(&[1, 2]);
        let mut replacer = OptimalReplacer::new(&trace).unwrap();
        let mut pool = pool_with(&[1, 2]);

        let beyond = ReferenceEvent::new(5, 1, 3);
        assert!(matches!(
            replacer.select_victim(&mut pool, &beyond),
            Err(Error::LookaheadExhausted { step: 5 })
        ));

        // Right step, wrong page: the trace does not describe this run.
        let diverged = ReferenceEvent::new(1, 1, 7);
        assert!(matches!(
            replacer.select_victim(&mut pool, &diverged),
            Err(Error::LookaheadExhausted { step: 1 })
        ));
    }
}
