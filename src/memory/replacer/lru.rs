//! LRU (Least Recently Used) replacement policy.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use super::{Access, Replacer};
use crate::common::{Error, FrameId, PageKey, Result};
use crate::memory::FramePool;
use crate::trace::ReferenceEvent;

/// Evicts the resident page whose last reference is oldest.
///
/// Recency is the global step index of the last hit or load, so every
/// access counts, not only loads. Step indices are unique, so exactly one
/// page is least recent.
#[derive(Debug, Clone, Default)]
pub struct LruReplacer {
    /// Last reference step per tracked page.
    last_used: HashMap<PageKey, usize>,

    /// The same data ordered by step (first = least recent).
    by_step: BTreeMap<usize, PageKey>,
}

impl LruReplacer {
    /// Create an empty LRU replacer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Step of the last reference to `key`, if tracked.
    pub fn last_used(&self, key: PageKey) -> Option<usize> {
        self.last_used.get(&key).copied()
    }

    /// Number of tracked pages.
    pub fn len(&self) -> usize {
        self.last_used.len()
    }

    /// Whether no page is tracked.
    pub fn is_empty(&self) -> bool {
        self.last_used.is_empty()
    }
}

impl Replacer for LruReplacer {
    fn record_access(&mut self, access: &Access, _pool: &mut FramePool) -> Result<()> {
        if let Some(previous) = self.last_used.insert(access.key, access.step) {
            self.by_step.remove(&previous);
        }
        self.by_step.insert(access.step, access.key);
        Ok(())
    }

    fn select_victim(
        &mut self,
        pool: &mut FramePool,
        _incoming: &ReferenceEvent,
    ) -> Result<FrameId> {
        while let Some((step, key)) = self.by_step.pop_first() {
            self.last_used.remove(&key);
            if let Some(frame_id) = pool.lookup(key) {
                trace!(%key, last_used = step, "LRU victim");
                return Ok(frame_id);
            }
        }
        Err(Error::NoResidentFrames)
    }
}
