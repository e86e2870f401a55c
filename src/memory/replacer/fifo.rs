//! FIFO (First-In-First-Out) replacement policy.

use std::collections::VecDeque;

use tracing::trace;

use super::{Access, Replacer};
use crate::common::{Error, FrameId, PageKey, Result};
use crate::memory::FramePool;
use crate::trace::ReferenceEvent;

/// Evicts pages in the order they were loaded.
///
/// Hits do not reorder anything. Entries whose page is no longer resident
/// are discarded when they reach the head of the queue.
#[derive(Debug, Clone, Default)]
pub struct FifoReplacer {
    /// Pages in load order (front = oldest).
    queue: VecDeque<PageKey>,
}

impl FifoReplacer {
    /// Create an empty FIFO replacer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued loads, including stale ones not yet discarded.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Replacer for FifoReplacer {
    fn record_access(&mut self, access: &Access, _pool: &mut FramePool) -> Result<()> {
        if !access.hit {
            self.queue.push_back(access.key);
        }
        Ok(())
    }

    fn select_victim(
        &mut self,
        pool: &mut FramePool,
        _incoming: &ReferenceEvent,
    ) -> Result<FrameId> {
        while let Some(key) = self.queue.pop_front() {
            if let Some(frame_id) = pool.lookup(key) {
                return Ok(frame_id);
            }
            trace!(%key, "discarding stale FIFO entry");
        }
        Err(Error::NoResidentFrames)
    }
}
