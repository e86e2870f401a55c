//! Page Table Directory - per-process page to frame mappings.

use std::collections::HashMap;

use crate::common::{FrameId, PageId, PageKey, ProcessId};

/// One page table per process, mapping resident pages to their frame.
///
/// A page that is not resident has no entry. The table is only mutated by
/// [`FramePool`](super::FramePool), which keeps it consistent with frame
/// ownership.
#[derive(Debug, Clone, Default)]
pub struct PageTable {
    tables: HashMap<ProcessId, HashMap<PageId, FrameId>>,
    len: usize,
}

impl PageTable {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame holding `key`, if resident.
    #[inline]
    pub fn lookup(&self, key: PageKey) -> Option<FrameId> {
        self.tables
            .get(&key.pid)
            .and_then(|table| table.get(&key.page))
            .copied()
    }

    /// Map `key` to `frame`. Returns the previous frame, if any.
    pub(crate) fn insert(&mut self, key: PageKey, frame: FrameId) -> Option<FrameId> {
        let previous = self.tables.entry(key.pid).or_default().insert(key.page, frame);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Unmap `key`. Returns the frame it was mapped to, if any.
    pub(crate) fn remove(&mut self, key: PageKey) -> Option<FrameId> {
        let table = self.tables.get_mut(&key.pid)?;
        let removed = table.remove(&key.page);
        if removed.is_some() {
            self.len -= 1;
            if table.is_empty() {
                self.tables.remove(&key.pid);
            }
        }
        removed
    }

    /// Number of resident pages across all processes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no page is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All `(key, frame)` mappings, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (PageKey, FrameId)> + '_ {
        self.tables.iter().flat_map(|(&pid, table)| {
            table
                .iter()
                .map(move |(&page, &frame)| (PageKey { pid, page }, frame))
        })
    }

    /// Resident page count for one process.
    pub fn resident_pages(&self, pid: ProcessId) -> usize {
        self.tables.get(&pid).map_or(0, HashMap::len)
    }

    /// Drop every mapping.
    pub fn clear(&mut self) {
        self.tables.clear();
        self.len = 0;
    }
}
