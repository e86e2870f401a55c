//! Reference events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{PageId, PageKey, ProcessId};

/// One page reference at a fixed position in the global trace.
///
/// `step` counts from 0 and increases by one per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceEvent {
    pub step: usize,
    pub pid: ProcessId,
    pub page: PageId,
}

impl ReferenceEvent {
    /// Build an event from raw numbers.
    #[inline]
    pub fn new(step: usize, pid: u32, page: u32) -> Self {
        Self {
            step,
            pid: ProcessId(pid),
            page: PageId(page),
        }
    }

    /// The `(process, page)` pair this event references.
    #[inline]
    pub fn key(&self) -> PageKey {
        PageKey {
            pid: self.pid,
            page: self.page,
        }
    }
}

impl fmt::Display for ReferenceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.step, self.key())
    }
}
