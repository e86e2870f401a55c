//! Process identifier and the global page key.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PageId;

/// Identifies a simulated process.
///
/// Ordering matters: the round-robin scheduler visits processes in
/// ascending `ProcessId` order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProcessId(pub u32);

impl ProcessId {
    /// Create a new ProcessId.
    #[inline]
    pub fn new(id: u32) -> Self {
        ProcessId(id)
    }
}

impl From<u32> for ProcessId {
    fn from(id: u32) -> Self {
        ProcessId(id)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A `(process, page)` pair: the owner of a resident frame.
///
/// Displays as `P<pid>:Pg<page>`, which is also the cell format used by
/// the CSV exporter.
///
/// # Example
/// ```
/// use pagesim::PageKey;
///
/// let key = PageKey::new(1, 3);
/// assert_eq!(key.to_string(), "P1:Pg3");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PageKey {
    pub pid: ProcessId,
    pub page: PageId,
}

impl PageKey {
    /// Build a key from raw process and page numbers.
    #[inline]
    pub fn new(pid: u32, page: u32) -> Self {
        Self {
            pid: ProcessId(pid),
            page: PageId(page),
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pid, self.page)
    }
}
