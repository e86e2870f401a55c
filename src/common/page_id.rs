//! Virtual page number type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A virtual page number within one process's address space.
///
/// Page numbers are only unique per process; use [`PageKey`](crate::PageKey)
/// when a page must be identified across the whole simulation.
///
/// # Example
/// ```
/// use pagesim::PageId;
///
/// let page = PageId::new(7);
/// assert_eq!(page.0, 7);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PageId(pub u32);

impl PageId {
    /// Create a new PageId.
    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }
}

impl From<u32> for PageId {
    fn from(id: u32) -> Self {
        PageId(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pg{}", self.0)
    }
}
