//! Frame - a physical memory slot.
//!
//! A [`Frame`] holds at most one resident page plus the reference bit used
//! by the Clock policy:
//! - Which `(process, page)` owns the slot (if any)
//! - Reference bit, always clear on an empty frame

use crate::common::PageKey;

/// A frame in the pool.
///
/// Frames are the fixed slots of physical memory. The pool allocates all
/// of them up front and only ever changes who owns them.
///
/// Mutation goes through [`FramePool`](super::FramePool) so the page table
/// stays in step with frame ownership; outside the `memory` module a frame
/// is read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Which page is resident, or None if the frame is empty.
    owner: Option<PageKey>,

    /// Recently-referenced flag (Clock only).
    referenced: bool,
}

impl Frame {
    /// Create a new empty frame.
    pub fn new() -> Self {
        Self {
            owner: None,
            referenced: false,
        }
    }

    // ========================================================================
    // Ownership
    // ========================================================================

    /// The resident page, if any.
    #[inline]
    pub fn owner(&self) -> Option<PageKey> {
        self.owner
    }

    /// Check if the frame is empty (no page resident).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }

    /// Install `key` as the owner and mark the frame referenced.
    #[inline]
    pub(crate) fn load(&mut self, key: PageKey) {
        self.owner = Some(key);
        self.referenced = true;
    }

    /// Empty the frame. Returns the previous owner.
    pub(crate) fn reset(&mut self) -> Option<PageKey> {
        self.referenced = false;
        self.owner.take()
    }

    // ========================================================================
    // Reference bit
    // ========================================================================

    /// Whether the reference bit is set.
    #[inline]
    pub fn is_referenced(&self) -> bool {
        self.referenced
    }

    /// Set or clear the reference bit. Ignored on an empty frame.
    #[inline]
    pub(crate) fn set_referenced(&mut self, referenced: bool) {
        self.referenced = referenced && self.owner.is_some();
    }
}
