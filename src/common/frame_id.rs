//! Frame identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a physical frame slot in the pool, `0..num_frames`.
///
/// Stored as `usize` so it indexes `Vec<Frame>` directly:
/// `frames[frame_id.0]`.
///
/// # Example
/// ```
/// use pagesim::FrameId;
///
/// let frame_id = FrameId::new(2);
/// assert_eq!(frame_id.next_in(3), FrameId::new(0));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FrameId(pub usize);

impl FrameId {
    /// Create a new FrameId.
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }

    /// The slot index as a plain `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// The next slot in a circular pool of `capacity` frames.
    #[inline]
    pub fn next_in(self, capacity: usize) -> Self {
        FrameId((self.0 + 1) % capacity)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}
