//! Frame Pool - the fixed set of frames plus the page table that indexes it.
//!
//! [`FramePool`] is the single owned aggregate of canonical memory state.
//! Every ownership change goes through [`FramePool::assign`] or
//! [`FramePool::evict`], which update the frame and the page table together
//! so that `page_table[pid][page] == f` iff `frames[f].owner == (pid, page)`.

use crate::common::{Error, FrameId, PageKey, Result};
use crate::memory::{Frame, PageTable};

/// Physical memory: `capacity` frames and the directory of resident pages.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │                      FramePool                       │
/// │  ┌──────────────────┐   ┌─────────────────────────┐  │
/// │  │   page_table     │   │    frames: Vec<Frame>   │  │
/// │  │ pid → page → fid │──▶│ [F0] [F1] [F2] ...      │  │
/// │  └──────────────────┘   └─────────────────────────┘  │
/// └──────────────────────────────────────────────────────┘
/// ```
///
/// # Usage
/// ```
/// use pagesim::{FramePool, FrameId, PageKey};
///
/// let mut pool = FramePool::new(2).unwrap();
/// let frame = pool.allocate_free_frame().unwrap();
/// pool.assign(frame, PageKey::new(1, 7)).unwrap();
///
/// assert_eq!(pool.lookup(PageKey::new(1, 7)), Some(FrameId::new(0)));
/// assert_eq!(pool.evict(frame).unwrap(), PageKey::new(1, 7));
/// assert_eq!(pool.lookup(PageKey::new(1, 7)), None);
/// ```
#[derive(Debug, Clone)]
pub struct FramePool {
    /// Fixed pool of frames allocated at construction.
    frames: Vec<Frame>,

    /// Maps resident pages to their frames.
    page_table: PageTable,
}

impl FramePool {
    /// Create a pool of `capacity` empty frames.
    ///
    /// # Errors
    /// - `Error::InvalidFrameCount` if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidFrameCount(capacity));
        }

        Ok(Self {
            frames: (0..capacity).map(|_| Frame::new()).collect(),
            page_table: PageTable::new(),
        })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of frames in the pool.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    /// Number of occupied frames.
    #[inline]
    pub fn resident_count(&self) -> usize {
        self.page_table.len()
    }

    /// Whether every frame is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.resident_count() == self.capacity()
    }

    /// All frames, in frame-index order.
    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// A single frame.
    ///
    /// # Panics
    /// Panics if `frame_id` is outside the pool.
    #[inline]
    pub fn frame(&self, frame_id: FrameId) -> &Frame {
        &self.frames[frame_id.index()]
    }

    /// The per-process page tables.
    #[inline]
    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    /// Frame holding `key`, if resident.
    #[inline]
    pub fn lookup(&self, key: PageKey) -> Option<FrameId> {
        self.page_table.lookup(key)
    }

    /// `(frame, owner)` for every occupied frame, lowest frame first.
    pub fn resident(&self) -> impl Iterator<Item = (FrameId, PageKey)> + '_ {
        self.frames
            .iter()
            .enumerate()
            .filter_map(|(i, frame)| frame.owner().map(|key| (FrameId::new(i), key)))
    }

    /// Owners of all frames, in frame-index order.
    pub fn snapshot(&self) -> Vec<Option<PageKey>> {
        self.frames.iter().map(Frame::owner).collect()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Lowest-index empty frame, or None if the pool is full.
    pub fn allocate_free_frame(&self) -> Option<FrameId> {
        self.frames.iter().position(Frame::is_empty).map(FrameId::new)
    }

    /// Make `key` resident in `frame_id` with its reference bit set.
    ///
    /// Any prior owner of the frame is unmapped first and returned.
    ///
    /// # Errors
    /// - `Error::Inconsistent` if `frame_id` is outside the pool or `key` is
    ///   already resident in a different frame
    pub fn assign(&mut self, frame_id: FrameId, key: PageKey) -> Result<Option<PageKey>> {
        if let Some(existing) = self.page_table.lookup(key) {
            if existing != frame_id {
                return Err(Error::Inconsistent(format!(
                    "{} is already resident in {}",
                    key, existing
                )));
            }
        }

        let frame = Self::slot_mut(&mut self.frames, frame_id)?;
        let prior = frame.reset();
        frame.load(key);

        if let Some(prior) = prior {
            self.page_table.remove(prior);
        }
        self.page_table.insert(key, frame_id);

        Ok(prior)
    }

    /// Empty `frame_id` and unmap its owner. Returns the evicted owner.
    ///
    /// # Errors
    /// - `Error::EmptyFrame` if nothing is resident in the frame
    /// - `Error::Inconsistent` if `frame_id` is outside the pool
    pub fn evict(&mut self, frame_id: FrameId) -> Result<PageKey> {
        let frame = Self::slot_mut(&mut self.frames, frame_id)?;
        let owner = frame.reset().ok_or(Error::EmptyFrame(frame_id))?;
        self.page_table.remove(owner);
        Ok(owner)
    }

    /// Set or clear the reference bit of an occupied frame.
    ///
    /// # Errors
    /// - `Error::EmptyFrame` if the frame holds no page
    pub fn set_referenced(&mut self, frame_id: FrameId, referenced: bool) -> Result<()> {
        let frame = Self::slot_mut(&mut self.frames, frame_id)?;
        if frame.is_empty() {
            return Err(Error::EmptyFrame(frame_id));
        }
        frame.set_referenced(referenced);
        Ok(())
    }

    /// Return every frame to the empty state and clear the page table.
    pub fn reset(&mut self) {
        for frame in &mut self.frames {
            frame.reset();
        }
        self.page_table.clear();
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Verify the frame/page-table bijection and the empty-frame rules.
    ///
    /// # Errors
    /// - `Error::Inconsistent` describing the first violation found
    pub fn check_consistency(&self) -> Result<()> {
        let mut occupied = 0;
        for (i, frame) in self.frames.iter().enumerate() {
            let frame_id = FrameId::new(i);
            match frame.owner() {
                Some(key) => {
                    occupied += 1;
                    if self.page_table.lookup(key) != Some(frame_id) {
                        return Err(Error::Inconsistent(format!(
                            "{} owns {} but the page table maps it to {:?}",
                            frame_id,
                            key,
                            self.page_table.lookup(key)
                        )));
                    }
                }
                None if frame.is_referenced() => {
                    return Err(Error::Inconsistent(format!(
                        "empty {} has its reference bit set",
                        frame_id
                    )));
                }
                None => {}
            }
        }

        if occupied != self.page_table.len() {
            return Err(Error::Inconsistent(format!(
                "{} occupied frames but {} page table entries",
                occupied,
                self.page_table.len()
            )));
        }
        Ok(())
    }

    fn slot_mut(frames: &mut [Frame], frame_id: FrameId) -> Result<&mut Frame> {
        let capacity = frames.len();
        frames.get_mut(frame_id.index()).ok_or_else(|| {
            Error::Inconsistent(format!("{} outside a pool of {} frames", frame_id, capacity))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(pid: u32, page: u32) -> PageKey {
        PageKey::new(pid, page)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(FramePool::new(0), Err(Error::InvalidFrameCount(0))));
    }

    #[test]
    fn test_new_pool_is_empty() {
        let pool = FramePool::new(3).unwrap();
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.resident_count(), 0);
        assert_eq!(pool.snapshot(), vec![None, None, None]);
        assert!(pool.check_consistency().is_ok());
    }

    #[test]
    fn test_allocate_returns_lowest_free() {
        let mut pool = FramePool::new(3).unwrap();
        assert_eq!(pool.allocate_free_frame(), Some(FrameId::new(0)));

        pool.assign(FrameId::new(0), key(1, 1)).unwrap();
        pool.assign(FrameId::new(2), key(1, 2)).unwrap();
        assert_eq!(pool.allocate_free_frame(), Some(FrameId::new(1)));

        pool.assign(FrameId::new(1), key(1, 3)).unwrap();
        assert_eq!(pool.allocate_free_frame(), None);
        assert!(pool.is_full());

        pool.evict(FrameId::new(0)).unwrap();
        assert_eq!(pool.allocate_free_frame(), Some(FrameId::new(0)));
    }

    #[test]
    fn test_assign_replaces_prior_owner() {
        let mut pool = FramePool::new(1).unwrap();
        assert_eq!(pool.assign(FrameId::new(0), key(1, 1)).unwrap(), None);
        assert_eq!(
            pool.assign(FrameId::new(0), key(2, 5)).unwrap(),
            Some(key(1, 1))
        );

        assert_eq!(pool.lookup(key(1, 1)), None);
        assert_eq!(pool.lookup(key(2, 5)), Some(FrameId::new(0)));
        assert!(pool.frame(FrameId::new(0)).is_referenced());
        assert!(pool.check_consistency().is_ok());
    }

    #[test]
    fn test_assign_rejects_duplicate_residency() {
        let mut pool = FramePool::new(2).unwrap();
        pool.assign(FrameId::new(0), key(1, 1)).unwrap();

        let err = pool.assign(FrameId::new(1), key(1, 1)).unwrap_err();
        assert!(matches!(err, Error::Inconsistent(_)));
        assert!(pool.frame(FrameId::new(1)).is_empty());
    }

    #[test]
    fn test_assign_out_of_range() {
        let mut pool = FramePool::new(2).unwrap();
        let err = pool.assign(FrameId::new(5), key(1, 1)).unwrap_err();
        assert!(matches!(err, Error::Inconsistent(_)));
    }

    #[test]
    fn test_evict() {
        let mut pool = FramePool::new(2).unwrap();
        pool.assign(FrameId::new(1), key(3, 4)).unwrap();

        assert_eq!(pool.evict(FrameId::new(1)).unwrap(), key(3, 4));
        assert!(pool.frame(FrameId::new(1)).is_empty());
        assert!(!pool.frame(FrameId::new(1)).is_referenced());
        assert_eq!(pool.lookup(key(3, 4)), None);
        assert!(matches!(
            pool.evict(FrameId::new(1)),
            Err(Error::EmptyFrame(FrameId(1)))
        ));
    }

    #[test]
    fn test_set_referenced() {
        let mut pool = FramePool::new(2).unwrap();
        pool.assign(FrameId::new(0), key(1, 1)).unwrap();

        pool.set_referenced(FrameId::new(0), false).unwrap();
        assert!(!pool.frame(FrameId::new(0)).is_referenced());

        assert!(matches!(
            pool.set_referenced(FrameId::new(1), true),
            Err(Error::EmptyFrame(_))
        ));
    }

    #[test]
    fn test_resident_in_frame_order() {
        let mut pool = FramePool::new(3).unwrap();
        pool.assign(FrameId::new(2), key(1, 9)).unwrap();
        pool.assign(FrameId::new(0), key(2, 8)).unwrap();

        let resident: Vec<_> = pool.resident().collect();
        assert_eq!(
            resident,
            vec![(FrameId::new(0), key(2, 8)), (FrameId::new(2), key(1, 9))]
        );
    }

    #[test]
    fn test_reset() {
        let mut pool = FramePool::new(2).unwrap();
        pool.assign(FrameId::new(0), key(1, 1)).unwrap();
        pool.assign(FrameId::new(1), key(1, 2)).unwrap();

        pool.reset();
        assert_eq!(pool.resident_count(), 0);
        assert_eq!(pool.snapshot(), vec![None, None]);
        assert!(pool.check_consistency().is_ok());
    }
}
