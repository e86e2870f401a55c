//! CLOCK (second chance) replacement policy.

use tracing::trace;

use super::{Access, Replacer};
use crate::common::{Error, FrameId, Result};
use crate::memory::FramePool;
use crate::trace::ReferenceEvent;

/// Circular scan over frames using each frame's reference bit.
///
/// Loads set the bit (done by [`FramePool::assign`]); hits set it again.
/// On eviction the hand clears set bits until it finds a clear one, which
/// is the victim. The hand then rests just past the victim. At most two
/// sweeps are needed.
#[derive(Debug, Clone, Default)]
pub struct ClockReplacer {
    hand: FrameId,
}

impl ClockReplacer {
    /// Create a replacer with the hand at frame 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current hand position.
    pub fn hand(&self) -> FrameId {
        self.hand
    }
}

impl Replacer for ClockReplacer {
    fn record_access(&mut self, access: &Access, pool: &mut FramePool) -> Result<()> {
        if access.hit {
            pool.set_referenced(access.frame, true)?;
        }
        Ok(())
    }

    fn select_victim(
        &mut self,
        pool: &mut FramePool,
        _incoming: &ReferenceEvent,
    ) -> Result<FrameId> {
        let capacity = pool.capacity();
        if self.hand.index() >= capacity {
            self.hand = FrameId::new(0);
        }

        for _ in 0..2 * capacity {
            let current = self.hand;
            self.hand = current.next_in(capacity);

            let frame = pool.frame(current);
            if frame.is_empty() {
                continue;
            }
            if !frame.is_referenced() {
                return Ok(current);
            }
            trace!(frame_id = %current, "second chance");
            pool.set_referenced(current, false)?;
        }
        Err(Error::NoResidentFrames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PageKey;

    fn full_pool(pages: &[u32]) -> FramePool {
        let mut pool = FramePool::new(pages.len()).unwrap();
        for (i, &page) in pages.iter().enumerate() {
            pool.assign(FrameId::new(i), PageKey::new(1, page)).unwrap();
        }
        pool
    }

    fn incoming() -> ReferenceEvent {
        ReferenceEvent::new(0, 1, 99)
    }

    #[test]
    fn test_clock_all_referenced_sweeps_once() {
        let mut pool = full_pool(&[1, 2, 3]);
        let mut replacer = ClockReplacer::new();

        // Every bit set: first sweep clears them, frame 0 is the victim.
        let victim = replacer.select_victim(&mut pool, &incoming()).unwrap();
        assert_eq!(victim, FrameId::new(0));
        assert_eq!(replacer.hand(), FrameId::new(1));
        assert!(!pool.frame(FrameId::new(1)).is_referenced());
        assert!(!pool.frame(FrameId::new(2)).is_referenced());
    }

    #[test]
    fn test_clock_second_chance() {
        let mut pool = full_pool(&[1, 2, 3]);
        let mut replacer = ClockReplacer::new();
        pool.set_referenced(FrameId::new(0), false).unwrap();
        pool.set_referenced(FrameId::new(2), false).unwrap();

        // Frame 0 clear: victim without touching the others.
        assert_eq!(
            replacer.select_victim(&mut pool, &incoming()).unwrap(),
            FrameId::new(0)
        );
        assert!(pool.frame(FrameId::new(1)).is_referenced());

        // Hand at 1: frame 1 gets a second chance, frame 2 goes.
        assert_eq!(
            replacer.select_victim(&mut pool, &incoming()).unwrap(),
            FrameId::new(2)
        );
        assert!(!pool.frame(FrameId::new(1)).is_referenced());
        assert_eq!(replacer.hand(), FrameId::new(0));
    }

    #[test]
    fn test_clock_hit_sets_bit() {
        let mut pool = full_pool(&[1, 2]);
        let mut replacer = ClockReplacer::new();
        pool.set_referenced(FrameId::new(0), false).unwrap();

        let hit = Access {
            step: 2,
            key: PageKey::new(1, 1),
            frame: FrameId::new(0),
            hit: true,
        };
        replacer.record_access(&hit, &mut pool).unwrap();
        assert!(pool.frame(FrameId::new(0)).is_referenced());
    }

    #[test]
    fn test_clock_wraps_hand() {
        let mut pool = full_pool(&[1]);
        let mut replacer = ClockReplacer::new();

        assert_eq!(
            replacer.select_victim(&mut pool, &incoming()).unwrap(),
            FrameId::new(0)
        );
        assert_eq!(replacer.hand(), FrameId::new(0));
    }

    #[test]
    fn test_clock_empty_pool() {
        let mut pool = FramePool::new(2).unwrap();
        let mut replacer = ClockReplacer::new();
        assert!(matches!(
            replacer.select_victim(&mut pool, &incoming()),
            Err(Error::NoResidentFrames)
        ));
    }
}
