//! Timeline Recorder - one immutable snapshot per processed reference.

use serde::Serialize;

use crate::common::config::EMPTY_SLOT_LABEL;
use crate::common::{FrameId, PageId, PageKey, ProcessId};
use crate::memory::replacer::Algorithm;
use crate::sim::RunStats;

/// State of memory right after one reference was processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Global step index.
    pub step: usize,
    /// Referencing process.
    pub pid: ProcessId,
    /// Referenced page.
    pub page: PageId,
    /// Whether the reference faulted.
    pub fault: bool,
    /// Owner of every frame, in frame-index order.
    pub frames: Vec<Option<PageKey>>,
    /// Frame the page was loaded into, on a fault.
    pub loaded_into: Option<FrameId>,
    /// Page evicted to make room, if any.
    pub evicted: Option<PageKey>,
}

impl TimelineEntry {
    /// The referenced `(process, page)` pair.
    #[inline]
    pub fn key(&self) -> PageKey {
        PageKey {
            pid: self.pid,
            page: self.page,
        }
    }

    /// Frame cells rendered as `Empty` or `P<pid>:Pg<page>`.
    pub fn frame_labels(&self) -> Vec<String> {
        self.frames.iter().map(|slot| slot_label(*slot)).collect()
    }
}

/// Render one frame slot.
pub fn slot_label(slot: Option<PageKey>) -> String {
    match slot {
        Some(key) => key.to_string(),
        None => EMPTY_SLOT_LABEL.to_string(),
    }
}

/// Append-only sink for timeline entries.
#[derive(Debug, Default)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    faults: u64,
}

impl Timeline {
    /// Create an empty recorder sized for `references` entries.
    pub fn with_capacity(references: usize) -> Self {
        Self {
            entries: Vec::with_capacity(references),
            faults: 0,
        }
    }

    /// Append an entry, counting it if it faulted.
    pub fn record(&mut self, entry: TimelineEntry) {
        if entry.fault {
            self.faults += 1;
        }
        self.entries.push(entry);
    }

    /// Faults recorded so far.
    pub fn faults(&self) -> u64 {
        self.faults
    }

    /// Entries recorded so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seal the recorder into a run result.
    pub fn finish(self, algorithm: Algorithm, num_frames: usize) -> RunResult {
        RunResult {
            algorithm,
            num_frames,
            total_faults: self.faults,
            timeline: self.entries,
        }
    }
}

/// The outcome of one complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    algorithm: Algorithm,
    num_frames: usize,
    total_faults: u64,
    timeline: Vec<TimelineEntry>,
}

impl RunResult {
    /// Total page faults.
    #[inline]
    pub fn total_faults(&self) -> u64 {
        self.total_faults
    }

    /// Every entry, in step order.
    #[inline]
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Policy the run used.
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Frame pool size of the run.
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Aggregate counters for the run.
    pub fn stats(&self) -> RunStats {
        RunStats::from_timeline(&self.timeline)
    }

    /// CRC32 over the canonical encoding of the timeline.
    ///
    /// Two runs with the same configuration and input give the same value.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&(self.num_frames as u64).to_le_bytes());
        for entry in &self.timeline {
            hasher.update(&(entry.step as u64).to_le_bytes());
            hasher.update(&entry.pid.0.to_le_bytes());
            hasher.update(&entry.page.0.to_le_bytes());
            hasher.update(&[entry.fault as u8]);
            for slot in &entry.frames {
                match slot {
                    Some(key) => {
                        hasher.update(&[1]);
                        hasher.update(&key.pid.0.to_le_bytes());
                        hasher.update(&key.page.0.to_le_bytes());
                    }
                    None => hasher.update(&[0]),
                }
            }
        }
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(step: usize, page: u32, fault: bool, frames: Vec<Option<PageKey>>) -> TimelineEntry {
        TimelineEntry {
            step,
            pid: ProcessId(1),
            page: PageId(page),
            fault,
            frames,
            loaded_into: None,
            evicted: None,
        }
    }

    #[test]
    fn test_slot_labels() {
        let e = entry(0, 3, true, vec![Some(PageKey::new(1, 3)), None]);
        assert_eq!(e.frame_labels(), vec!["P1:Pg3", "Empty"]);
        assert_eq!(e.key(), PageKey::new(1, 3));
    }

    #[test]
    fn test_recorder_counts_faults() {
        let mut timeline = Timeline::with_capacity(3);
        assert!(timeline.is_empty());

        timeline.record(entry(0, 1, true, vec![Some(PageKey::new(1, 1))]));
        timeline.record(entry(1, 1, false, vec![Some(PageKey::new(1, 1))]));
        timeline.record(entry(2, 2, true, vec![Some(PageKey::new(1, 2))]));

        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.faults(), 2);

        let result = timeline.finish(Algorithm::Fifo, 1);
        assert_eq!(result.total_faults(), 2);
        assert_eq!(result.timeline().len(), 3);
        assert_eq!(result.algorithm(), Algorithm::Fifo);
        assert_eq!(result.num_frames(), 1);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let build = |fault: bool| {
            let mut timeline = Timeline::default();
            timeline.record(entry(0, 1, fault, vec![Some(PageKey::new(1, 1)), None]));
            timeline.finish(Algorithm::Lru, 2)
        };

        assert_eq!(build(true).fingerprint(), build(true).fingerprint());
        assert_ne!(build(true).fingerprint(), build(false).fingerprint());
    }
}
