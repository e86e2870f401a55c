//! Run statistics.

use std::fmt;

use serde::Serialize;

use crate::sim::TimelineEntry;

/// Aggregate counters for one run.
///
/// # Example
/// ```
/// use pagesim::{simulate, Algorithm, ReferenceSource, SimConfig};
///
/// let source = ReferenceSource::per_process([(1, vec![1, 2, 1])]);
/// let result = simulate(SimConfig::new(2, Algorithm::Lru, source)).unwrap();
///
/// let stats = result.stats();
/// assert_eq!(stats.faults, 2);
/// assert_eq!(stats.hits, 1);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// References processed.
    pub references: u64,
    /// References that found their page resident.
    pub hits: u64,
    /// References that faulted.
    pub faults: u64,
    /// Faults that had to reclaim an occupied frame.
    pub evictions: u64,
}

impl RunStats {
    /// Count a finished timeline.
    pub fn from_timeline(timeline: &[TimelineEntry]) -> Self {
        let mut stats = RunStats::default();
        for entry in timeline {
            stats.references += 1;
            if entry.fault {
                stats.faults += 1;
            } else {
                stats.hits += 1;
            }
            if entry.evicted.is_some() {
                stats.evictions += 1;
            }
        }
        stats
    }

    /// Hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.references == 0 {
            0.0
        } else {
            self.hits as f64 / self.references as f64
        }
    }

    /// Fault rate (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        if self.references == 0 {
            0.0
        } else {
            self.faults as f64 / self.references as f64
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ references: {}, hits: {}, faults: {}, evictions: {}, fault_rate: {:.2}% }}",
            self.references,
            self.hits,
            self.faults,
            self.evictions,
            self.fault_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{PageId, PageKey, ProcessId};

    fn entry(fault: bool, evicted: Option<PageKey>) -> TimelineEntry {
        TimelineEntry {
            step: 0,
            pid: ProcessId(1),
            page: PageId(1),
            fault,
            frames: vec![],
            loaded_into: None,
            evicted,
        }
    }

    #[test]
    fn test_stats_empty() {
        let stats = RunStats::from_timeline(&[]);
        assert_eq!(stats, RunStats::default());
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.fault_rate(), 0.0);
    }

    #[test]
    fn test_stats_counts() {
        let timeline = vec![
            entry(true, None),
            entry(false, None),
            entry(true, Some(PageKey::new(1, 1))),
            entry(false, None),
        ];
        let stats = RunStats::from_timeline(&timeline);

        assert_eq!(stats.references, 4);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.faults, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_stats_display() {
        let stats = RunStats {
            references: 4,
            hits: 1,
            faults: 3,
            evictions: 2,
        };
        let display = format!("{}", stats);

        assert!(display.contains("faults: 3"));
        assert!(display.contains("evictions: 2"));
        assert!(display.contains("75.00%"));
    }
}
