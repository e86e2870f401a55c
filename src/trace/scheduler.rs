//! Trace Scheduler - turns a reference source into one global sequence.
//!
//! Two input modes share everything downstream:
//! - an explicit global sequence, used as-is
//! - per-process sequences, interleaved round-robin in ascending pid order

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ReferenceEvent;
use crate::common::{Error, PageId, ProcessId, Result};

/// Where a run's references come from.
///
/// # JSON form
/// `{"explicit": [[1, 1], [2, 1]]}` or
/// `{"per_process": {"1": [1, 2], "2": [1]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSource {
    /// A caller-supplied global order of `(pid, page)` references.
    Explicit(Vec<(ProcessId, PageId)>),

    /// Each process's own reference string, to be interleaved.
    PerProcess(BTreeMap<ProcessId, Vec<PageId>>),
}

impl ReferenceSource {
    /// Explicit source from raw `(pid, page)` numbers.
    pub fn explicit<I>(refs: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        ReferenceSource::Explicit(
            refs.into_iter()
                .map(|(pid, page)| (ProcessId(pid), PageId(page)))
                .collect(),
        )
    }

    /// Per-process source from raw `pid → pages` numbers.
    ///
    /// # Example
    /// ```
    /// use pagesim::ReferenceSource;
    ///
    /// let source = ReferenceSource::per_process([(1, vec![1, 2]), (2, vec![7])]);
    /// let events = source.schedule().unwrap();
    /// let pages: Vec<u32> = events.iter().map(|e| e.page.0).collect();
    /// assert_eq!(pages, vec![1, 7, 2]);
    /// ```
    pub fn per_process<I, P>(sequences: I) -> Self
    where
        I: IntoIterator<Item = (u32, P)>,
        P: IntoIterator<Item = u32>,
    {
        ReferenceSource::PerProcess(
            sequences
                .into_iter()
                .map(|(pid, pages)| (ProcessId(pid), pages.into_iter().map(PageId).collect()))
                .collect(),
        )
    }

    /// Produce the global, step-numbered trace.
    ///
    /// # Errors
    /// - `Error::EmptyTrace` if there are no references at all
    /// - `Error::EmptySequence` if a process has an empty reference string
    pub fn schedule(&self) -> Result<Vec<ReferenceEvent>> {
        let order = match self {
            ReferenceSource::Explicit(refs) => refs.clone(),
            ReferenceSource::PerProcess(sequences) => interleave(sequences)?,
        };

        if order.is_empty() {
            return Err(Error::EmptyTrace);
        }

        Ok(order
            .into_iter()
            .enumerate()
            .map(|(step, (pid, page))| ReferenceEvent { step, pid, page })
            .collect())
    }

    /// Distinct process ids in the source, ascending.
    pub fn processes(&self) -> Vec<ProcessId> {
        match self {
            ReferenceSource::Explicit(refs) => {
                let mut pids: Vec<ProcessId> = refs.iter().map(|&(pid, _)| pid).collect();
                pids.sort_unstable();
                pids.dedup();
                pids
            }
            ReferenceSource::PerProcess(sequences) => sequences.keys().copied().collect(),
        }
    }
}

/// Round-robin interleaving of per-process reference strings.
///
/// Each round visits processes in ascending id order and takes the next
/// reference from every process that still has one. Exhausted processes
/// are skipped; the result ends when all are exhausted.
///
/// # Errors
/// - `Error::EmptyTrace` if `sequences` is empty
/// - `Error::EmptySequence` if any process has no references
pub fn interleave(
    sequences: &BTreeMap<ProcessId, Vec<PageId>>,
) -> Result<Vec<(ProcessId, PageId)>> {
    if sequences.is_empty() {
        return Err(Error::EmptyTrace);
    }
    if let Some((&pid, _)) = sequences.iter().find(|(_, pages)| pages.is_empty()) {
        return Err(Error::EmptySequence(pid));
    }

    let total = sequences.values().map(Vec::len).sum();
    let mut order = Vec::with_capacity(total);
    let mut cursors: Vec<_> = sequences
        .iter()
        .map(|(&pid, pages)| (pid, pages.iter()))
        .collect();

    while order.len() < total {
        for (pid, pages) in &mut cursors {
            if let Some(&page) = pages.next() {
                order.push((*pid, page));
            }
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(events: &[ReferenceEvent]) -> Vec<(u32, u32)> {
        events.iter().map(|e| (e.pid.0, e.page.0)).collect()
    }

    #[test]
    fn test_explicit_used_as_is() {
        let source = ReferenceSource::explicit([(2, 5), (1, 5), (2, 6)]);
        let events = source.schedule().unwrap();

        assert_eq!(pairs(&events), vec![(2, 5), (1, 5), (2, 6)]);
        let steps: Vec<usize> = events.iter().map(|e| e.step).collect();
        assert_eq!(steps, vec![0, 1, 2]);
    }

    #[test]
    fn test_round_robin_ascending_pid() {
        // Insertion order must not matter, only pid order.
        let source = ReferenceSource::per_process([(2, vec![20, 21]), (1, vec![10, 11, 12])]);
        let events = source.schedule().unwrap();

        assert_eq!(
            pairs(&events),
            vec![(1, 10), (2, 20), (1, 11), (2, 21), (1, 12)]
        );
    }

    #[test]
    fn test_interleave_reference_scenario() {
        let source = ReferenceSource::per_process([
            (1, vec![1, 2, 3, 2, 4, 1, 5]),
            (2, vec![2, 3, 2, 1, 4]),
        ]);
        let events = source.schedule().unwrap();

        assert_eq!(
            pairs(&events),
            vec![
                (1, 1), (2, 2), (1, 2), (2, 3), (1, 3), (2, 2),
                (1, 2), (2, 1), (1, 4), (2, 4), (1, 1), (1, 5),
            ]
        );
    }

    #[test]
    fn test_empty_sources_rejected() {
        assert!(matches!(
            ReferenceSource::explicit(Vec::<(u32, u32)>::new()).schedule(),
            Err(Error::EmptyTrace)
        ));
        assert!(matches!(
            ReferenceSource::per_process(Vec::<(u32, Vec<u32>)>::new()).schedule(),
            Err(Error::EmptyTrace)
        ));
        assert!(matches!(
            ReferenceSource::per_process([(1, vec![1]), (3, vec![])]).schedule(),
            Err(Error::EmptySequence(ProcessId(3)))
        ));
    }

    #[test]
    fn test_processes() {
        let explicit = ReferenceSource::explicit([(3, 1), (1, 1), (3, 2)]);
        assert_eq!(explicit.processes(), vec![ProcessId(1), ProcessId(3)]);

        let per_process = ReferenceSource::per_process([(4, vec![1]), (2, vec![1])]);
        assert_eq!(per_process.processes(), vec![ProcessId(2), ProcessId(4)]);
    }

    #[test]
    fn test_serde_shape() {
        let source = ReferenceSource::per_process([(1, vec![1, 2])]);
        let json = serde_json::to_string(&source).unwrap();
        assert_eq!(json, r#"{"per_process":{"1":[1,2]}}"#);

        let back: ReferenceSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, source);
    }
}
