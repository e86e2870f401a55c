//! Eviction policy implementations (replacers).
//!
//! Four interchangeable policies, chosen once per run:
//! - [`FifoReplacer`] - First-In-First-Out by load order
//! - [`LruReplacer`] - Least Recently Used, counting hits and loads
//! - [`OptimalReplacer`] - Belady's MIN, needs the whole trace up front
//! - [`ClockReplacer`] - Second chance over per-frame reference bits
//!
//! Each policy owns only its bookkeeping. Frame state belongs to the
//! [`FramePool`]; policies read it and, for Clock, flip reference bits
//! through the pool's narrow setters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{Error, FrameId, PageKey, Result};
use crate::memory::FramePool;
use crate::trace::ReferenceEvent;

mod clock;
mod fifo;
mod lru;
mod optimal;

pub use clock::ClockReplacer;
pub use fifo::FifoReplacer;
pub use lru::LruReplacer;
pub use optimal::OptimalReplacer;

/// One processed reference, reported to the policy after the frame pool
/// has been updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    /// Global step index of the reference.
    pub step: usize,
    /// The referenced page.
    pub key: PageKey,
    /// Frame the page is resident in after the reference.
    pub frame: FrameId,
    /// Whether the page was already resident.
    pub hit: bool,
}

/// Interface shared by all eviction policies.
pub trait Replacer {
    /// Called for every reference, hit or fault, after the page table has
    /// been updated.
    fn record_access(&mut self, access: &Access, pool: &mut FramePool) -> Result<()>;

    /// Choose a resident frame to reclaim so `incoming` can be loaded.
    ///
    /// Only called when the reference faulted and the pool is full. Must
    /// return an occupied frame.
    fn select_victim(&mut self, pool: &mut FramePool, incoming: &ReferenceEvent)
        -> Result<FrameId>;
}

/// Replacement algorithm selector.
///
/// # Example
/// ```
/// use pagesim::Algorithm;
///
/// let algorithm: Algorithm = "opt".parse().unwrap();
/// assert_eq!(algorithm, Algorithm::Optimal);
/// assert_eq!(algorithm.to_string(), "Optimal");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Fifo,
    Lru,
    #[serde(alias = "opt")]
    Optimal,
    Clock,
}

impl Algorithm {
    /// Every algorithm, in comparison order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fifo,
        Algorithm::Lru,
        Algorithm::Optimal,
        Algorithm::Clock,
    ];

    /// Whether the policy needs the complete trace before the run starts.
    #[inline]
    pub fn needs_lookahead(self) -> bool {
        matches!(self, Algorithm::Optimal)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Fifo => "FIFO",
            Algorithm::Lru => "LRU",
            Algorithm::Optimal => "Optimal",
            Algorithm::Clock => "Clock",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Algorithm::Fifo),
            "lru" => Ok(Algorithm::Lru),
            "opt" | "optimal" => Ok(Algorithm::Optimal),
            "clock" => Ok(Algorithm::Clock),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// The closed set of policies, dispatched statically per run.
#[derive(Debug, Clone)]
pub enum EvictionPolicy {
    Fifo(FifoReplacer),
    Lru(LruReplacer),
    Optimal(OptimalReplacer),
    Clock(ClockReplacer),
}

impl EvictionPolicy {
    /// Build fresh bookkeeping for `algorithm`.
    ///
    /// `lookahead` is the complete reference trace. Only Optimal uses it.
    ///
    /// # Errors
    /// - `Error::LookaheadRequired` if Optimal is requested without a trace
    pub fn new(algorithm: Algorithm, lookahead: Option<&[ReferenceEvent]>) -> Result<Self> {
        Ok(match algorithm {
            Algorithm::Fifo => EvictionPolicy::Fifo(FifoReplacer::new()),
            Algorithm::Lru => EvictionPolicy::Lru(LruReplacer::new()),
            Algorithm::Optimal => {
                let trace = lookahead.ok_or(Error::LookaheadRequired)?;
                EvictionPolicy::Optimal(OptimalReplacer::new(trace)?)
            }
            Algorithm::Clock => EvictionPolicy::Clock(ClockReplacer::new()),
        })
    }

    /// Which algorithm this policy implements.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            EvictionPolicy::Fifo(_) => Algorithm::Fifo,
            EvictionPolicy::Lru(_) => Algorithm::Lru,
            EvictionPolicy::Optimal(_) => Algorithm::Optimal,
            EvictionPolicy::Clock(_) => Algorithm::Clock,
        }
    }
}

impl Replacer for EvictionPolicy {
    fn record_access(&mut self, access: &Access, pool: &mut FramePool) -> Result<()> {
        match self {
            EvictionPolicy::Fifo(r) => r.record_access(access, pool),
            EvictionPolicy::Lru(r) => r.record_access(access, pool),
            EvictionPolicy::Optimal(r) => r.record_access(access, pool),
            EvictionPolicy::Clock(r) => r.record_access(access, pool),
        }
    }

    fn select_victim(
        &mut self,
        pool: &mut FramePool,
        incoming: &ReferenceEvent,
    ) -> Result<FrameId> {
        match self {
            EvictionPolicy::Fifo(r) => r.select_victim(pool, incoming),
            EvictionPolicy::Lru(r) => r.select_victim(pool, incoming),
            EvictionPolicy::Optimal(r) => r.select_victim(pool, incoming),
            EvictionPolicy::Clock(r) => r.select_victim(pool, incoming),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("FIFO".parse::<Algorithm>().unwrap(), Algorithm::Fifo);
        assert_eq!("lru".parse::<Algorithm>().unwrap(), Algorithm::Lru);
        assert_eq!("Optimal".parse::<Algorithm>().unwrap(), Algorithm::Optimal);
        assert_eq!(" clock ".parse::<Algorithm>().unwrap(), Algorithm::Clock);
        assert!(matches!(
            "random".parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_algorithm_display_round_trips() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_optimal_requires_lookahead() {
        assert!(matches!(
            EvictionPolicy::new(Algorithm::Optimal, None),
            Err(Error::LookaheadRequired)
        ));
        assert!(Algorithm::Optimal.needs_lookahead());
        assert!(!Algorithm::Clock.needs_lookahead());
    }

    #[test]
    fn test_policy_reports_algorithm() {
        let trace = [ReferenceEvent::new(0, 1, 1)];
        for algorithm in Algorithm::ALL {
            let policy = EvictionPolicy::new(algorithm, Some(&trace)).unwrap();
            assert_eq!(policy.algorithm(), algorithm);
        }
    }
}
