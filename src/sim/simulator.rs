//! Step Executor - drives one run over the scheduled trace.
//!
//! For every reference, in order:
//! 1. look the page up in the page table
//! 2. on a hit, report it to the policy
//! 3. on a fault, take the lowest free frame or evict the policy's
//!    victim, load the page, then report it
//! 4. append a snapshot of every frame to the timeline

use tracing::{debug, info, trace};

use crate::common::{Result, SimConfig};
use crate::memory::replacer::{Access, Algorithm, EvictionPolicy, Replacer};
use crate::memory::FramePool;
use crate::sim::{RunResult, Timeline, TimelineEntry};
use crate::trace::{ReferenceEvent, ReferenceSource};

/// Lifecycle of a [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Fresh state, ready to run.
    Reset,
    /// Processing references.
    Running,
    /// Every reference processed.
    Completed,
}

/// Executes a fixed trace against a frame pool under one policy.
///
/// Construction validates the whole configuration, so a bad input never
/// yields a partial run. Every call to [`run`](Simulator::run) starts from
/// empty frames, an empty page table and fresh policy bookkeeping.
///
/// # Usage
/// ```
/// use pagesim::{Algorithm, ReferenceSource, SimConfig, Simulator};
///
/// let source = ReferenceSource::per_process([(1, vec![1, 2, 1, 2])]);
/// let mut sim = Simulator::new(SimConfig::new(1, Algorithm::Fifo, source)).unwrap();
///
/// let result = sim.run().unwrap();
/// assert_eq!(result.total_faults(), 4);
/// ```
#[derive(Debug)]
pub struct Simulator {
    algorithm: Algorithm,
    trace: Vec<ReferenceEvent>,
    pool: FramePool,
    policy: EvictionPolicy,
    state: RunState,
}

impl Simulator {
    /// Validate `config` and schedule its trace.
    ///
    /// # Errors
    /// - `Error::InvalidFrameCount` if `num_frames` is 0
    /// - `Error::DemandPagingRequired` if demand paging is disabled
    /// - `Error::EmptyTrace` / `Error::EmptySequence` for empty input
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let trace = config.source.schedule()?;
        debug!(
            processes = config.source.processes().len(),
            references = trace.len(),
            "scheduled trace"
        );
        let pool = FramePool::new(config.num_frames)?;
        let policy = EvictionPolicy::new(config.algorithm, Some(&trace))?;

        Ok(Self {
            algorithm: config.algorithm,
            trace,
            pool,
            policy,
            state: RunState::Reset,
        })
    }

    /// Policy used by this simulator.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of frames in the pool.
    pub fn num_frames(&self) -> usize {
        self.pool.capacity()
    }

    /// The scheduled global trace.
    pub fn trace(&self) -> &[ReferenceEvent] {
        &self.trace
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Frame state as left by the last run.
    pub fn pool(&self) -> &FramePool {
        &self.pool
    }

    /// Process the whole trace and return its timeline.
    ///
    /// # Errors
    /// Only invariant violations, which indicate a simulator bug. The run
    /// is abandoned and no result is returned.
    pub fn run(&mut self) -> Result<RunResult> {
        self.reset()?;
        self.state = RunState::Running;
        info!(
            algorithm = %self.algorithm,
            frames = self.pool.capacity(),
            references = self.trace.len(),
            "starting run"
        );

        let mut timeline = Timeline::with_capacity(self.trace.len());
        for event in &self.trace {
            let entry = Self::step(&mut self.pool, &mut self.policy, event)?;
            timeline.record(entry);
        }

        self.state = RunState::Completed;
        info!(
            algorithm = %self.algorithm,
            references = timeline.len(),
            faults = timeline.faults(),
            "run complete"
        );
        Ok(timeline.finish(self.algorithm, self.pool.capacity()))
    }

    /// Return all mutable state to empty.
    fn reset(&mut self) -> Result<()> {
        self.pool.reset();
        self.policy = EvictionPolicy::new(self.algorithm, Some(&self.trace))?;
        self.state = RunState::Reset;
        Ok(())
    }

    /// Process one reference.
    fn step(
        pool: &mut FramePool,
        policy: &mut EvictionPolicy,
        event: &ReferenceEvent,
    ) -> Result<TimelineEntry> {
        let key = event.key();

        let (frame_id, hit, evicted) = match pool.lookup(key) {
            Some(frame_id) => {
                trace!(step = event.step, %key, %frame_id, "hit");
                (frame_id, true, None)
            }
            None => {
                let (frame_id, evicted) = match pool.allocate_free_frame() {
                    Some(frame_id) => (frame_id, None),
                    None => {
                        let victim = policy.select_victim(pool, event)?;
                        let owner = pool.evict(victim)?;
                        debug!(step = event.step, frame_id = %victim, evicted = %owner, "evict");
                        (victim, Some(owner))
                    }
                };
                pool.assign(frame_id, key)?;
                debug!(
                    step = event.step,
                    %key,
                    %frame_id,
                    resident = pool.page_table().resident_pages(event.pid),
                    "page fault"
                );
                (frame_id, false, evicted)
            }
        };

        let access = Access {
            step: event.step,
            key,
            frame: frame_id,
            hit,
        };
        policy.record_access(&access, pool)?;
        pool.check_consistency()?;

        Ok(TimelineEntry {
            step: event.step,
            pid: event.pid,
            page: event.page,
            fault: !hit,
            frames: pool.snapshot(),
            loaded_into: if hit { None } else { Some(frame_id) },
            evicted,
        })
    }
}

/// Build a simulator from `config` and run it once.
pub fn simulate(config: SimConfig) -> Result<RunResult> {
    Simulator::new(config)?.run()
}

/// Run every algorithm over the trace and frame count of `config`.
///
/// `config.algorithm` is ignored. Results come back in [`Algorithm::ALL`]
/// order.
///
/// # Errors
/// Same as [`Simulator::new`]; the configuration is validated once up
/// front.
pub fn compare(config: &SimConfig) -> Result<Vec<(Algorithm, RunResult)>> {
    config.validate()?;
    let num_frames = config.num_frames;
    let trace = config.source.schedule()?;
    let shared = ReferenceSource::Explicit(trace.iter().map(|e| (e.pid, e.page)).collect());

    Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            let config = SimConfig::new(num_frames, algorithm, shared.clone());
            simulate(config).map(|result| (algorithm, result))
        })
        .collect()
}
