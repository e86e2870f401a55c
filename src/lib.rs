//! pagesim - A deterministic page replacement simulator with swappable
//! eviction policies.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            pagesim                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Trace Scheduler (trace/)                 │   │
//! │  │     explicit sequence  ─OR─  round-robin per process     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Step Executor (sim/)                        │   │
//! │  │        Simulator → Timeline → RunResult                  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │       Physical Memory (memory/)  [Policy per run]       │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │   Eviction Policies: FIFO | LRU | OPT | CLOCK   │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │          FramePool + Frame + PageTable                   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        Reports (report/): CSV export, console table      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (ids, Error, SimConfig)
//! - [`memory`] - Frames, page tables and eviction policies
//! - [`trace`] - Reference events and scheduling
//! - [`sim`] - The step executor and run results
//! - [`report`] - Renderers that read a finished run
//!
//! # Quick Start
//! ```
//! use pagesim::{simulate, Algorithm, ReferenceSource, SimConfig};
//!
//! let source = ReferenceSource::per_process([
//!     (1, vec![1, 2, 3, 2, 4, 1, 5]),
//!     (2, vec![2, 3, 2, 1, 4]),
//! ]);
//!
//! let lru = simulate(SimConfig::new(3, Algorithm::Lru, source.clone())).unwrap();
//! let opt = simulate(SimConfig::new(3, Algorithm::Optimal, source)).unwrap();
//! assert!(opt.total_faults() <= lru.total_faults());
//! ```

pub mod common;
pub mod memory;
pub mod report;
pub mod sim;
pub mod trace;

// Re-export commonly used items at crate root for convenience
pub use common::{Error, FrameId, PageId, PageKey, ProcessId, Result, SimConfig};

pub use memory::replacer::{Algorithm, EvictionPolicy, Replacer};
pub use memory::{Frame, FramePool, PageTable};
pub use sim::{compare, simulate, RunResult, RunState, RunStats, Simulator, TimelineEntry};
pub use trace::{ReferenceEvent, ReferenceSource};
