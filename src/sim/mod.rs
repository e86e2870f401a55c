//! Simulation driver.
//!
//! # Components
//! - [`Simulator`] - The step executor and run lifecycle
//! - [`Timeline`] - Recorder producing the [`RunResult`]
//! - [`RunStats`] - Aggregate counters over a run

mod simulator;
mod stats;
mod timeline;

pub use simulator::{compare, simulate, RunState, Simulator};
pub use stats::RunStats;
pub use timeline::{slot_label, RunResult, Timeline, TimelineEntry};
