//! Reference traces.
//!
//! The scheduler is a pure transform from a [`ReferenceSource`] to the
//! step-numbered global trace the simulator executes, so explicit and
//! interleaved inputs share one execution path.

mod event;
mod parse;
mod scheduler;

pub use event::ReferenceEvent;
pub use parse::{parse_pages, parse_process, parse_sequence};
pub use scheduler::{interleave, ReferenceSource};
