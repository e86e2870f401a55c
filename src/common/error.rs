//! Error types for pagesim.

use thiserror::Error;

use super::{FrameId, ProcessId};

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagesim.
///
/// Three families, all surfaced to the caller without retry:
/// - configuration errors, rejected before a run starts
/// - policy precondition violations (Optimal without its lookahead)
/// - invariant violations, which indicate a bug in the simulator itself
#[derive(Debug, Error)]
pub enum Error {
    /// The frame pool needs at least one frame.
    #[error("invalid frame count {0}: the pool needs at least one frame")]
    InvalidFrameCount(usize),

    /// The reference source produced no references at all.
    #[error("reference trace is empty")]
    EmptyTrace,

    /// A process was given an empty reference sequence.
    #[error("process {0} has an empty reference sequence")]
    EmptySequence(ProcessId),

    /// A textual reference could not be parsed.
    #[error("malformed reference `{0}`")]
    MalformedReference(String),

    /// An algorithm name did not match any known policy.
    #[error("unknown algorithm `{0}` (expected fifo, lru, optimal or clock)")]
    UnknownAlgorithm(String),

    /// Only demand paging is supported.
    #[error("demand paging is the only supported load discipline")]
    DemandPagingRequired,

    /// A configuration document failed to deserialize.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Optimal replacement was requested without the full reference trace.
    #[error("optimal replacement requires the complete reference trace up front")]
    LookaheadRequired,

    /// Optimal replacement was consulted about a step its trace does not cover.
    #[error("optimal replacement has no lookahead for step {step}")]
    LookaheadExhausted { step: usize },

    /// Victim selection ran with no resident frames to choose from.
    ///
    /// This indicates a bug: selection only happens when the pool is full.
    #[error("no resident frame available for eviction")]
    NoResidentFrames,

    /// An operation that needs an owner was applied to an empty frame.
    #[error("{0} is empty")]
    EmptyFrame(FrameId),

    /// The frame pool and page table disagree.
    #[error("page table inconsistent with frame pool: {0}")]
    Inconsistent(String),

    /// I/O error while exporting a run.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error was raised while validating input, before any run.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidFrameCount(_)
                | Error::EmptyTrace
                | Error::EmptySequence(_)
                | Error::MalformedReference(_)
                | Error::UnknownAlgorithm(_)
                | Error::DemandPagingRequired
                | Error::Config(_)
        )
    }
}
