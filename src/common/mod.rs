//! Common types shared across pagesim.
//!
//! This module contains the fundamental primitives:
//! - Configuration ([`SimConfig`] and constants)
//! - Error types
//! - Identifiers (ProcessId, PageId, PageKey, FrameId)

pub mod config;
pub mod error;
mod frame_id;
mod page_id;
mod process_id;

pub use config::SimConfig;
pub use error::{Error, Result};
pub use frame_id::FrameId;
pub use page_id::PageId;
pub use process_id::{PageKey, ProcessId};
