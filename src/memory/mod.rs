//! Physical memory model.
//!
//! A fixed pool of frames shared by every simulated process, the
//! per-process page tables that index it, and the eviction policies that
//! pick victims when it is full.
//!
//! # Components
//! - [`FramePool`] - Frames plus page table, mutated only via assign/evict
//! - [`Frame`] - A slot holding one page and a reference bit
//! - [`PageTable`] - Per-process page to frame mappings
//! - [`replacer`] - Eviction policy implementations

mod frame;
mod frame_pool;
mod page_table;
pub mod replacer;

pub use frame::Frame;
pub use frame_pool::FramePool;
pub use page_table::PageTable;
