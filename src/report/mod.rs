//! Consumers of a finished [`RunResult`](crate::RunResult).
//!
//! Nothing here touches simulation state; both renderers only read the
//! timeline.

mod csv;
mod table;

pub use csv::{csv_header, export_csv, write_csv};
pub use table::render_table;
