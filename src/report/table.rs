//! Console rendering of a run timeline.

use std::fmt::Write;

use crate::sim::RunResult;

/// Render `result` as a fixed-width table followed by a summary line.
///
/// Fault rows are marked with `*`; rows that evicted a page name it in
/// the last column.
pub fn render_table(result: &RunResult) -> String {
    let frames = result.num_frames();
    let width = result
        .timeline()
        .iter()
        .flat_map(|entry| entry.frame_labels())
        .map(|label| label.len())
        .max()
        .unwrap_or(0)
        .max("frame_".len() + frames.saturating_sub(1).to_string().len());
    let ref_width = result
        .timeline()
        .iter()
        .map(|entry| entry.key().to_string().len())
        .max()
        .unwrap_or(0)
        .max("ref".len());

    let mut out = String::new();
    let _ = write!(
        out,
        "{:>5}  {:<ref_width$} {:<5}",
        "step",
        "ref",
        "fault",
        ref_width = ref_width
    );
    for i in 0..frames {
        let _ = write!(out, " {:<width$}", format!("frame_{}", i), width = width);
    }
    let _ = writeln!(out, " evicted");

    for entry in result.timeline() {
        let _ = write!(
            out,
            "{:>5}  {:<ref_width$} {:<5}",
            entry.step,
            entry.key().to_string(),
            if entry.fault { "*" } else { "" },
            ref_width = ref_width
        );
        for label in entry.frame_labels() {
            let _ = write!(out, " {:<width$}", label, width = width);
        }
        match entry.evicted {
            Some(key) => {
                let _ = writeln!(out, " {}", key);
            }
            None => {
                let _ = writeln!(out, " -");
            }
        }
    }

    let _ = writeln!(
        out,
        "{} with {} frames: {} faults",
        result.algorithm(),
        frames,
        result.total_faults()
    );
    let _ = writeln!(out, "{}", result.stats());
    out
}
