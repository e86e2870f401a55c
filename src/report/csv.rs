//! Delimited-file export of a run timeline.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::common::Result;
use crate::sim::RunResult;

/// Header row: `step,pid,page,fault,frame_0,...,frame_{N-1}`.
pub fn csv_header(num_frames: usize) -> String {
    let mut header = String::from("step,pid,page,fault");
    for i in 0..num_frames {
        header.push_str(&format!(",frame_{}", i));
    }
    header
}

/// Write the timeline of `result` as CSV.
///
/// One header row, then one row per timeline entry. Frame cells are
/// `Empty` or `P<pid>:Pg<page>`.
pub fn write_csv<W: Write>(result: &RunResult, mut out: W) -> Result<()> {
    writeln!(out, "{}", csv_header(result.num_frames()))?;
    for entry in result.timeline() {
        write!(
            out,
            "{},{},{},{}",
            entry.step, entry.pid.0, entry.page.0, entry.fault
        )?;
        for label in entry.frame_labels() {
            write!(out, ",{}", label)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the timeline of `result` to a CSV file at `path`.
pub fn export_csv(result: &RunResult, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    write_csv(result, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{simulate, Algorithm, ReferenceSource, SimConfig};

    fn sample() -> RunResult {
        let source = ReferenceSource::explicit([(1, 1), (2, 1), (1, 1)]);
        simulate(SimConfig::new(3, Algorithm::Fifo, source)).unwrap()
    }

    #[test]
    fn test_csv_header() {
        assert_eq!(csv_header(2), "step,pid,page,fault,frame_0,frame_1");
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "step,pid,page,fault,frame_0,frame_1,frame_2",
                "0,1,1,true,P1:Pg1,Empty,Empty",
                "1,2,1,true,P1:Pg1,P2:Pg1,Empty",
                "2,1,1,false,P1:Pg1,P2:Pg1,Empty",
            ]
        );
    }

    #[test]
    fn test_export_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.csv");

        export_csv(&sample(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("step,pid,page,fault,frame_0"));
    }

    #[test]
    fn test_export_csv_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("timeline.csv");
        assert!(matches!(
            export_csv(&sample(), &path),
            Err(crate::Error::Io(_))
        ));
    }
}
