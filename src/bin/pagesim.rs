//! Page replacement simulator CLI.
//!
//! Runs one policy and prints its timeline, or compares all four policies
//! on the same trace. Input comes from `--process` strings, a `--sequence`
//! string, or a JSON `--config` file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagesim::common::config::DEFAULT_NUM_FRAMES;
use pagesim::report::{export_csv, render_table};
use pagesim::trace::{parse_process, parse_sequence};
use pagesim::{compare, simulate, Algorithm, Error, ReferenceSource, Result, RunResult, SimConfig};

#[derive(Parser, Debug)]
#[command(
    name = "pagesim",
    author,
    version,
    about = "Deterministic page replacement simulator (FIFO, LRU, Optimal, Clock)",
    long_about = "Simulate demand paging over a shared frame pool.\n\nExamples:\n  pagesim -f 3 -a lru -p 1=1,2,3,2,4,1,5 -p 2=2,3,2,1,4\n  pagesim -f 3 --compare -s \"1:1 1:2 2:1 1:3\"\n  pagesim --config run.json --csv timeline.csv"
)]
struct Cli {
    /// Number of physical frames.
    #[arg(short, long, default_value_t = DEFAULT_NUM_FRAMES)]
    frames: usize,

    /// Replacement algorithm: fifo, lru, optimal (opt) or clock.
    #[arg(short, long, default_value = "lru")]
    algorithm: Algorithm,

    /// Run every algorithm on the same trace and print a summary.
    #[arg(long)]
    compare: bool,

    /// Per-process reference string, e.g. `1=1,2,3`. Repeatable.
    #[arg(short = 'p', long = "process", value_name = "PID=PAGES")]
    processes: Vec<String>,

    /// Explicit global sequence, e.g. `"1:1 2:1 1:2"`.
    #[arg(short, long, conflicts_with = "processes")]
    sequence: Option<String>,

    /// JSON configuration file (overrides frames, algorithm and input).
    #[arg(short, long, conflicts_with_all = ["processes", "sequence"])]
    config: Option<PathBuf>,

    /// Write the timeline as CSV.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;

    if cli.compare {
        let results = compare(&config)?;
        print!("{}", render_summary(&results));
        if let Some(path) = &cli.csv {
            for (algorithm, result) in &results {
                export_csv(result, suffixed(path, *algorithm))?;
            }
        }
        return Ok(());
    }

    let result = simulate(config)?;
    print!("{}", render_table(&result));
    println!("checksum: {:#010x}", result.fingerprint());
    if let Some(path) = &cli.csv {
        export_csv(&result, path)?;
    }
    Ok(())
}

/// Assemble a configuration from the file or the command-line input.
fn build_config(cli: &Cli) -> Result<SimConfig> {
    if let Some(path) = &cli.config {
        return SimConfig::from_json_file(path);
    }

    let source = if let Some(sequence) = &cli.sequence {
        ReferenceSource::Explicit(parse_sequence(sequence)?)
    } else if !cli.processes.is_empty() {
        let mut sequences = BTreeMap::new();
        for spec in &cli.processes {
            let (pid, pages) = parse_process(spec)?;
            sequences.entry(pid).or_insert_with(Vec::new).extend(pages);
        }
        ReferenceSource::PerProcess(sequences)
    } else {
        return Err(Error::EmptyTrace);
    };

    Ok(SimConfig::new(cli.frames, cli.algorithm, source))
}

/// One summary row per algorithm for `--compare`.
fn render_summary(results: &[(Algorithm, RunResult)]) -> String {
    let mut out = format!(
        "{:<8} {:>7} {:>7} {:>9} {:>10}\n",
        "policy", "faults", "hits", "hit rate", "checksum"
    );
    for (algorithm, result) in results {
        let stats = result.stats();
        out.push_str(&format!(
            "{:<8} {:>7} {:>7} {:>8.2}% {:>#10x}\n",
            algorithm.to_string(),
            stats.faults,
            stats.hits,
            stats.hit_rate() * 100.0,
            result.fingerprint()
        ));
    }
    out
}

/// `timeline.csv` → `timeline_lru.csv`.
fn suffixed(path: &Path, algorithm: Algorithm) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "timeline".to_string());
    let name = format!("{}_{}.csv", stem, algorithm.to_string().to_lowercase());
    path.with_file_name(name)
}
