//! blkcsv-bench
//!
//! Duration-bounded I/O load used alongside `blktrace` captures:
//! paced line reads, paced marker writes, a memory balloon that keeps the
//! page cache from absorbing writes, a synthetic blkparse generator, and
//! TOML-described suites that append CSV rows to
//! `benchmarks/reports/bench-<unix>.csv`.
//!
//! Usage examples:
//!   cargo run -p blkcsv-bench-harness -- write 30 10 zeros.txt
//!   cargo run -p blkcsv-bench-harness -- read 30 10 sda.blkparse
//!   cargo run -p blkcsv-bench-harness -- suite --profile benchmarks/configs/profiles/smoke.toml

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

mod args;
mod balloon;
mod generator;
mod profile;
mod reader;
mod units;
mod writer;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{BenchArgsError, BenchConfig};
use crate::balloon::{Balloon, DEFAULT_BLOCKS, GIB};
use crate::units::HumanBytes;

#[derive(Parser, Debug)]
#[command(
    name = "blkcsv-bench",
    about = "Duration-bounded file I/O benchmarks for blktrace capture runs",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// Directory that relative file names are resolved against
    #[arg(long, global = true, default_value = ".")]
    base_dir: PathBuf,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Read one line per iteration until the file ends or the duration elapses
    Read {
        /// Read duration in seconds
        #[arg(allow_hyphen_values = true)]
        duration_s: String,
        /// Sleep between reads in milliseconds
        #[arg(allow_hyphen_values = true)]
        sleep_ms: String,
        /// Input file
        file: PathBuf,
    },

    /// Write a `0` line per iteration until the duration elapses
    Write {
        /// Write duration in seconds
        #[arg(allow_hyphen_values = true)]
        duration_s: String,
        /// Sleep between writes in milliseconds
        #[arg(allow_hyphen_values = true)]
        sleep_ms: String,
        /// Output file (created or truncated)
        file: PathBuf,
    },

    /// Allocate and touch GiB blocks, hold them, then free them
    Balloon {
        /// Hold time in seconds
        #[arg(allow_hyphen_values = true)]
        duration_s: String,
        /// Number of 1 GiB blocks to allocate
        #[arg(long, default_value_t = DEFAULT_BLOCKS)]
        gib: usize,
    },

    /// Write synthetic blkparse output
    Simulate {
        /// Number of lines
        #[arg(long, default_value_t = 100_000)]
        lines: u64,
        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Output file
        #[arg(long, default_value = "synthetic.blkparse")]
        out: PathBuf,
    },

    /// Run a TOML profile and write a CSV report
    Suite {
        /// Profile path
        #[arg(long, default_value = "benchmarks/configs/profiles/smoke.toml")]
        profile: PathBuf,
        /// Directory for `bench-<unix>.csv`
        #[arg(long, default_value = "benchmarks/reports")]
        reports: PathBuf,
    },
}

impl Cmd {
    const fn name(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Write { .. } => "write",
            Self::Balloon { .. } => "balloon",
            Self::Simulate { .. } => "simulate",
            Self::Suite { .. } => "suite",
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.downcast_ref::<BenchArgsError>().is_some() => {
            eprintln!("ERROR: {err:#}");
            let mut cmd = Cli::command();
            if let Some(sub) = cmd.find_subcommand_mut(cli.cmd.name()) {
                eprintln!("{}", sub.render_long_help());
            }
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let base = cli.base_dir.as_path();
    match &cli.cmd {
        Cmd::Read {
            duration_s,
            sleep_ms,
            file,
        } => {
            let cfg = BenchConfig::from_fields(base, duration_s, sleep_ms, file)?;
            let rep = reader::read_file(&cfg)?;
            println!(
                "READ [{}] times for [{:.2}] seconds",
                rep.reads,
                rep.elapsed.as_secs_f64()
            );
        }

        Cmd::Write {
            duration_s,
            sleep_ms,
            file,
        } => {
            let cfg = BenchConfig::from_fields(base, duration_s, sleep_ms, file)?;
            let rep = writer::write_file(&cfg)?;
            println!(
                "WROTE: {} times for total of {}",
                rep.writes,
                HumanBytes(rep.bytes)
            );
        }

        Cmd::Balloon { duration_s, gib } => {
            let hold = Duration::from_secs(args::parse_non_negative("duration (s)", duration_s)?);
            info!(gib, hold_s = hold.as_secs(), "inflating balloon");
            let balloon = Balloon::inflate(*gib, GIB);
            println!(
                "Holding {} GiB ({}) for {}s",
                balloon.blocks(),
                HumanBytes(balloon.bytes()),
                hold.as_secs()
            );
            let released = balloon.hold_then_release(hold);
            println!("Released {released} GiB");
        }

        Cmd::Simulate { lines, seed, out } => {
            let path = base.join(out);
            ensure_parent_dir(&path)?;
            let f = File::create(&path).with_context(|| format!("create {}", path.display()))?;
            let bytes = generator::write_synthetic(BufWriter::new(f), *lines, *seed)
                .with_context(|| format!("write synthetic trace {}", path.display()))?;
            println!(
                "Simulated {lines} lines ({}) → {}",
                HumanBytes(bytes),
                path.display()
            );
        }

        Cmd::Suite {
            profile: profile_path,
            reports,
        } => {
            let prof = profile::load_profile(profile_path)?;
            fs::create_dir_all(reports)
                .with_context(|| format!("create report dir {}", reports.display()))?;

            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock before unix epoch")?
                .as_secs();
            let csv_path = reports.join(format!("bench-{ts}.csv"));
            let f = File::create(&csv_path)
                .with_context(|| format!("create {}", csv_path.display()))?;
            let mut csv = BufWriter::new(f);

            println!(
                "Profile: {} ({} runs x {} repeats)",
                prof.name,
                prof.runs.len(),
                prof.repeats
            );
            let rows = profile::run_suite(&prof, base, &mut csv, ts)?;
            println!("Wrote {rows} rows → {}", csv_path.display());
        }
    }
    Ok(())
}

/// Ensure the parent directory for a file exists.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}
