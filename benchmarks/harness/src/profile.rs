//! TOML-described benchmark suites and their CSV reports.
//!
//! ```toml
//! name = "smoke"
//! repeats = 2
//!
//! [[runs]]
//! kind = "simulate"
//! lines = 50000
//! file = "synthetic.blkparse"
//!
//! [[runs]]
//! kind = "read"
//! duration_secs = 2
//! sleep_ms = 1
//! file = "synthetic.blkparse"
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::args::BenchConfig;
use crate::generator::write_synthetic;
use crate::reader::read_file;
use crate::writer::write_file;

/// Header of every report file.
pub const CSV_HEADER: &str =
    "timestamp,profile,repeat,kind,file,duration_s,sleep_ms,ops,bytes,elapsed_ms";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default = "default_name")]
    pub name: String,
    /// Repetitions of the whole run list.
    #[serde(default = "default_repeats")]
    pub repeats: u32,
    pub runs: Vec<RunSpec>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RunSpec {
    Write {
        duration_secs: u64,
        sleep_ms: u64,
        file: PathBuf,
    },
    Read {
        duration_secs: u64,
        sleep_ms: u64,
        file: PathBuf,
    },
    Simulate {
        lines: u64,
        file: PathBuf,
        #[serde(default)]
        seed: u64,
    },
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_repeats() -> u32 {
    1
}

/// Read and parse a profile file.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let src = fs::read_to_string(path).with_context(|| format!("read profile {}", path.display()))?;
    let profile: Profile =
        toml::from_str(&src).with_context(|| format!("parse profile {}", path.display()))?;
    Ok(profile)
}

/// One finished run, as written to the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunRow {
    pub repeat: u32,
    pub kind: &'static str,
    pub file: PathBuf,
    pub duration: Option<Duration>,
    pub sleep: Option<Duration>,
    pub ops: u64,
    pub bytes: Option<u64>,
    pub elapsed: Duration,
}

impl RunRow {
    fn write_csv<W: Write>(&self, w: &mut W, ts: u64, profile: &str) -> Result<()> {
        writeln!(
            w,
            "{ts},{profile},{},{},{},{},{},{},{},{}",
            self.repeat,
            self.kind,
            self.file.display(),
            opt(self.duration.map(|d| d.as_secs())),
            opt(self.sleep.map(|d| d.as_millis())),
            self.ops,
            opt(self.bytes),
            self.elapsed.as_millis()
        )
        .context("write report row")?;
        Ok(())
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Execute one run with paths resolved under `base_dir`.
pub fn execute(run: &RunSpec, base_dir: &Path, repeat: u32) -> Result<RunRow> {
    match run {
        RunSpec::Write {
            duration_secs,
            sleep_ms,
            file,
        } => {
            let cfg = bench_config(base_dir, *duration_secs, *sleep_ms, file);
            let rep = write_file(&cfg)?;
            Ok(RunRow {
                repeat,
                kind: "write",
                file: cfg.path,
                duration: Some(cfg.duration),
                sleep: Some(cfg.sleep),
                ops: rep.writes,
                bytes: Some(rep.bytes),
                elapsed: rep.elapsed,
            })
        }
        RunSpec::Read {
            duration_secs,
            sleep_ms,
            file,
        } => {
            let cfg = bench_config(base_dir, *duration_secs, *sleep_ms, file);
            let rep = read_file(&cfg)?;
            Ok(RunRow {
                repeat,
                kind: "read",
                file: cfg.path,
                duration: Some(cfg.duration),
                sleep: Some(cfg.sleep),
                ops: rep.reads,
                bytes: None,
                elapsed: rep.elapsed,
            })
        }
        RunSpec::Simulate { lines, file, seed } => {
            let path = base_dir.join(file);
            let t0 = Instant::now();
            crate::ensure_parent_dir(&path)?;
            let f = File::create(&path).with_context(|| format!("create {}", path.display()))?;
            let bytes = write_synthetic(BufWriter::new(f), *lines, *seed)
                .with_context(|| format!("write synthetic trace {}", path.display()))?;
            Ok(RunRow {
                repeat,
                kind: "simulate",
                file: path,
                duration: None,
                sleep: None,
                ops: *lines,
                bytes: Some(bytes),
                elapsed: t0.elapsed(),
            })
        }
    }
}

fn bench_config(base_dir: &Path, duration_secs: u64, sleep_ms: u64, file: &Path) -> BenchConfig {
    BenchConfig {
        duration: Duration::from_secs(duration_secs),
        sleep: Duration::from_millis(sleep_ms),
        path: base_dir.join(file),
    }
}

/// Run every repeat of `profile`, writing the header and one row per run to
/// `report`. Returns the number of rows written.
pub fn run_suite<W: Write>(
    profile: &Profile,
    base_dir: &Path,
    report: &mut W,
    ts: u64,
) -> Result<usize> {
    writeln!(report, "{CSV_HEADER}").context("write report header")?;
    let mut rows = 0usize;
    for rep in 0..profile.repeats {
        for run in &profile.runs {
            let row = execute(run, base_dir, rep)?;
            info!(
                profile = %profile.name,
                repeat = rep,
                kind = row.kind,
                ops = row.ops,
                elapsed_ms = row.elapsed.as_millis() as u64,
                "run finished"
            );
            row.write_csv(report, ts, &profile.name)?;
            rows += 1;
        }
    }
    report.flush().context("flush report")?;
    Ok(rows)
}
