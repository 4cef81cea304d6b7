//! Paced marker writes for a fixed wall-clock budget.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;

use crate::args::BenchConfig;

/// Record appended on every iteration.
pub const MARKER: &[u8] = b"0\n";

/// Outcome of one write run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteReport {
    pub writes: u64,
    /// File length after the run.
    pub bytes: u64,
    pub elapsed: Duration,
}

/// Write [`MARKER`], then sleep, until `duration` elapses. Returns the number
/// of markers written; `w` is flushed before returning.
pub fn write_loop<W: Write>(mut w: W, duration: Duration, sleep: Duration) -> Result<u64> {
    let start = Instant::now();
    let mut writes = 0u64;
    while start.elapsed() < duration {
        w.write_all(MARKER)
            .with_context(|| format!("write marker {}", writes + 1))?;
        thread::sleep(sleep);
        writes += 1;
    }
    w.flush().context("flush writer")?;
    Ok(writes)
}

/// Create (or truncate) `cfg.path` and run [`write_loop`] into it.
pub fn write_file(cfg: &BenchConfig) -> Result<WriteReport> {
    let f = File::create(&cfg.path).with_context(|| format!("create {}", cfg.path.display()))?;
    info!(
        file = %cfg.path.display(),
        sleep_ms = cfg.sleep.as_millis() as u64,
        duration_s = cfg.duration.as_secs(),
        "writing markers with sleep between writes"
    );

    let start = Instant::now();
    let writes = write_loop(BufWriter::new(f), cfg.duration, cfg.sleep)?;
    let elapsed = start.elapsed();

    let bytes = fs::metadata(&cfg.path)
        .with_context(|| format!("stat {}", cfg.path.display()))?
        .len();
    Ok(WriteReport {
        writes,
        bytes,
        elapsed,
    })
}
