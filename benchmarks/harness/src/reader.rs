//! Paced line reads for a fixed wall-clock budget.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::args::BenchConfig;

/// Outcome of one read run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadReport {
    pub reads: u64,
    pub elapsed: Duration,
}

/// Read one line, then sleep, until the input ends or `duration` elapses.
///
/// A line is read before the clock is checked, so the loop stops at
/// whichever comes first; the line that straddles the deadline is not
/// counted.
pub fn read_loop<R: BufRead>(
    mut rdr: R,
    duration: Duration,
    sleep: Duration,
) -> Result<ReadReport> {
    let start = Instant::now();
    let mut buf = Vec::with_capacity(256);
    let mut reads = 0u64;

    loop {
        buf.clear();
        let n = rdr
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("read line {}", reads + 1))?;
        if n == 0 || start.elapsed() >= duration {
            break;
        }
        debug!(line = %String::from_utf8_lossy(&buf).trim_end(), "read");
        reads += 1;
        thread::sleep(sleep);
    }

    Ok(ReadReport {
        reads,
        elapsed: start.elapsed(),
    })
}

/// Open `cfg.path` and run [`read_loop`] over it.
pub fn read_file(cfg: &BenchConfig) -> Result<ReadReport> {
    let f = File::open(&cfg.path).with_context(|| format!("open {}", cfg.path.display()))?;
    info!(
        file = %cfg.path.display(),
        sleep_ms = cfg.sleep.as_millis() as u64,
        duration_s = cfg.duration.as_secs(),
        "reading with sleep between reads"
    );
    read_loop(BufReader::new(f), cfg.duration, cfg.sleep)
}
