//! Deterministic synthetic blkparse output, used as read-benchmark and
//! converter input when no real capture is at hand.

use std::io::{self, Write};

use rand::{rngs::StdRng, Rng as _, SeedableRng};

const ACTIONS: [&str; 8] = ["Q", "G", "I", "D", "C", "M", "P", "U"];
const RWBS: [&str; 5] = ["R", "W", "WS", "RA", "FWS"];
const COMMS: [&str; 4] = ["kworker/u8:2", "jbd2/sda1-8", "fio", "postgres"];

/// Write `n` lines shaped like `blkparse` default output.
///
/// Roughly one line in ten carries no process name, so its size field is the
/// last token on the line with no space after it. Returns the bytes written.
pub fn write_synthetic<W: Write>(mut w: W, n: u64, seed: u64) -> io::Result<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ts_ns: u64 = 0;
    let mut sector: u64 = rng.random_range(0..1 << 24);
    let mut bytes = 0u64;

    for seq in 1..=n {
        ts_ns += rng.random_range(100..50_000u64);
        if rng.random_bool(0.3) {
            sector = rng.random_range(0..1 << 24);
        }
        let nsect = 8u32 << rng.random_range(0..5u32);
        let action = ACTIONS[rng.random_range(0..ACTIONS.len())];
        let rwbs = RWBS[rng.random_range(0..RWBS.len())];
        let pid: u32 = rng.random_range(1..40_000);

        let mut line = format!(
            "{:>3},{:<2} {:>2} {:>8} {:>5}.{:09} {:>5}  {:<1}  {:<3} {} + {}",
            8,
            0,
            rng.random_range(0..8u8),
            seq,
            ts_ns / 1_000_000_000,
            ts_ns % 1_000_000_000,
            pid,
            action,
            rwbs,
            sector,
            nsect
        );
        if !rng.random_bool(0.1) {
            line.push_str(" [");
            line.push_str(COMMS[rng.random_range(0..COMMS.len())]);
            line.push(']');
        }
        line.push('\n');

        w.write_all(line.as_bytes())?;
        bytes += line.len() as u64;
        sector += u64::from(nsect);
    }
    w.flush()?;
    Ok(bytes)
}
