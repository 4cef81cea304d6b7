//! Validation of the `<DURATION_S> <SLEEP_MS> <FILE>` argument triple.
//!
//! Runs before any file is opened so a bad invocation has no side effects.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Why a benchmark invocation was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BenchArgsError {
    #[error("{what} is not an integer: {value:?}")]
    NotInteger { what: &'static str, value: String },

    #[error("{what} is negative: {value}")]
    Negative { what: &'static str, value: i64 },
}

/// Validated settings shared by the read and write loops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    /// Wall-clock budget for the loop.
    pub duration: Duration,
    /// Pause after every read or write.
    pub sleep: Duration,
    /// Target file, already resolved against the base directory.
    pub path: PathBuf,
}

impl BenchConfig {
    pub fn from_fields(
        base_dir: &Path,
        duration_s: &str,
        sleep_ms: &str,
        file: &Path,
    ) -> Result<Self, BenchArgsError> {
        let secs = parse_non_negative("duration (s)", duration_s)?;
        let millis = parse_non_negative("sleep interval (ms)", sleep_ms)?;
        Ok(Self {
            duration: Duration::from_secs(secs),
            sleep: Duration::from_millis(millis),
            path: base_dir.join(file),
        })
    }
}

/// Parse `raw` as an integer and reject negatives.
pub fn parse_non_negative(what: &'static str, raw: &str) -> Result<u64, BenchArgsError> {
    let value: i64 = raw.parse().map_err(|_| BenchArgsError::NotInteger {
        what,
        value: raw.to_string(),
    })?;
    u64::try_from(value).map_err(|_| BenchArgsError::Negative { what, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_negative_integers() {
        let cfg =
            BenchConfig::from_fields(Path::new("/mnt/scratch"), "30", "0", Path::new("zeros"))
                .unwrap();
        assert_eq!(cfg.duration, Duration::from_secs(30));
        assert_eq!(cfg.sleep, Duration::ZERO);
        assert_eq!(cfg.path, Path::new("/mnt/scratch/zeros"));
    }

    #[test]
    fn rejects_negative_values() {
        let err = BenchConfig::from_fields(Path::new("."), "-1", "5", Path::new("f")).unwrap_err();
        assert_eq!(
            err,
            BenchArgsError::Negative {
                what: "duration (s)",
                value: -1
            }
        );
        let err = BenchConfig::from_fields(Path::new("."), "1", "-5", Path::new("f")).unwrap_err();
        assert!(matches!(err, BenchArgsError::Negative { what: "sleep interval (ms)", .. }));
    }

    #[test]
    fn rejects_non_integers() {
        for (d, s) in [("1.5", "10"), ("ten", "10"), ("10", "0.5"), ("", "1")] {
            let err = BenchConfig::from_fields(Path::new("."), d, s, Path::new("f")).unwrap_err();
            assert!(matches!(err, BenchArgsError::NotInteger { .. }), "{d} {s}: {err}");
        }
    }
}
