//! Error types for the converter.
//!
//! Malformed or short trace lines are never errors; only bad invocations and
//! I/O failures are.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid invocation, detected before any file is touched.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// Wrong number of file names.
    #[error("expected an input and an output filename, got {got} argument(s)")]
    PathCount {
        /// Number of arguments actually given.
        got: usize,
    },
}

/// I/O failure during a conversion. Terminal: whatever was written before the
/// failure stays on disk.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input file could not be opened.
    #[error("open input {}", path.display())]
    Open {
        /// Resolved input path.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// The output file could not be created.
    #[error("create output {}", path.display())]
    Create {
        /// Resolved output path.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// Reading input line `line` (1-based) failed.
    #[error("read input line {line}")]
    Read {
        /// 1-based number of the line being read.
        line: u64,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// Writing the record for input line `line` (1-based) failed.
    #[error("write output record {line}")]
    Write {
        /// 1-based number of the line being written.
        line: u64,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// Every record was written but the final flush failed.
    #[error("flush output")]
    Flush {
        /// Underlying cause.
        #[source]
        source: io::Error,
    },
}

/// Everything a conversion run can fail with.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad invocation; nothing was read or written.
    #[error(transparent)]
    Args(#[from] ArgsError),
    /// I/O failure mid-run.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl Error {
    /// Conventional process exit code: 2 for usage errors, 1 for I/O.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Args(_) => 2,
            Self::Convert(_) => 1,
        }
    }
}

/// Result alias for conversion runs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn exit_codes_split_usage_from_io() {
        let args: Error = ArgsError::PathCount { got: 3 }.into();
        assert_eq!(args.exit_code(), 2);

        let io: Error = ConvertError::Read {
            line: 4,
            source: io::Error::new(io::ErrorKind::InvalidData, "boom"),
        }
        .into();
        assert_eq!(io.exit_code(), 1);
        assert_eq!(io.to_string(), "read input line 4");
        assert!(io.source().is_some());
    }
}
