//! Converter configuration.
//!
//! Built once from the command line and passed by reference into
//! [`convert_files`](crate::convert::convert_files); nothing mutates it
//! afterwards.

use std::path::{Path, PathBuf};

use crate::convert::ConvertOptions;
use crate::error::ArgsError;

/// Resolved file paths plus conversion options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertConfig {
    /// `blkparse` text to read.
    pub input: PathBuf,
    /// CSV destination (created or truncated).
    pub output: PathBuf,
    /// Per-line conversion options.
    pub options: ConvertOptions,
}

impl ConvertConfig {
    /// Build a config from exactly two file names, resolved against
    /// `base_dir`.
    pub fn from_args<S: AsRef<Path>>(
        base_dir: &Path,
        args: &[S],
        options: ConvertOptions,
    ) -> Result<Self, ArgsError> {
        let [input, output] = args else {
            return Err(ArgsError::PathCount { got: args.len() });
        };
        Ok(Self {
            input: resolve(base_dir, input.as_ref()),
            output: resolve(base_dir, output.as_ref()),
            options,
        })
    }
}

/// Join `name` onto `base_dir`; absolute names are returned unchanged.
#[must_use]
pub fn resolve(base_dir: &Path, name: &Path) -> PathBuf {
    base_dir.join(name)
}
