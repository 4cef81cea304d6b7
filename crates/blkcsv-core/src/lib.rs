//! blkcsv-core — positional tokenizer that turns `blkparse` output into CSV.
//!
//! `blkparse` prints one block-I/O event per line:
//!
//! ```text
//! major,minor cpu sequence timestamp pid action rwbs offset + size [process]
//! ```
//!
//! The converter splits each line on runs of spaces, keeps a fixed set of
//! token positions and writes them comma-delimited:
//!
//! ```text
//! major,minor,sequence,timestamp,pid,rwbs,offset,size
//! ```
//!
//! Nothing here knows what a position *means*; the selection is purely
//! positional (see [`fields::BLKPARSE_FIELDS`]).
//!
//! ```
//! use blkcsv_core::{convert, ConvertOptions};
//!
//! let input = b"259,0 0 1 2.123456789 1234 Q R 0 + 8 [kworker]\n";
//! let mut out = Vec::new();
//! let stats = convert(&input[..], &mut out, &ConvertOptions::default())?;
//! assert_eq!(out, b"259,0,1,2.123456789,1234,R,0,8\n");
//! assert_eq!(stats.lines, 1);
//! # Ok::<(), blkcsv_core::ConvertError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Immutable converter configuration (paths resolved against a base dir).
pub mod config;
/// Line-by-line conversion over any `BufRead` / `Write` pair.
pub mod convert;
/// Typed argument and I/O errors.
pub mod error;
/// The Selected-Field Index Set and per-line record rendering.
pub mod fields;
/// Two-state space tokenizer.
pub mod tokenize;

pub use config::*;
pub use convert::*;
pub use error::*;
pub use fields::*;
pub use tokenize::*;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use blkcsv_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        config::ConvertConfig,
        convert::{convert, convert_files, ConvertOptions, ConvertStats},
        error::{ArgsError, ConvertError, Error},
        tokenize::{tokenize, Span, TrailingToken},
    };
}
