//! Line-by-line conversion.
//!
//! One line is read, scanned and its record fully written before the next
//! line is read. No state survives from one line to the next apart from the
//! reader/writer handles, and the input is consumed exactly once without
//! seeking.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use tracing::{debug, info};

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::fields::{write_record, FieldSelection};
use crate::tokenize::TrailingToken;

/// Per-line conversion options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Treatment of a token left open at the end of a line.
    pub trailing: TrailingToken,
    /// Positions to keep.
    pub selection: FieldSelection,
}

impl ConvertOptions {
    /// Options with the given trailing-token policy and the `blkparse`
    /// selection.
    #[must_use]
    pub fn with_trailing(trailing: TrailingToken) -> Self {
        Self {
            trailing,
            ..Self::default()
        }
    }
}

/// Counters for one conversion run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Input lines read (equals output lines written).
    pub lines: u64,
    /// Records that reached the final field.
    pub full_records: u64,
    /// Records that ended early (short, blank or missing their final field).
    pub short_records: u64,
    /// Bytes written to the output, terminators included.
    pub bytes_written: u64,
}

/// Convert every line of `input` into one Output Record on `output`.
///
/// Lines may be arbitrarily long and need not be valid UTF-8; tokens are
/// copied byte for byte. A line ends at `\n`, `\r\n` or a lone `\r`, and
/// the terminator is not part of the line.
/// The output is flushed before returning.
pub fn convert<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    opts: &ConvertOptions,
) -> Result<ConvertStats, ConvertError> {
    let mut stats = ConvertStats::default();
    let mut buf = Vec::with_capacity(8 << 10);

    loop {
        buf.clear();
        let n = input
            .read_until(b'\n', &mut buf)
            .map_err(|source| ConvertError::Read {
                line: stats.lines + 1,
                source,
            })?;
        if n == 0 {
            break; // EOF
        }
        // a lone `\r` inside the chunk also ends a line
        for line in strip_eol(&buf).split(|&b| b == b'\r') {
            stats.lines += 1;
            debug!(line_no = stats.lines, text = %String::from_utf8_lossy(line), "input line");

            let rec = write_record(&mut output, line, &opts.selection, opts.trailing).map_err(
                |source| ConvertError::Write {
                    line: stats.lines,
                    source,
                },
            )?;
            if rec.complete {
                stats.full_records += 1;
            } else {
                stats.short_records += 1;
            }
            stats.bytes_written += rec.bytes as u64;
        }
    }

    output
        .flush()
        .map_err(|source| ConvertError::Flush { source })?;
    Ok(stats)
}

/// Open `cfg.input`, create (or truncate) `cfg.output` and convert.
///
/// The input is opened first so a missing input never clobbers an existing
/// output file. On a mid-run failure the partial output is left in place.
pub fn convert_files(cfg: &ConvertConfig) -> Result<ConvertStats, ConvertError> {
    let input = File::open(&cfg.input).map_err(|source| ConvertError::Open {
        path: cfg.input.clone(),
        source,
    })?;
    info!(path = %cfg.input.display(), "reading blkparse input");

    let output = File::create(&cfg.output).map_err(|source| ConvertError::Create {
        path: cfg.output.clone(),
        source,
    })?;
    info!(path = %cfg.output.display(), "writing csv output");

    let stats = convert(BufReader::new(input), BufWriter::new(output), &cfg.options)?;
    info!(
        lines = stats.lines,
        full = stats.full_records,
        short = stats.short_records,
        bytes = stats.bytes_written,
        "conversion finished"
    );
    Ok(stats)
}

#[inline]
fn strip_eol(buf: &[u8]) -> &[u8] {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    line.strip_suffix(b"\r").unwrap_or(line)
}
