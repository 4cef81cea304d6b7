//! Positional field selection and Output Record rendering.
//!
//! The selection is by token position only. For `blkparse` output the kept
//! positions line up as:
//!
//! | pos | blkparse column | kept as            |
//! |-----|-----------------|--------------------|
//! | 0   | major,minor     | `tok,`             |
//! | 2   | sequence        | `tok,`             |
//! | 3   | timestamp       | `tok,`             |
//! | 4   | pid             | `tok,`             |
//! | 6   | rwbs            | `tok,`             |
//! | 7   | offset          | `tok,`             |
//! | 9   | size            | `tok` (no comma)   |
//!
//! Note that position 0 is itself `major,minor`, so a full row reads as eight
//! comma-separated values even though seven tokens are emitted.

use std::io::{self, Write};

use crate::tokenize::{Tokens, TrailingToken};

/// Byte written after every non-final kept field.
pub const DELIMITER: u8 = b',';

/// Line terminator written after every Output Record.
pub const TERMINATOR: &[u8] = b"\n";

/// How a token at a given position is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRole {
    /// Not part of the output.
    Skip,
    /// Written followed by [`DELIMITER`].
    Delimited,
    /// Written with nothing after it; the record's final field.
    Final,
}

/// A fixed, ordered set of token positions to keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSelection {
    delimited: &'static [usize],
    last: usize,
}

/// Positions kept from `blkparse` lines.
pub const BLKPARSE_FIELDS: FieldSelection = FieldSelection::new(&[0, 2, 3, 4, 6, 7], 9);

impl FieldSelection {
    /// Build a selection from ascending delimited positions and the final
    /// position (which should be greater than all of them).
    #[must_use]
    pub const fn new(delimited: &'static [usize], last: usize) -> Self {
        Self { delimited, last }
    }

    /// Role of the token at `position`.
    #[must_use]
    pub fn role(&self, position: usize) -> FieldRole {
        if self.delimited.contains(&position) {
            FieldRole::Delimited
        } else if position == self.last {
            FieldRole::Final
        } else {
            FieldRole::Skip
        }
    }

    /// Number of tokens emitted for a line that reaches the final position.
    #[must_use]
    pub fn width(&self) -> usize {
        self.delimited.len() + 1
    }

    /// Position of the final (undelimited) field.
    #[must_use]
    pub const fn last(&self) -> usize {
        self.last
    }
}

impl Default for FieldSelection {
    fn default() -> Self {
        BLKPARSE_FIELDS
    }
}

/// What [`write_record`] did with one line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordSummary {
    /// Tokens closed on the line (kept or not).
    pub tokens: usize,
    /// Tokens written to the output.
    pub emitted: usize,
    /// Whether the final field was reached and written.
    pub complete: bool,
    /// Bytes written, terminator included.
    pub bytes: usize,
}

/// Scan `line`, write its kept tokens and the line terminator to `w`.
///
/// Short lines are not errors: whatever fields were reached are written, each
/// with its trailing delimiter, followed by the terminator.
pub fn write_record<W: Write + ?Sized>(
    w: &mut W,
    line: &[u8],
    selection: &FieldSelection,
    trailing: TrailingToken,
) -> io::Result<RecordSummary> {
    let mut summary = RecordSummary::default();

    for (position, span) in Tokens::new(line, trailing).enumerate() {
        summary.tokens += 1;
        let tok = span.slice(line);
        match selection.role(position) {
            FieldRole::Skip => {}
            FieldRole::Delimited => {
                w.write_all(tok)?;
                w.write_all(&[DELIMITER])?;
                summary.emitted += 1;
                summary.bytes += tok.len() + 1;
            }
            FieldRole::Final => {
                w.write_all(tok)?;
                summary.emitted += 1;
                summary.bytes += tok.len();
                summary.complete = true;
            }
        }
    }

    w.write_all(TERMINATOR)?;
    summary.bytes += TERMINATOR.len();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(line: &str, trailing: TrailingToken) -> (String, RecordSummary) {
        let mut out = Vec::new();
        let s = write_record(&mut out, line.as_bytes(), &BLKPARSE_FIELDS, trailing).unwrap();
        (String::from_utf8(out).unwrap(), s)
    }

    #[test]
    fn roles_follow_positions() {
        let roles: Vec<FieldRole> = (0..12).map(|p| BLKPARSE_FIELDS.role(p)).collect();
        use FieldRole::{Delimited as D, Final as F, Skip as S};
        assert_eq!(roles, [D, S, D, D, D, S, D, D, S, F, S, S]);
        assert_eq!(BLKPARSE_FIELDS.width(), 7);
        assert_eq!(BLKPARSE_FIELDS.last(), 9);
    }

    #[test]
    fn full_blkparse_line() {
        let (out, s) = render(
            "259,0 0 1 2.123456789 1234 Q R 0 + 8 [process]",
            TrailingToken::Drop,
        );
        assert_eq!(out, "259,0,1,2.123456789,1234,R,0,8\n");
        assert_eq!(s.tokens, 10);
        assert_eq!(s.emitted, 7);
        assert!(s.complete);
        assert_eq!(s.bytes, out.len());
    }

    #[test]
    fn final_field_lost_without_trailing_space() {
        let line = "8,0 3 11 0.009507758 697 C W 223490 + 8";
        let (out, s) = render(line, TrailingToken::Drop);
        assert_eq!(out, "8,0,11,0.009507758,697,W,223490,\n");
        assert!(!s.complete);

        let (out, s) = render(line, TrailingToken::Flush);
        assert_eq!(out, "8,0,11,0.009507758,697,W,223490,8\n");
        assert!(s.complete);
    }

    #[test]
    fn short_line_keeps_delimiters() {
        let (out, s) = render("a b c d e ", TrailingToken::Drop);
        assert_eq!(out, "a,c,d,e,\n");
        assert_eq!(s.emitted, 4);
        assert!(!s.complete);
    }

    #[test]
    fn empty_line_is_just_terminator() {
        let (out, s) = render("", TrailingToken::Drop);
        assert_eq!(out, "\n");
        assert_eq!(s, RecordSummary { bytes: 1, ..RecordSummary::default() });
    }
}
