//! Two-state space tokenizer.
//!
//! A token is a maximal run of non-space bytes. Scanning walks the line left
//! to right in one of two states:
//!
//! - *outside*: skip spaces; the first non-space byte opens a token;
//! - *inside*: the next space closes the token as `[start, space)`.
//!
//! Only the ASCII space (`0x20`) separates tokens. Runs of any length are a
//! single separator and leading/trailing spaces never produce empty tokens.
//!
//! A token still open when the line ends is governed by [`TrailingToken`].
//! `blkparse` lines carrying a process name end in `]`, so historical output
//! silently lost the last token of every line without one; [`TrailingToken::Drop`]
//! keeps that behaviour and [`TrailingToken::Flush`] closes the token at the
//! end of the line instead.

use std::iter::FusedIterator;

/// The only byte that separates tokens.
pub const SEPARATOR: u8 = b' ';

/// Half-open byte range `[start, end)` of one token within its line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first byte of the token.
    pub start: usize,
    /// Offset one past the last byte of the token.
    pub end: usize,
}

impl Span {
    /// Token length in bytes (never zero for spans produced by [`Tokens`]).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrow the token's bytes out of the line it was scanned from.
    ///
    /// # Panics
    /// Panics if the span does not lie within `line`.
    #[inline]
    #[must_use]
    pub fn slice<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        &line[self.start..self.end]
    }
}

/// What to do with a token that is still open when the line ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrailingToken {
    /// Discard it; only a space closes a token. Byte-compatible with
    /// historical converter output.
    #[default]
    Drop,
    /// Close it at the end of the line like any other token.
    Flush,
}

/// Iterator over the token spans of one line, in left-to-right order.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    line: &'a [u8],
    pos: usize,
    trailing: TrailingToken,
}

impl<'a> Tokens<'a> {
    /// Start scanning `line` under the given trailing-token policy.
    #[inline]
    #[must_use]
    pub const fn new(line: &'a [u8], trailing: TrailingToken) -> Self {
        Self {
            line,
            pos: 0,
            trailing,
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let len = self.line.len();

        // outside-token
        while self.pos < len && self.line[self.pos] == SEPARATOR {
            self.pos += 1;
        }
        if self.pos >= len {
            return None;
        }

        // inside-token
        let start = self.pos;
        match self.line[start..].iter().position(|&b| b == SEPARATOR) {
            Some(off) => {
                let end = start + off;
                self.pos = end + 1;
                Some(Span { start, end })
            }
            None => {
                self.pos = len;
                match self.trailing {
                    TrailingToken::Drop => None,
                    TrailingToken::Flush => Some(Span { start, end: len }),
                }
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}

/// Token spans of `line` with the historical policy (an unterminated final
/// token is dropped).
///
/// This is a pure function of the line's bytes.
#[must_use]
pub fn tokenize<L: AsRef<[u8]> + ?Sized>(line: &L) -> Vec<Span> {
    tokenize_with(line, TrailingToken::Drop)
}

/// Token spans of `line` under an explicit trailing-token policy.
#[must_use]
pub fn tokenize_with<L: AsRef<[u8]> + ?Sized>(line: &L, trailing: TrailingToken) -> Vec<Span> {
    Tokens::new(line.as_ref(), trailing).collect()
}
