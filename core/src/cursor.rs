//! Rune cursor with a bounded undo log.
//!
//! The cursor walks the source one decoded rune at a time between two byte
//! offsets: `start`, the last commit point, and `position`, the read head.
//! Every read pushes an entry onto the rewind stack and every commit clears
//! it, so a rewind can never cross the last commit point and the stack only
//! grows with the longest uncommitted run.
//!
//! # Invariants
//!
//! - `start <= position <= source.len()`
//! - the rewind stack only holds reads made since the last commit

use std::borrow::Cow;

use crate::Span;
use crate::source::{Source, decode_rune, decode_str};

/// One read recorded on the rewind stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    /// A decoded rune and the number of bytes it occupied.
    Rune { ch: char, width: usize },
    /// A read at end of input; rewinding it moves nothing.
    Eof,
}

#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    source: Source,
    start: usize,
    position: usize,
    rewind: Vec<Entry>,
}

impl Cursor {
    pub(crate) fn new(source: Source) -> Self {
        Self {
            source,
            start: 0,
            position: 0,
            rewind: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn source(&self) -> &Source {
        &self.source
    }

    #[inline]
    pub(crate) fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Reads one rune, or `None` at end of input. Either way the read is
    /// recorded so that exactly one [`rewind`](Self::rewind) undoes it.
    pub(crate) fn next(&mut self) -> Option<char> {
        let rest = self
            .source
            .as_bytes()
            .get(self.position..)
            .unwrap_or_default();

        match decode_rune(rest) {
            Some((ch, width)) => {
                self.position += width;
                self.rewind.push(Entry::Rune { ch, width });
                Some(ch)
            }
            None => {
                self.rewind.push(Entry::Eof);
                None
            }
        }
    }

    /// Undoes the most recent read and returns the rune it gave back. A
    /// no-op on an empty stack or an end-of-input read; never moves below
    /// the commit point.
    pub(crate) fn rewind(&mut self) -> Option<char> {
        match self.rewind.pop() {
            Some(Entry::Rune { ch, width }) => {
                self.position = self.position.saturating_sub(width).max(self.start);
                Some(ch)
            }
            _ => None,
        }
    }

    pub(crate) fn peek(&mut self) -> Option<char> {
        let ch = self.next();
        self.rewind();
        ch
    }

    /// Consumes runes while `pred` holds; the first rejected read (or the
    /// end-of-input read) is rewound. Returns the number of runes consumed.
    pub(crate) fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let mut taken = 0;
        while let Some(ch) = self.next() {
            if !pred(ch) {
                break;
            }
            taken += 1;
        }
        self.rewind();
        taken
    }

    /// Consumes the next rune if it is one of `valid`.
    pub(crate) fn accept(&mut self, valid: &str) -> bool {
        match self.next() {
            Some(ch) if valid.contains(ch) => true,
            _ => {
                self.rewind();
                false
            }
        }
    }

    /// The uncommitted span `[start, position)`.
    #[inline]
    pub(crate) fn pending_span(&self) -> Span {
        Span::new(self.start, self.position)
    }

    /// The uncommitted text.
    pub(crate) fn pending(&self) -> Cow<'_, str> {
        decode_str(
            self.source
                .as_bytes()
                .get(self.start..self.position)
                .unwrap_or_default(),
        )
    }

    /// Moves the commit point up to the read head and forgets the reads
    /// behind it. Returns the committed span.
    pub(crate) fn commit(&mut self) -> Span {
        let span = self.pending_span();
        self.start = self.position;
        self.rewind.clear();
        span
    }

    /// Number of rewindable rune reads on the stack.
    #[cfg(test)]
    fn live_entries(&self) -> usize {
        self.rewind
            .iter()
            .filter(|entry| matches!(entry, Entry::Rune { .. }))
            .count()
    }
}
