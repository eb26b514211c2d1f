//! Immutable source buffers and rune decoding.
//!
//! The engine addresses input by byte offset and hands characters to state
//! functions one decoded rune at a time. Input is not required to be valid
//! UTF-8: every malformed byte decodes to [`char::REPLACEMENT_CHARACTER`] and
//! occupies exactly one byte, so a scan never fails on encoding alone.

use core::fmt;
use std::borrow::Cow;
use std::sync::Arc;

use crate::Span;

/// The character yielded for a malformed byte.
pub const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Shared, immutable source text.
///
/// Cloning is cheap (reference counted), so the buffer can be handed to
/// worker threads and attached to errors without copying.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Source(Arc<[u8]>);

impl Source {
    /// Wraps raw bytes. The bytes need not be valid UTF-8.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The whole source as text, decoding malformed bytes one-for-one.
    pub fn text(&self) -> Cow<'_, str> {
        decode_str(&self.0)
    }

    /// Text covered by `span`, clamped to the buffer.
    pub fn slice(&self, span: Span) -> Cow<'_, str> {
        let end = span.end.min(self.0.len());
        let start = span.start.min(end);
        decode_str(self.0.get(start..end).unwrap_or_default())
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Source").field(&self.text()).finish()
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self(Arc::from(text.as_bytes()))
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Self(Arc::from(text.into_bytes()))
    }
}

impl From<&String> for Source {
    fn from(text: &String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<&[u8]> for Source {
    fn from(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }
}

impl From<Arc<[u8]>> for Source {
    fn from(bytes: Arc<[u8]>) -> Self {
        Self(bytes)
    }
}

/// Decodes the rune at the front of `bytes`.
///
/// Returns the character and its encoded width, or `None` when `bytes` is
/// empty. A malformed or truncated sequence yields `(REPLACEMENT, 1)`.
pub(crate) fn decode_rune(bytes: &[u8]) -> Option<(char, usize)> {
    if bytes.is_empty() {
        return None;
    }

    // A scalar value is at most four bytes long.
    let head = &bytes[..bytes.len().min(4)];
    let valid = match core::str::from_utf8(head) {
        Ok(text) => text,
        Err(err) => core::str::from_utf8(&head[..err.valid_up_to()]).unwrap_or_default(),
    };

    match valid.chars().next() {
        Some(ch) => Some((ch, ch.len_utf8())),
        None => Some((REPLACEMENT, 1)),
    }
}

/// Iterator over the runes of a byte slice using [`decode_rune`] rules.
#[derive(Debug, Clone)]
pub(crate) struct Runes<'a> {
    bytes: &'a [u8],
}

impl<'a> Runes<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl Iterator for Runes<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let (ch, width) = decode_rune(self.bytes)?;
        self.bytes = self.bytes.get(width..).unwrap_or_default();
        Some(ch)
    }
}

/// Borrows `bytes` as text when valid, otherwise decodes rune by rune.
pub(crate) fn decode_str(bytes: &[u8]) -> Cow<'_, str> {
    match core::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(Runes::new(bytes).collect()),
    }
}
