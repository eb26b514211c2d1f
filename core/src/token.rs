use core::ops::Range;

use crate::Position;

/// A byte range `[start, end)` into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    ///
    /// Saturates to `0` for an inverted span.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    #[inline]
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// A typed slice of committed source text.
///
/// `kind` is whatever tag the caller's state functions emit. Tokens are
/// immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token<K> {
    kind: K,
    value: String,
    span: Span,
    pos: Position,
}

impl<K> Token<K> {
    pub fn new(kind: K, value: impl Into<String>, span: Span, pos: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
            pos,
        }
    }

    #[inline]
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// The committed text.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Byte range of the text in the source.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Line/column of the first character.
    #[inline]
    pub fn pos(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn into_value(self) -> String {
        self.value
    }

    /// Maps the kind while keeping text and location.
    pub fn map_kind<U>(self, f: impl FnOnce(K) -> U) -> Token<U> {
        Token {
            kind: f(self.kind),
            value: self.value,
            span: self.span,
            pos: self.pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        assert_eq!(Span::new(2, 7).len(), 5);
        assert!(Span::new(3, 3).is_empty());
        // inverted spans saturate
        assert_eq!(Span::new(9, 4).len(), 0);
    }

    #[test]
    fn test_span_from_range() {
        assert_eq!(Span::from(1..4), Span::new(1, 4));
        assert_eq!(Span::new(1, 4).range(), 1..4);
    }

    #[test]
    fn test_map_kind_keeps_location() {
        let token = Token::new(1u8, "let", Span::new(4, 7), Position::new(2, 1));
        let mapped = token.map_kind(|k| k == 1);

        assert!(*mapped.kind());
        assert_eq!(mapped.value(), "let");
        assert_eq!(mapped.span(), Span::new(4, 7));
        assert_eq!(mapped.pos(), Position::new(2, 1));
    }
}
