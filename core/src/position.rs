//! Line/column tracking over committed text.

use core::fmt;

/// A 1-indexed line/column location. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The first character of a source.
    pub const START: Self = Self { line: 1, col: 1 };

    #[inline]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Returns the position just past `text` when it starts at `self`.
    ///
    /// Without a line break the column moves by the character count of
    /// `text`. Otherwise the line moves by the number of breaks and the
    /// column restarts after the last one.
    pub fn advance(self, text: &str) -> Self {
        match text.rfind('\n') {
            None => Self {
                line: self.line,
                col: self.col + text.chars().count(),
            },
            Some(last) => Self {
                line: self.line + text.matches('\n').count(),
                col: 1 + text[last + 1..].chars().count(),
            },
        }
    }
}

impl Default for Position {
    #[inline]
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A range between two positions. `end` is exclusive: it is the position
/// just past the last character covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

impl SourceRange {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// True when the range covers no characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when the range does not cross a line break.
    #[inline]
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// The position of the last character covered, for renderers that take
    /// an inclusive end. The column is `0` when the range ends just after a
    /// line break.
    #[inline]
    pub const fn inclusive_end(&self) -> Position {
        Position::new(self.end.line, self.end.col.saturating_sub(1))
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(f, "{}-{}", self.start, self.end.col)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", 1, 1; "empty")]
    #[test_case("abc", 1, 4; "single line")]
    #[test_case("ab\ncd", 2, 3; "one break")]
    #[test_case("a\n\n", 3, 1; "trailing breaks")]
    #[test_case("\n", 2, 1; "lone break")]
    #[test_case("héllo", 1, 6; "counts chars not bytes")]
    #[test_case("x\nß€", 2, 3; "multibyte after break")]
    fn test_advance_from_start(text: &str, line: usize, col: usize) {
        assert_eq!(Position::START.advance(text), Position::new(line, col));
    }

    #[test]
    fn test_advance_is_cumulative() {
        let pos = Position::new(4, 7).advance("ab");
        assert_eq!(pos, Position::new(4, 9));

        let pos = pos.advance("\r\nz");
        assert_eq!(pos, Position::new(5, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(3, 14).to_string(), "3:14");

        let same_line = SourceRange::new(Position::new(2, 1), Position::new(2, 5));
        assert_eq!(same_line.to_string(), "2:1-5");

        let spanning = SourceRange::new(Position::new(2, 1), Position::new(4, 2));
        assert_eq!(spanning.to_string(), "2:1-4:2");
    }

    #[test_case((1, 3), (1, 4), (1, 3); "single character")]
    #[test_case((1, 1), (1, 6), (1, 5); "word")]
    #[test_case((1, 3), (2, 1), (2, 0); "ends after a break")]
    fn test_inclusive_end(start: (usize, usize), end: (usize, usize), last: (usize, usize)) {
        let range = SourceRange::new(Position::new(start.0, start.1), Position::new(end.0, end.1));
        assert_eq!(range.inclusive_end(), Position::new(last.0, last.1));
    }

    #[test]
    fn test_empty_range() {
        let range = SourceRange::new(Position::START, Position::START);
        assert!(range.is_empty());
        assert!(range.is_single_line());
    }
}
