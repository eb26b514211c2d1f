//! Error types for runelex.
//!
//! The engine itself never fails a scan. Lexical errors are raised by state
//! functions through `Lexer::error`, which wraps the caller's error value in a
//! [`ContextError`] carrying the source and the offending range. Rendering
//! that range into a message with a source excerpt is left to a diagnostics
//! library; [`ContextError`] only supplies the pieces.

use std::borrow::Cow;

use thiserror::Error;

use crate::{Source, SourceRange, Span};

/// Boxed caller error carried inside a [`ContextError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A caller-raised lexical error with its location in the source.
///
/// `Display` prints `line:col: message`; everything else a renderer needs is
/// available through the accessors.
#[derive(Debug, Error)]
#[error("{}: {}", .range.start, .error)]
pub struct ContextError {
    text: Source,
    range: SourceRange,
    span: Span,
    #[source]
    error: BoxError,
}

impl ContextError {
    pub fn new(text: Source, range: SourceRange, span: Span, error: impl Into<BoxError>) -> Self {
        Self {
            text,
            range,
            span,
            error: error.into(),
        }
    }

    /// The full source the error refers to.
    #[inline]
    pub fn source_text(&self) -> &Source {
        &self.text
    }

    /// From the last commit point to the read head at the time of the report.
    ///
    /// The end is exclusive. Renderers that expect the last covered column
    /// should use [`SourceRange::inclusive_end`].
    #[inline]
    pub fn range(&self) -> SourceRange {
        self.range
    }

    /// Byte counterpart of [`range`](Self::range).
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The uncommitted text that was pending when the error was raised.
    pub fn snippet(&self) -> Cow<'_, str> {
        self.text.slice(self.span)
    }

    /// The caller's error value.
    #[inline]
    pub fn error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.error
    }

    /// Downcasts the caller's error value.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.error.downcast_ref::<E>()
    }

    pub fn into_error(self) -> BoxError {
        self.error
    }
}

/// Errors surfaced when a token stream is finished.
#[derive(Debug, Error)]
pub enum Error {
    /// A state function reported a lexical error; the last one is kept.
    #[error(transparent)]
    Lex(#[from] ContextError),

    /// The background worker could not be spawned.
    #[error("failed to spawn lexer worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// A state function panicked on the background worker.
    #[error("lexer worker panicked")]
    WorkerPanicked,
}

impl Error {
    /// The lexical error, if this is one.
    pub fn as_lex(&self) -> Option<&ContextError> {
        match self {
            Error::Lex(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[derive(Debug, Error, PartialEq)]
    #[error("unexpected {0:?}")]
    struct Unexpected(char);

    fn context_error() -> ContextError {
        ContextError::new(
            Source::from("let x = $;"),
            SourceRange::new(Position::new(1, 9), Position::new(1, 10)),
            Span::new(8, 9),
            Unexpected('$'),
        )
    }

    #[test]
    fn test_context_error_display() {
        assert_eq!(context_error().to_string(), "1:9: unexpected '$'");
    }

    #[test]
    fn test_context_error_accessors() {
        let err = context_error();
        assert_eq!(err.snippet(), "$");
        assert_eq!(err.span(), Span::new(8, 9));
        assert_eq!(err.downcast_ref::<Unexpected>(), Some(&Unexpected('$')));
        assert_eq!(err.source_text().len(), 10);
    }

    #[test]
    fn test_context_error_source_chain() {
        use std::error::Error as _;

        let err = context_error();
        let cause = err.source().map(ToString::to_string);
        assert_eq!(cause.as_deref(), Some("unexpected '$'"));
    }

    #[test]
    fn test_string_errors_are_accepted() {
        let err = ContextError::new(
            Source::from(""),
            SourceRange::default(),
            Span::default(),
            "bad input",
        );
        assert_eq!(err.to_string(), "1:1: bad input");
    }

    #[test]
    fn test_error_transparent_display() {
        let err = Error::from(context_error());
        assert_eq!(err.to_string(), "1:9: unexpected '$'");
        assert!(err.as_lex().is_some());
        assert!(Error::WorkerPanicked.as_lex().is_none());
    }
}
