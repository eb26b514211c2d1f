//! The lexer: cursor, commit protocol and driver loop.
//!
//! A [`Lexer`] owns its source and is driven by a chain of
//! [state functions](crate::StateFn). Each state function reads runes with
//! [`next`](Lexer::next), [`peek`](Lexer::peek) and [`take`](Lexer::take),
//! backs out of speculative reads with [`rewind`](Lexer::rewind), and commits
//! the text read so far with [`emit`](Lexer::emit) or
//! [`ignore`](Lexer::ignore). The driver loop runs the chain until a state
//! returns [`Step::Terminal`].
//!
//! # Example
//!
//! ```ignore
//! use runelex::{Lexer, Step};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Kind { Word, Space }
//!
//! fn lex_any(l: &mut Lexer<Kind>) -> Step<Kind> {
//!     match l.peek() {
//!         None => Step::Terminal,
//!         Some(c) if c.is_whitespace() => {
//!             l.take_while(char::is_whitespace);
//!             l.emit(Kind::Space);
//!             Step::Continue(lex_any)
//!         }
//!         Some(_) => {
//!             l.take_while(|c| !c.is_whitespace());
//!             l.emit(Kind::Word);
//!             Step::Continue(lex_any)
//!         }
//!     }
//! }
//!
//! let tokens = Lexer::new("hello world", lex_any).start_sync().collect_all()?;
//! assert_eq!(tokens.len(), 3);
//! ```

use core::fmt;
use std::borrow::Cow;

use tokio::sync::mpsc;

use crate::cursor::Cursor;
use crate::error::BoxError;
use crate::sink::{Sink, Tokens};
use crate::{ContextError, LexerConfig, Position, Source, SourceRange, Span, StateFn, Step, Token};

/// Callback invoked synchronously for every reported error.
pub type ErrorHandler = Box<dyn FnMut(&ContextError) + Send + 'static>;

/// A state-function driven lexer producing tokens of kind `K`.
pub struct Lexer<K> {
    cursor: Cursor,
    pos: Position,
    initial: StateFn<K>,
    sink: Sink<K>,
    err: Option<ContextError>,
    handler: Option<ErrorHandler>,
    config: LexerConfig,
    emitted: usize,
}

impl<K> Lexer<K> {
    /// Creates a lexer over `source` that starts in `initial`.
    pub fn new(source: impl Into<Source>, initial: StateFn<K>) -> Self {
        Self::with_config(source, initial, LexerConfig::DEFAULT)
    }

    pub fn with_config(source: impl Into<Source>, initial: StateFn<K>, config: LexerConfig) -> Self {
        Self {
            cursor: Cursor::new(source.into()),
            pos: Position::START,
            initial,
            sink: Sink::buffered(),
            err: None,
            handler: None,
            config,
            emitted: 0,
        }
    }

    /// Registers a handler called synchronously from [`error`](Self::error).
    pub fn with_error_handler(mut self, handler: impl FnMut(&ContextError) + Send + 'static) -> Self {
        self.set_error_handler(handler);
        self
    }

    pub fn set_error_handler(&mut self, handler: impl FnMut(&ContextError) + Send + 'static) {
        self.handler = Some(Box::new(handler));
    }

    #[inline]
    pub fn source(&self) -> &Source {
        self.cursor.source()
    }

    #[inline]
    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Byte offset of the read head.
    #[inline]
    pub fn offset(&self) -> usize {
        self.cursor.position()
    }

    /// Byte offset of the last commit point.
    #[inline]
    pub fn commit_offset(&self) -> usize {
        self.cursor.start()
    }

    /// Line/column of the last commit point.
    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// The last error reported through [`error`](Self::error).
    #[inline]
    pub fn last_error(&self) -> Option<&ContextError> {
        self.err.as_ref()
    }

    // ---------------------------------------------------------------------
    // Rune cursor
    // ---------------------------------------------------------------------

    /// Reads the next rune, or `None` at end of input.
    ///
    /// A malformed byte reads as [`REPLACEMENT`](crate::REPLACEMENT) and
    /// advances exactly one byte.
    #[inline]
    pub fn next(&mut self) -> Option<char> {
        self.cursor.next()
    }

    /// Undoes the most recent [`next`](Self::next). Never moves behind the
    /// last commit point.
    #[inline]
    pub fn rewind(&mut self) {
        self.cursor.rewind();
    }

    /// Looks at the next rune without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Option<char> {
        self.cursor.peek()
    }

    /// Consumes runes while they are members of `accept`.
    #[inline]
    pub fn take(&mut self, accept: &str) {
        self.cursor.take_while(|ch| accept.contains(ch));
    }

    /// Consumes runes while `pred` holds; returns how many were consumed.
    #[inline]
    pub fn take_while(&mut self, pred: impl FnMut(char) -> bool) -> usize {
        self.cursor.take_while(pred)
    }

    /// Consumes the next rune only if it is one of `valid`.
    #[inline]
    pub fn accept(&mut self, valid: &str) -> bool {
        self.cursor.accept(valid)
    }

    // ---------------------------------------------------------------------
    // Commit protocol
    // ---------------------------------------------------------------------

    /// The text read since the last commit point.
    #[inline]
    pub fn current(&self) -> Cow<'_, str> {
        self.cursor.pending()
    }

    /// Emits the pending text as a token of `kind` and commits it.
    pub fn emit(&mut self, kind: K) {
        let value = self.cursor.pending().into_owned();
        let pos = self.pos;
        self.pos = pos.advance(&value);
        let span = self.cursor.commit();

        tracing::trace!(start = span.start, end = span.end, %pos, "emit");
        self.emitted += 1;
        self.sink.push(Token::new(kind, value, span, pos));
    }

    /// Commits the pending text without producing a token.
    pub fn ignore(&mut self) {
        self.pos = self.pos.advance(&self.cursor.pending());
        let span = self.cursor.commit();
        tracing::trace!(start = span.start, end = span.end, "ignore");
    }

    // ---------------------------------------------------------------------
    // Error reporting
    // ---------------------------------------------------------------------

    /// Records a lexical error covering the pending text.
    ///
    /// The range runs from the last commit point to the read head; nothing is
    /// committed. The registered handler, if any, is called before this
    /// returns. Scanning continues: return [`Step::Terminal`] to stop.
    pub fn error(&mut self, err: impl Into<BoxError>) {
        let end = self.pos.advance(&self.cursor.pending());
        let range = SourceRange::new(self.pos, end);
        let span: Span = self.cursor.pending_span();
        let error = ContextError::new(self.cursor.source().clone(), range, span, err);

        tracing::debug!(%range, error = %error.error(), "lexical error");
        if let Some(handler) = self.handler.as_mut() {
            handler(&error);
        }
        self.err = Some(error);
    }

    // ---------------------------------------------------------------------
    // Driver loop
    // ---------------------------------------------------------------------

    /// Runs the state chain on the calling thread, then hands back every
    /// token it emitted.
    pub fn start_sync(mut self) -> Tokens<K> {
        let capacity = self.config.capacity_for(self.cursor.source().len());
        self.sink.reserve(capacity);
        tracing::debug!(mode = "sync", len = self.cursor.source().len(), capacity, "lexer start");

        self.run();
        Tokens::buffered(self.sink.take_buffered(), self.err.take())
    }

    fn run(&mut self) {
        let mut state = Step::Continue(self.initial);
        while let Step::Continue(f) = state {
            state = f(self);
        }
        self.sink.close();
        tracing::debug!(
            tokens = self.emitted,
            offset = self.cursor.position(),
            failed = self.err.is_some(),
            "lexer finished"
        );
    }
}

impl<K: Send + 'static> Lexer<K> {
    /// Runs the state chain on a worker thread and returns immediately.
    ///
    /// The worker writes into a channel bounded by
    /// [`LexerConfig::capacity_for`] and blocks while it is full. Tokens
    /// emitted before `start` are delivered first.
    ///
    /// There is no cancellation: the chain runs until it terminates. If the
    /// returned [`Tokens`] is dropped early, later tokens are discarded.
    pub fn start(mut self) -> Tokens<K> {
        let capacity = self.config.capacity_for(self.cursor.source().len());
        let (tx, rx) = mpsc::channel(capacity);
        let backlog = self.sink.take_buffered();
        self.sink = Sink::channel(tx);
        tracing::debug!(mode = "async", len = self.cursor.source().len(), capacity, "lexer start");

        let worker = std::thread::Builder::new()
            .name(self.config.thread_name.to_owned())
            .spawn(move || {
                for token in backlog {
                    self.sink.push(token);
                }
                self.run();
                self.err.take()
            });

        Tokens::channel(rx, worker)
    }
}

impl<K> fmt::Debug for Lexer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("start", &self.cursor.start())
            .field("offset", &self.cursor.position())
            .field("position", &self.pos)
            .field("emitted", &self.emitted)
            .field("err", &self.err)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
