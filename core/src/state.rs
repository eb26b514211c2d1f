use core::fmt;

use crate::Lexer;

/// A unit of scanning logic.
///
/// A state function reads from the lexer, commits text with
/// [`Lexer::emit`] or [`Lexer::ignore`], and picks the state that runs next.
/// Chaining state functions is the only control flow the engine has.
///
/// ```ignore
/// fn lex_word(l: &mut Lexer<Kind>) -> Step<Kind> {
///     l.take_while(char::is_alphanumeric);
///     l.emit(Kind::Word);
///     Step::Continue(lex_space)
/// }
/// ```
pub type StateFn<K> = fn(&mut Lexer<K>) -> Step<K>;

/// What the driver loop does after a state function returns.
pub enum Step<K> {
    /// Run this state function next.
    Continue(StateFn<K>),
    /// Stop and close the token sink.
    Terminal,
}

impl<K> Step<K> {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Terminal)
    }
}

impl<K> Clone for Step<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Step<K> {}

impl<K> fmt::Debug for Step<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Continue(_) => f.write_str("Continue(..)"),
            Step::Terminal => f.write_str("Terminal"),
        }
    }
}

impl<K> From<StateFn<K>> for Step<K> {
    #[inline]
    fn from(state: StateFn<K>) -> Self {
        Step::Continue(state)
    }
}
