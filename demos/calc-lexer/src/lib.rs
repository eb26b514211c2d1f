#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Calculator Lexer Example
//!
//! This example builds a tokenizer for a small expression language on top of
//! runelex. Each scanning rule is a state function; the lexer drives them
//! until one returns [`Step::Terminal`].
//!
//! # Format
//!
//! ```text
//! rate = 0.25
//! total(price, "net \"gross\"") * (1 + rate) ^ 2
//! ```
//!
//! - numbers: `42`, `3.14` (a dot not followed by a digit is left for the
//!   next token)
//! - identifiers: letters, digits and `_`, not starting with a digit
//! - strings: double quoted, `\` escapes the next character
//! - operators `+ - * / ^ =`, parentheses and commas
//! - whitespace is skipped

use core::fmt;

use runelex::{Lexer, Source, Step, Token, Tokens};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("unterminated string literal")]
    UnterminatedString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Number,
    Ident,
    Str,
    Op,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Number => "number",
            Kind::Ident => "identifier",
            Kind::Str => "string",
            Kind::Op => "operator",
            Kind::LParen => "`(`",
            Kind::RParen => "`)`",
            Kind::Comma => "`,`",
        })
    }
}

const DIGITS: &str = "0123456789";
const OPERATORS: &str = "+-*/^=";

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn lex_start(l: &mut Lexer<Kind>) -> Step<Kind> {
    let Some(c) = l.peek() else {
        return Step::Terminal;
    };

    match c {
        c if c.is_whitespace() => {
            l.take_while(char::is_whitespace);
            l.ignore();
            Step::Continue(lex_start)
        }
        c if c.is_ascii_digit() => Step::Continue(lex_number),
        c if is_ident_start(c) => Step::Continue(lex_ident),
        '"' => Step::Continue(lex_string),
        '(' => single(l, Kind::LParen),
        ')' => single(l, Kind::RParen),
        ',' => single(l, Kind::Comma),
        c if OPERATORS.contains(c) => single(l, Kind::Op),
        c => {
            l.next();
            l.error(CalcError::UnexpectedChar(c));
            Step::Terminal
        }
    }
}

fn single(l: &mut Lexer<Kind>, kind: Kind) -> Step<Kind> {
    l.next();
    l.emit(kind);
    Step::Continue(lex_start)
}

fn lex_number(l: &mut Lexer<Kind>) -> Step<Kind> {
    l.take(DIGITS);
    if l.accept(".") && l.take_while(|c| c.is_ascii_digit()) == 0 {
        // `3.` followed by something else: leave the dot
        l.rewind();
    }
    l.emit(Kind::Number);
    Step::Continue(lex_start)
}

fn lex_ident(l: &mut Lexer<Kind>) -> Step<Kind> {
    l.take_while(is_ident_continue);
    l.emit(Kind::Ident);
    Step::Continue(lex_start)
}

fn lex_string(l: &mut Lexer<Kind>) -> Step<Kind> {
    l.next();
    loop {
        match l.next() {
            Some('"') => {
                l.emit(Kind::Str);
                return Step::Continue(lex_start);
            }
            Some('\\') => {
                if l.next().is_none() {
                    l.error(CalcError::UnterminatedString);
                    return Step::Terminal;
                }
            }
            Some(_) => {}
            None => {
                l.error(CalcError::UnterminatedString);
                return Step::Terminal;
            }
        }
    }
}

/// A lexer over `src` positioned at the first token.
pub fn lexer(src: impl Into<Source>) -> Lexer<Kind> {
    Lexer::new(src, lex_start)
}

/// Tokenizes `src` on the calling thread.
#[tracing::instrument(level = "debug", skip_all, fields(len = src.len()))]
pub fn lex(src: &str) -> Result<Vec<Token<Kind>>, runelex::Error> {
    lexer(src).start_sync().collect_all()
}

/// Tokenizes `src` on a worker thread, yielding tokens as they are scanned.
pub fn lex_streaming(src: impl Into<Source>) -> Tokens<Kind> {
    lexer(src).start()
}

/// Decodes the escapes of a string token's text, dropping the quotes.
pub fn unescape(literal: &str) -> Result<String, CalcError> {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(CalcError::UnterminatedString)?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => return Err(CalcError::UnterminatedString),
            },
            c => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::panic)]
    fn kinds(src: &str) -> Vec<Kind> {
        match lex(src) {
            Ok(tokens) => tokens.iter().map(|t| *t.kind()).collect(),
            Err(err) => panic!("lexing {src:?} failed: {err}"),
        }
    }

    #[test]
    #[should_panic(expected = "unexpected character '$'")]
    fn test_kinds_reports_lex_errors() {
        kinds("1 $ 2");
    }

    #[test]
    fn test_lex_simple_expression() {
        assert_eq!(
            kinds("1 + x"),
            vec![Kind::Number, Kind::Op, Kind::Ident]
        );
    }

    #[test]
    fn test_lex_call() {
        assert_eq!(
            kinds("f(a, 2)"),
            vec![
                Kind::Ident,
                Kind::LParen,
                Kind::Ident,
                Kind::Comma,
                Kind::Number,
                Kind::RParen
            ]
        );
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#""a\"b\n""#), Ok("a\"b\n".to_owned()));
        assert_eq!(unescape(r#""plain""#), Ok("plain".to_owned()));
        assert_eq!(unescape("\"dangling\\\""), Err(CalcError::UnterminatedString));
        assert_eq!(unescape("no quotes"), Err(CalcError::UnterminatedString));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::Number.to_string(), "number");
        assert_eq!(Kind::LParen.to_string(), "`(`");
    }
}
