//! Position Accuracy Tests
//!
//! Verifies the line/column attached to tokens and carried by the lexer
//! after each commit, including multi-byte text and ignored runs.

use runelex::{Lexer, Position, Span, Step, Token};
use test_case::test_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Text,
    Ident,
    Number,
    Sym,
}

fn lex_all(l: &mut Lexer<Kind>) -> Step<Kind> {
    l.take_while(|_| true);
    l.emit(Kind::Text);
    Step::Terminal
}

fn lex_code(l: &mut Lexer<Kind>) -> Step<Kind> {
    match l.peek() {
        None => Step::Terminal,
        Some(c) if c.is_whitespace() => {
            l.take_while(char::is_whitespace);
            l.ignore();
            Step::Continue(lex_code)
        }
        Some(c) if c.is_alphabetic() || c == '_' => {
            l.take_while(|c| c.is_alphanumeric() || c == '_');
            l.emit(Kind::Ident);
            Step::Continue(lex_code)
        }
        Some(c) if c.is_ascii_digit() => {
            l.take("0123456789");
            l.emit(Kind::Number);
            Step::Continue(lex_code)
        }
        Some(_) => {
            l.next();
            l.emit(Kind::Sym);
            Step::Continue(lex_code)
        }
    }
}

fn idle(_: &mut Lexer<Kind>) -> Step<Kind> {
    Step::Terminal
}

/// Renders one token per line as `line:col kind span value`.
fn dump(tokens: impl Iterator<Item = Token<Kind>>) -> String {
    tokens
        .map(|t| {
            format!(
                "{} {:?} {}..{} {:?}",
                t.pos(),
                t.kind(),
                t.span().start,
                t.span().end,
                t.value()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test_case("ab\ncd", 2, 3; "two lines")]
#[test_case("", 1, 1; "empty")]
#[test_case("abc", 1, 4; "no break")]
#[test_case("\n\n\n", 4, 1; "only breaks")]
#[test_case("日本語", 1, 4; "cjk counts runes")]
#[test_case("x\r\ny", 2, 2; "crlf counts one break")]
#[test_case("tab\there", 1, 9; "tab is one column")]
fn single_emit_moves_tracker(src: &str, line: usize, col: usize) {
    let mut lexer = Lexer::new(src, idle);
    lexer.take_while(|_| true);
    lexer.emit(Kind::Text);
    assert_eq!(lexer.position(), Position::new(line, col));
}

#[test]
fn whole_source_token_starts_at_origin() {
    let tokens: Vec<_> = Lexer::new("ab\ncd", lex_all).start_sync().collect();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].pos(), Position::START);
    assert_eq!(tokens[0].span(), Span::new(0, 5));
}

#[test]
fn ignored_text_advances_tracker() {
    let mut lexer = Lexer::new("  \n   x", idle);
    lexer.take(" \n");
    lexer.ignore();
    assert_eq!(lexer.position(), Position::new(2, 4));
}

#[test]
fn speculative_reads_do_not_move_tracker() {
    let mut lexer = Lexer::new("ab\n\ncd", idle);
    for _ in 0..5 {
        lexer.next();
    }
    assert_eq!(lexer.position(), Position::START);

    for _ in 0..3 {
        lexer.rewind();
    }
    lexer.emit(Kind::Text);
    assert_eq!(lexer.position(), Position::new(1, 3));
}

#[test]
fn token_positions_snapshot() {
    let src = "fn main() {\n    let señor = 42;\n}\n";
    let tokens = Lexer::new(src, lex_code).start_sync();

    insta::assert_snapshot!(dump(tokens), @r#"
    1:1 Ident 0..2 "fn"
    1:4 Ident 3..7 "main"
    1:8 Sym 7..8 "("
    1:9 Sym 8..9 ")"
    1:11 Sym 10..11 "{"
    2:5 Ident 16..19 "let"
    2:9 Ident 20..26 "señor"
    2:15 Sym 27..28 "="
    2:17 Number 29..31 "42"
    2:19 Sym 31..32 ";"
    3:1 Sym 33..34 "}"
    "#);
}
