#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use runelex::{Lexer, Step};

#[derive(Debug, Arbitrary)]
enum Op {
    Next,
    Rewind,
    Peek,
    Emit,
    Ignore,
}

#[derive(Debug, Arbitrary)]
struct Input {
    source: Vec<u8>,
    ops: Vec<Op>,
}

fn idle(_: &mut Lexer<u8>) -> Step<u8> {
    Step::Terminal
}

fuzz_target!(|input: Input| {
    let len = input.source.len();
    let mut lexer = Lexer::new(input.source, idle);

    for op in input.ops {
        let start = lexer.commit_offset();
        match op {
            Op::Next => {
                lexer.next();
            }
            Op::Rewind => lexer.rewind(),
            Op::Peek => {
                let before = lexer.offset();
                let first = lexer.peek();
                assert_eq!(lexer.peek(), first);
                assert_eq!(lexer.offset(), before);
            }
            Op::Emit => lexer.emit(0),
            Op::Ignore => lexer.ignore(),
        }
        assert!(lexer.offset() <= len);
        if !matches!(op, Op::Emit | Op::Ignore) {
            assert!(lexer.offset() >= start);
        }
    }
});
