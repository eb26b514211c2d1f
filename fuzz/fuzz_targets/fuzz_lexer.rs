#![no_main]

use calc_lexer::lexer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let sync: Vec<_> = lexer(data).start_sync().collect();

    let mut last = 0;
    for tok in &sync {
        assert!(tok.span().start >= last);
        assert!(tok.span().end <= data.len());
        last = tok.span().end;
    }

    let streamed: Vec<_> = lexer(data).start().collect();
    assert_eq!(sync, streamed);
});
