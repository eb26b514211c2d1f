use calc_lexer::{lex, lex_streaming};
use divan::{Bencher, black_box};

fn main() {
    divan::main();
}

const SAMPLE_LINES: &[&str] = &[
    "rate = 0.25",
    "total(price, \"net \\\"gross\\\"\") * (1 + rate) ^ 2",
    "area = pi * r ^ 2 / 4",
    "label = \"x\" + name_2",
];

/// Generate a program with N lines cycling through the samples
fn generate_program(count: usize) -> String {
    let mut result = String::with_capacity(count * 40);
    for i in 0..count {
        result.push_str(SAMPLE_LINES[i % SAMPLE_LINES.len()]);
        result.push('\n');
    }
    result
}

#[divan::bench(
    name = "sync_lex",
    args = [100, 1000, 10_000, 100_000],
)]
fn bench_sync(bencher: Bencher, n: usize) {
    let input = generate_program(n);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| black_box(lex(&input).map(|tokens| tokens.len())));
}

#[divan::bench(
    name = "streaming_lex",
    args = [100, 1000, 10_000, 100_000],
)]
fn bench_streaming(bencher: Bencher, n: usize) {
    let input = generate_program(n);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .with_inputs(|| input.clone())
        .bench_values(|input| black_box(lex_streaming(input).count()));
}
