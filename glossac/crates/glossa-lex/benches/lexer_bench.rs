//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package glossa-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use glossa_lex::Lexer;
use glossa_util::Handler;

fn lexer_token_count(source: &str) -> usize {
    let mut handler = Handler::new();
    Lexer::new(source, &mut handler).tokenize().len()
}

fn bench_lexer_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = "ΠΡΟΓΡΑΜΜΑ Τ ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: α ΑΡΧΗ α<-42 ΓΡΑΨΕ α ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("short_assignment", |b| {
        b.iter(|| lexer_token_count(black_box("α <- 1")))
    });

    group.bench_function("full_program", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_loops(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_loops");

    let source = r#"
        ΠΡΟΓΡΑΜΜΑ ΠΑΡΑΓΟΝΤΙΚΟ
        ΜΕΤΑΒΛΗΤΕΣ
            ΑΚΕΡΑΙΕΣ: i, f
        ΑΡΧΗ
            f <- 1
            ΓΙΑ i ΑΠΟ 2 ΜΕΧΡΙ 5
                f <- f * i
            ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
            ΓΡΑΨΕ f
        ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("for_loop_program", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("ascii_quotes", |b| {
        b.iter(|| lexer_token_count(black_box("ΓΡΑΨΕ \"γεια σου κόσμε\"")))
    });

    group.bench_function("guillemets", |b| {
        b.iter(|| lexer_token_count(black_box("ΓΡΑΨΕ «γεια σου κόσμε»")))
    });

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("integer", |b| {
        b.iter(|| lexer_token_count(black_box("α <- 123456")))
    });

    group.bench_function("real", |b| {
        b.iter(|| lexer_token_count(black_box("α <- 3.14159")))
    });

    group.finish();
}

fn bench_lexer_identifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_identifiers");

    group.bench_function("greek_identifier", |b| {
        b.iter(|| lexer_token_count(black_box("μεταβλητη_με_μακρυ_ονομα <- 42")))
    });

    group.bench_function("many_identifiers", |b| {
        b.iter(|| {
            lexer_token_count(black_box(
                "α <- 1 β <- 2 γ <- 3 δ <- 4 ε <- 5",
            ))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_program,
    bench_lexer_loops,
    bench_lexer_strings,
    bench_lexer_numbers,
    bench_lexer_identifiers
);
criterion_main!(benches);
