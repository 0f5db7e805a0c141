use aaa::interp::SymbolTable;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const SOURCE: &str = "set total = (1 + 2.5) * -3 ^ 2 / (4 - 1) + 2 ^ 3 ^ 2";

fn bench_pipeline(c: &mut Criterion) {
    c.bench_function("lex", |b| {
        b.iter(|| aaa::tokenize("<bench>", black_box(SOURCE)))
    });

    c.bench_function("parse", |b| {
        b.iter(|| aaa::parse_source("<bench>", black_box(SOURCE)))
    });

    let globals = SymbolTable::new().shared();
    c.bench_function("run", |b| {
        b.iter(|| aaa::run("<bench>", black_box(SOURCE), &globals))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
