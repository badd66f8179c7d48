//! Reducer and row-building benchmarks for nameform-store

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nameform_core::Entry;
use nameform_store::{reduce, rows, Command, EntriesState};

fn filled(count: usize) -> EntriesState {
    let mut state = EntriesState::default();
    for i in 0..count {
        state = reduce(&state, Command::AddName(Entry::new(format!("name-{i}"), "NYC")));
    }
    state
}

fn bench_reduce(c: &mut Criterion) {
    let small = filled(10);
    let large = filled(10_000);

    c.bench_function("add_name_small", |b| {
        b.iter(|| reduce(black_box(&small), Command::AddName(Entry::new("bob", "NYC"))))
    });

    c.bench_function("add_name_large", |b| {
        b.iter(|| reduce(black_box(&large), Command::AddName(Entry::new("bob", "NYC"))))
    });

    c.bench_function("clear_all_large", |b| {
        b.iter(|| reduce(black_box(&large), Command::ClearAll))
    });
}

fn bench_rows(c: &mut Criterion) {
    let large = filled(10_000);

    c.bench_function("rows_large", |b| b.iter(|| rows(black_box(&large))));
}

criterion_group!(benches, bench_reduce, bench_rows);
criterion_main!(benches);
