use allocator::GreedyAllocator;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use timetable_core::{Allocate, Grid};
use types::Demand;

/// Twelve classes, six subjects each, eight teachers shared across classes.
fn school_week() -> Vec<Demand> {
    let subjects = [("eng", 8), ("math", 8), ("sci", 6), ("urdu", 6), ("isl", 4), ("comp", 4)];
    let mut out = Vec::new();
    for c in 0..12 {
        for (i, (subject, n)) in subjects.iter().enumerate() {
            let teacher = format!("t{}", (c / 3 + i) % 8);
            out.push(Demand::new(format!("c{c:02}"), *subject, teacher, *n));
        }
    }
    out
}

fn bench_allocate(c: &mut Criterion) {
    let demands = school_week();
    let grid = Grid::default();
    c.bench_function("allocate_school_week", |b| {
        b.iter(|| GreedyAllocator.allocate(&grid, black_box(&demands)))
    });
}

criterion_group!(benches, bench_allocate);
criterion_main!(benches);
