use criterion::{criterion_group, criterion_main};


use classifier::bench_classifier;

criterion_group!(benches, bench_classifier);
criterion_main!(benches);
