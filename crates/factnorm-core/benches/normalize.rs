use criterion::{black_box, criterion_group, criterion_main, Criterion};
use factnorm_core::normalizer::{normalize_slice, serialize_facts};
use factnorm_core::{Extraction, OutputStyle};

fn object_input(n: usize) -> Vec<u8> {
    let records: Vec<serde_json::Value> = (0..n)
        .map(|i| serde_json::json!({"fact": format!("Cat fact number {}.", i), "length": 18}))
        .collect();
    serde_json::to_vec(&records).unwrap()
}

fn string_input(n: usize) -> Vec<u8> {
    let records: Vec<String> = (0..n).map(|i| format!("Dog fact number {}.", i)).collect();
    serde_json::to_vec(&records).unwrap()
}

fn bench_normalize(c: &mut Criterion) {
    let objects = object_input(10_000);
    let strings = string_input(10_000);
    let field = Extraction::fact_field();

    c.bench_function("normalize 10k objects", |b| {
        b.iter(|| normalize_slice(black_box(&objects), &field).unwrap())
    });
    c.bench_function("normalize 10k strings", |b| {
        b.iter(|| normalize_slice(black_box(&strings), &Extraction::Identity).unwrap())
    });

    let facts = normalize_slice(&strings, &Extraction::Identity).unwrap();
    c.bench_function("serialize 10k facts", |b| {
        b.iter(|| serialize_facts(black_box(&facts), OutputStyle::Compact).unwrap())
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
