use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use switchback::{DoubleKeyTable, InfiniteHashTable, LinearProbeTable};

// Sequential construction order would always probe in hash order; shuffle
// with a fixed seed so clusters form the way they do under real workloads
// while runs stay comparable.
fn keys(n: usize) -> Vec<String> {
    let mut keys: Vec<String> = (0..n).map(|i| format!("mountain{:04}", i)).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(1008));
    keys
}

fn bench_linear_probe(c: &mut Criterion) {
    let keys = keys(1000);

    c.bench_function("linear_probe_insert_1000", |b| {
        b.iter(|| {
            let mut table = LinearProbeTable::<String, usize>::new();
            for (i, key) in keys.iter().enumerate() {
                table.set(key.clone(), i).unwrap();
            }
            black_box(table.len())
        })
    });

    let mut table = LinearProbeTable::<String, usize>::new();
    for (i, key) in keys.iter().enumerate() {
        table.set(key.clone(), i).unwrap();
    }
    c.bench_function("linear_probe_get_1000", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(table.get(key).unwrap());
            }
        })
    });
}

fn bench_double_key(c: &mut Criterion) {
    let keys = keys(1000);

    c.bench_function("double_key_insert_1000", |b| {
        b.iter(|| {
            let mut table = DoubleKeyTable::<String, String, usize>::new();
            for (i, key) in keys.iter().enumerate() {
                table
                    .set(format!("{}", i % 10), key.clone(), i)
                    .unwrap();
            }
            black_box(table.len())
        })
    });
}

fn bench_infinite(c: &mut Criterion) {
    let keys = keys(1000);

    c.bench_function("infinite_insert_1000", |b| {
        b.iter(|| {
            let mut table = InfiniteHashTable::<String, usize>::new();
            for (i, key) in keys.iter().enumerate() {
                table.set(key.clone(), i);
            }
            black_box(table.len())
        })
    });

    let mut table = InfiniteHashTable::<String, usize>::new();
    for (i, key) in keys.iter().enumerate() {
        table.set(key.clone(), i);
    }
    c.bench_function("infinite_sort_keys_1000", |b| {
        b.iter(|| black_box(table.sort_keys().len()))
    });
}

criterion_group!(benches, bench_linear_probe, bench_double_key, bench_infinite);
criterion_main!(benches);
