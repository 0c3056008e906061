//! Benchmarks: BucketMap vs ordermap::OrderMap
//!
//! Both preserve an ordered traversal, with different contracts and costs:
//!
//! | Variant              | Storage           | Lookup       | Order preserved   |
//! |----------------------|-------------------|--------------|-------------------|
//! | `ordermap::OrderMap` | Heap (hash table) | O(1) avg     | Insertion order   |
//! | `BucketMap<256, 512>`| Inline, fixed     | O(chain)     | Bucket activation |
//!
//! `BucketMap` hashes on the caller side with the byte fold and scans a
//! short chain per call — the per-operation cost tracks chain length, which
//! should show clearly in the Get benchmark.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ordered_buckets::{fold_hash, BucketMap, Key};

const N: usize = 256;
const P: usize = 512;
const KEYS: usize = 128;

fn keys() -> Vec<Key> {
    (0..KEYS)
        .map(|i| Key::try_from(format!("k{i}").as_str()).unwrap())
        .collect()
}

// ─── Insert ───────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    let keys = keys();
    let mut group = c.benchmark_group("Ordered insert (128 keys)");

    group.bench_function("BucketMap<256, 512>", |b| {
        b.iter(|| {
            let mut map: BucketMap<N, P> = BucketMap::new();
            for (i, key) in keys.iter().enumerate() {
                let bucket = fold_hash(key, N);
                map.insert(black_box(key.clone()), bucket, i as u32).unwrap();
            }
            map
        })
    });

    group.bench_function("ordermap::OrderMap", |b| {
        b.iter(|| {
            let mut map = ordermap::OrderMap::with_capacity(KEYS);
            for (i, key) in keys.iter().enumerate() {
                map.insert(black_box(key.clone()), i as u32);
            }
            map
        })
    });

    group.finish();
}

// ─── Get ──────────────────────────────────────────────────────────────────────

fn bench_get(c: &mut Criterion) {
    let keys = keys();
    let mut group = c.benchmark_group("Ordered get (128 keys)");

    let mut bucket_map: BucketMap<N, P> = BucketMap::new();
    let mut order_map = ordermap::OrderMap::with_capacity(KEYS);
    for (i, key) in keys.iter().enumerate() {
        let bucket = fold_hash(key, N);
        bucket_map.insert(key.clone(), bucket, i as u32).unwrap();
        order_map.insert(key.clone(), i as u32);
    }

    group.bench_function("BucketMap<256, 512>", |b| {
        b.iter(|| {
            for key in &keys {
                let bucket = fold_hash(key, N);
                black_box(bucket_map.get(black_box(key), bucket));
            }
        })
    });

    group.bench_function("ordermap::OrderMap", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(order_map.get(black_box(key)));
            }
        })
    });

    group.finish();
}

// ─── Churn ────────────────────────────────────────────────────────────────────

fn bench_churn(c: &mut Criterion) {
    let keys = keys();
    let mut group = c.benchmark_group("Ordered churn (insert+remove)");

    group.bench_function("BucketMap<256, 512>", |b| {
        b.iter(|| {
            let mut map: BucketMap<N, P> = BucketMap::new();
            for (i, key) in keys.iter().enumerate() {
                let bucket = fold_hash(key, N);
                map.insert(key.clone(), bucket, i as u32).unwrap();
                if i % 2 == 0 {
                    map.remove(black_box(key), bucket);
                }
            }
            map
        })
    });

    group.bench_function("ordermap::OrderMap", |b| {
        b.iter(|| {
            let mut map = ordermap::OrderMap::with_capacity(KEYS);
            for (i, key) in keys.iter().enumerate() {
                map.insert(key.clone(), i as u32);
                if i % 2 == 0 {
                    map.shift_remove(black_box(key));
                }
            }
            map
        })
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_get, bench_churn);
criterion_main!(benches);
