//! Criterion benchmarks comparing `BalancedTree` with `std::collections::BTreeSet`
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench tree_bench
//!
//! # Run only one workload
//! cargo bench --bench tree_bench -- 'insert_random'
//! ```
//!
//! Each workload runs at sizes 2^8, 2^12 and 2^16 keys. Random keys come from a
//! fixed-seed LCG so every run measures the same sequence.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_balanced_tree::BalancedTree;
use std::collections::BTreeSet;
use std::hint::black_box;

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }
}

const LOG_SIZES: [u32; 3] = [8, 12, 16];

fn random_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next() >> 16).collect()
}

fn bench_insert_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_sequential");
    group.sample_size(20);

    for log in LOG_SIZES {
        let n = 1u64 << log;
        let label = format!("2^{log}");

        group.bench_with_input(BenchmarkId::new("balanced_tree", &label), &n, |b, &n| {
            b.iter(|| {
                let mut tree = BalancedTree::new();
                for i in 0..n {
                    tree.insert(i);
                }
                black_box(tree.len())
            })
        });
        group.bench_with_input(BenchmarkId::new("btree_set", &label), &n, |b, &n| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for i in 0..n {
                    set.insert(i);
                }
                black_box(set.len())
            })
        });
    }
    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    group.sample_size(20);

    for log in LOG_SIZES {
        let keys = random_keys(1 << log, 12345);
        let label = format!("2^{log}");

        group.bench_with_input(BenchmarkId::new("balanced_tree", &label), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = BalancedTree::new();
                for &k in keys {
                    tree.insert(k);
                }
                black_box(tree.len())
            })
        });
        group.bench_with_input(BenchmarkId::new("btree_set", &label), &keys, |b, keys| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in keys {
                    set.insert(k);
                }
                black_box(set.len())
            })
        });
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for log in LOG_SIZES {
        let keys = random_keys(1 << log, 54321);
        let probes = random_keys(1 << log, 99);
        let label = format!("2^{log}");

        let mut tree = BalancedTree::new();
        let mut set = BTreeSet::new();
        for &k in &keys {
            tree.insert(k);
            set.insert(k);
        }

        group.bench_function(BenchmarkId::new("balanced_tree", &label), |b| {
            b.iter(|| {
                let hits = keys.iter().chain(&probes).filter(|&&k| tree.find(&k)).count();
                black_box(hits)
            })
        });
        group.bench_function(BenchmarkId::new("btree_set", &label), |b| {
            b.iter(|| {
                let hits = keys.iter().chain(&probes).filter(|&&k| set.contains(&k)).count();
                black_box(hits)
            })
        });
    }
    group.finish();
}

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_remove");
    group.sample_size(20);

    for log in LOG_SIZES {
        let keys = random_keys(1 << log, 42);
        let label = format!("2^{log}");

        group.bench_with_input(BenchmarkId::new("balanced_tree", &label), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = BalancedTree::new();
                for &k in keys {
                    tree.insert(k);
                }
                for &k in keys {
                    tree.remove(&k);
                }
                black_box(tree.is_empty())
            })
        });
        group.bench_with_input(BenchmarkId::new("btree_set", &label), &keys, |b, keys| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in keys {
                    set.insert(k);
                }
                for &k in keys {
                    set.remove(&k);
                }
                black_box(set.is_empty())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_sequential,
    bench_insert_random,
    bench_find,
    bench_insert_remove
);
criterion_main!(benches);
