use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roadgraph::algo::{kruskal, prim, prim_lazy, single_source, GraphStore, PairingHeap};
use roadgraph::dimacs::read_graph;
use roadgraph::LoadConfig;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Write;

/// Road-like grid in DIMACS text: both directions of every street, random lengths
fn grid_dimacs(side: u64, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::new();
    let nodes = side * side;
    let arcs = 4 * side * (side - 1);
    writeln!(out, "c synthetic grid {}x{}", side, side).unwrap();
    writeln!(out, "p sp {} {}", nodes, arcs).unwrap();

    let id = |row: u64, col: u64| row * side + col + 1;
    for row in 0..side {
        for col in 0..side {
            let mut link = |to: u64| {
                let w: u64 = rng.gen_range(1..1000);
                writeln!(out, "a {} {} {}", id(row, col), to, w).unwrap();
                writeln!(out, "a {} {} {}", to, id(row, col), w).unwrap();
            };
            if col + 1 < side {
                link(id(row, col + 1));
            }
            if row + 1 < side {
                link(id(row + 1, col));
            }
        }
    }
    out
}

fn load(text: &str) -> GraphStore {
    read_graph(text.as_bytes(), &LoadConfig::default()).unwrap().store
}

/// Benchmark parsing and building the store
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for side in [32u64, 128].iter() {
        let text = grid_dimacs(*side, 1);
        group.bench_with_input(BenchmarkId::from_parameter(side), &text, |b, text| {
            b.iter(|| criterion::black_box(load(text).edge_count()));
        });
    }
    group.finish();
}

/// Benchmark Dijkstra to all nodes and with early exit
fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");

    for side in [32u64, 128].iter() {
        let store = load(&grid_dimacs(*side, 2));
        let far = store.node_count() - 1;

        group.bench_with_input(BenchmarkId::new("all", side), &store, |b, store| {
            b.iter(|| single_source(store, 0, None).unwrap().len());
        });
        group.bench_with_input(BenchmarkId::new("target", side), &store, |b, store| {
            b.iter(|| single_source(store, 0, Some(far)).unwrap().len());
        });
    }
    group.finish();
}

/// Benchmark spanning forest algorithms
fn bench_mst(c: &mut Criterion) {
    let mut group = c.benchmark_group("mst");

    for side in [32u64, 128].iter() {
        let store = load(&grid_dimacs(*side, 3));

        group.bench_with_input(BenchmarkId::new("kruskal", side), &store, |b, store| {
            b.iter(|| kruskal(store).total_weight);
        });
        group.bench_with_input(BenchmarkId::new("prim", side), &store, |b, store| {
            b.iter(|| prim(store).total_weight);
        });
        group.bench_with_input(BenchmarkId::new("prim_lazy", side), &store, |b, store| {
            b.iter(|| prim_lazy(store).total_weight);
        });
    }
    group.finish();
}

/// Pairing heap with decrease-key against `BinaryHeap` with re-insertion
fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap");
    let mut rng = StdRng::seed_from_u64(4);
    let prios: Vec<u64> = (0..100_000).map(|_| rng.gen_range(1_000..1_000_000)).collect();

    group.bench_function("pairing_insert_delete", |b| {
        b.iter(|| {
            let mut heap = PairingHeap::with_capacity(prios.len());
            for (i, &p) in prios.iter().enumerate() {
                heap.insert(i, p);
            }
            while heap.delete_min().is_some() {}
        });
    });
    group.bench_function("binary_insert_delete", |b| {
        b.iter(|| {
            let mut heap = BinaryHeap::with_capacity(prios.len());
            for (i, &p) in prios.iter().enumerate() {
                heap.push(Reverse((p, i)));
            }
            while heap.pop().is_some() {}
        });
    });

    group.bench_function("pairing_decrease_key", |b| {
        b.iter(|| {
            let mut heap = PairingHeap::with_capacity(prios.len());
            let handles: Vec<_> = prios.iter().enumerate().map(|(i, &p)| heap.insert(i, p)).collect();
            for (h, &p) in handles.iter().zip(&prios) {
                heap.decrease_key(*h, p / 2);
            }
            while heap.delete_min().is_some() {}
        });
    });
    group.bench_function("binary_reinsert", |b| {
        b.iter(|| {
            let mut heap = BinaryHeap::with_capacity(2 * prios.len());
            let mut best = prios.clone();
            for (i, &p) in prios.iter().enumerate() {
                heap.push(Reverse((p, i)));
            }
            for (i, p) in best.iter_mut().enumerate() {
                *p /= 2;
                heap.push(Reverse((*p, i)));
            }
            let mut settled = 0usize;
            while let Some(Reverse((p, i))) = heap.pop() {
                // Stale entries are skipped
                if p == best[i] {
                    settled += 1;
                }
            }
            criterion::black_box(settled)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_load, bench_dijkstra, bench_mst, bench_heap);
criterion_main!(benches);
