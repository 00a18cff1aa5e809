use boxed_collections::{DropValue, Map, NaturalOrder, RbTree, Set};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet};

/// Scrambled but deterministic key order.
fn keys(n: u32) -> Vec<u32> {
    (0..n).map(|i| i.wrapping_mul(2_654_435_761) % (n * 4)).collect()
}

fn bench_tree(c: &mut Criterion) {
    let ks = keys(1000);
    {
        let mut group = c.benchmark_group("BTreeMap vs Map (Insert 1000)");
        group.bench_function("std::collections::BTreeMap", |b| {
            b.iter(|| {
                let mut m = BTreeMap::new();
                for k in &ks {
                    m.insert(black_box(*k), *k);
                }
                m
            })
        });

        group.bench_function("Map<u32, u32>", |b| {
            b.iter(|| {
                let mut m: Map<u32, u32> = Map::natural();
                for k in &ks {
                    let _ = m.insert(black_box(*k), *k);
                }
                m
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("BTreeSet vs Set (Lookup 1000)");
        let std_set: BTreeSet<u32> = ks.iter().copied().collect();
        let mut ours: Set<u32> = Set::natural();
        for k in &ks {
            let _ = ours.insert(*k);
        }

        group.bench_function("std::collections::BTreeSet", |b| {
            b.iter(|| {
                for k in &ks {
                    black_box(std_set.contains(black_box(k)));
                }
            })
        });
        group.bench_function("Set<u32>", |b| {
            b.iter(|| {
                for k in &ks {
                    black_box(ours.exists(black_box(k)));
                }
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("RbTree index width (Insert/Remove 1000)");
        group.bench_function("RbTree<u32, (), u32 index>", |b| {
            b.iter(|| {
                let mut t: RbTree<u32, ()> = RbTree::natural();
                for k in &ks {
                    let _ = t.insert(*k, ());
                }
                for k in &ks {
                    let _ = t.remove(black_box(k));
                }
            })
        });
        group.bench_function("RbTree<u32, (), u16 index>", |b| {
            b.iter(|| {
                let mut t: RbTree<u32, (), NaturalOrder, DropValue, DropValue, u16> =
                    RbTree::default();
                for k in &ks {
                    let _ = t.insert(*k, ());
                }
                for k in &ks {
                    let _ = t.remove(black_box(k));
                }
            })
        });
        group.finish();
    }
}

criterion_group!(benches, bench_tree);
criterion_main!(benches);
