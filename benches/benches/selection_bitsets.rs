// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use brushwork_selection::{RecordId, SelectionGroup, SelectionSet};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// A selection of `groups` groups, each holding roughly one record in eight
/// out of a `record_count`-record table.
fn make_selection(record_count: usize, groups: usize) -> SelectionSet {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    let mut sel = SelectionSet::new();
    let mut out = Vec::with_capacity(groups);
    for _ in 0..groups {
        let group: SelectionGroup = (0..record_count)
            .filter(|_| rng.next_u64() % 8 == 0)
            .map(|i| RecordId::new(i as u32))
            .collect();
        out.push(group);
    }
    sel.set_groups(Some(out));
    sel
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitset_encode");
    for &records in &[1_000usize, 100_000] {
        let sel = make_selection(records, 4);
        group.throughput(Throughput::Elements(records as u64));
        group.bench_function(BenchmarkId::new("as_bitsets", records), |b| {
            b.iter(|| sel.as_bitsets(black_box(records)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitset_decode");
    for &records in &[1_000usize, 100_000] {
        let sel = make_selection(records, 4);
        let encoded = sel.as_bitsets(records).expect("selection exists");
        group.throughput(Throughput::Elements(records as u64));
        group.bench_function(BenchmarkId::new("set_from_bitsets", records), |b| {
            b.iter(|| {
                let mut replay = SelectionSet::new();
                replay.set_from_bitsets(Some(black_box(&encoded)), records);
                replay
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
