// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_paged_list::PagedList;

/// Deterministic index source so runs are comparable.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn index_below(&mut self, len: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) as usize) % len.max(1)
    }
}

fn build_loaded(count: usize, page_size: usize, every_nth_page: usize) -> PagedList<u64> {
    let mut list = PagedList::new(count, page_size).expect("non-zero page size");
    let pages = list.layout().page_count(count);
    for page in (0..pages).step_by(every_nth_page) {
        let range = list.indexes_for_page(page).expect("page in range");
        list.set_page(page, range.map(|i| i as u64).collect())
            .expect("payload matches page");
    }
    list
}

fn bench_paged_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_paged_list");
    group.sample_size(50);

    for &(count, page_size) in &[(10_000_usize, 50_usize), (100_000_usize, 200_usize)] {
        let list = build_loaded(count, page_size, 2);

        group.bench_function(format!("get_random(n={count},p={page_size})"), |b| {
            let mut rng = Lcg::new(0x9A6E_0000_0000_0001);
            b.iter(|| {
                let index = rng.index_below(count);
                black_box(list.get(index).ok().flatten());
            });
        });

        group.bench_function(format!("slots_sum(n={count},p={page_size})"), |b| {
            b.iter(|| black_box(list.slots().flatten().sum::<u64>()));
        });

        group.bench_function(format!("missing_pages(n={count},p={page_size})"), |b| {
            b.iter(|| black_box(list.missing_pages(count / 3..count / 3 + 500).count()));
        });

        group.bench_function(format!("delete_front(n={count},p={page_size})"), |b| {
            b.iter_batched(
                || build_loaded(count, page_size, 1),
                |mut list| {
                    let _ = list.delete_at(0);
                    black_box(list);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("move_tail_to_front(n={count},p={page_size})"), |b| {
            b.iter_batched(
                || build_loaded(count, page_size, 1),
                |mut list| {
                    let _ = list.move_element(count - 1, 0);
                    black_box(list);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_paged_list);
criterion_main!(benches);
