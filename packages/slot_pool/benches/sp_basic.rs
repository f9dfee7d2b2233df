//! Basic benchmarks for the `slot_pool` crate.
//!
//! Every operation except construction is expected to report zero allocations.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::Instant;

use alloc_tracker::Allocator;
use criterion::{Criterion, criterion_group, criterion_main};
use slot_pool::SlotPool;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[global_allocator]
static ALLOCATOR: Allocator<std::alloc::System> = Allocator::system();

type TestItem = usize;
const TEST_VALUE: TestItem = 1024;
const CAPACITY: usize = 1024;

fn entrypoint(c: &mut Criterion) {
    let allocs = alloc_tracker::Session::new();

    let mut group = c.benchmark_group("slot_pool_basic");

    let allocs_op = allocs.operation("build");
    group.bench_function("build", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(SlotPool::<TestItem>::new(CAPACITY)));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("insert_first");
    group.bench_function("insert_first", |b| {
        b.iter_custom(|iters| {
            let mut pools = iter::repeat_with(|| SlotPool::<TestItem>::new(CAPACITY))
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for pool in &mut pools {
                _ = black_box(pool.insert(black_box(TEST_VALUE)));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("insert_last");
    group.bench_function("insert_last", |b| {
        b.iter_custom(|iters| {
            let mut pools = iter::repeat_with(|| SlotPool::<TestItem>::new(CAPACITY))
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            // Fill all but the last slot so the insert scans the whole table.
            for pool in &mut pools {
                for _ in 1..CAPACITY {
                    _ = pool.insert(TEST_VALUE).unwrap();
                }
            }

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for pool in &mut pools {
                _ = black_box(pool.insert(black_box(TEST_VALUE)));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("get");
    group.bench_function("get", |b| {
        b.iter_custom(|iters| {
            let mut pool = SlotPool::<TestItem>::new(CAPACITY);
            let handle = pool.insert(TEST_VALUE).unwrap();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(pool.get(black_box(handle)));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("get_dangling");
    group.bench_function("get_dangling", |b| {
        b.iter_custom(|iters| {
            let mut pool = SlotPool::<TestItem>::new(CAPACITY);
            let handle = pool.insert(TEST_VALUE).unwrap();
            pool.release(handle).unwrap();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(pool.get(black_box(handle)));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("insert_release_cycle");
    group.bench_function("insert_release_cycle", |b| {
        b.iter_custom(|iters| {
            let mut pool = SlotPool::<TestItem>::new(CAPACITY);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                // Without the occasional reset the pool would exhaust every slot.
                if pool.is_full() {
                    pool.reset();
                }

                let handle = pool.insert(black_box(TEST_VALUE)).unwrap();
                pool.release(black_box(handle)).unwrap();
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("reusable_slot_count");
    group.bench_function("reusable_slot_count", |b| {
        b.iter_custom(|iters| {
            let pool = SlotPool::<TestItem>::new(CAPACITY);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(pool.reusable_slot_count());
            }

            start.elapsed()
        });
    });

    group.finish();

    allocs.print_to_stdout();
}
