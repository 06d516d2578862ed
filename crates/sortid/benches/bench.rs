use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use sortid::{
    Backoff, Ksuid, KsuidGenerator, Poll, SnowflakeGenerator, SystemClock, ThreadRandom,
    TimeSource, Ulid, UlidGenerator, WaitPolicy, WorkerIdentity, CUSTOM_EPOCH_MS,
    radix::{self, BASE62},
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded). Fits exactly one millisecond of Snowflake sequence values.
const TOTAL_IDS: usize = 4096;

fn identity() -> WorkerIdentity {
    WorkerIdentity::new(CUSTOM_EPOCH_MS, 1, 1).unwrap()
}

/// Hot path: a fixed clock, so every ID comes from the same millisecond and is
/// always `Ready`.
fn benchmark_mock_sequential_snowflake(c: &mut Criterion) {
    let mut group = c.benchmark_group("mock/sequential/snowflake");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator = SnowflakeGenerator::new(
                    identity(),
                    FixedMockTime {
                        millis: CUSTOM_EPOCH_MS + 1,
                    },
                )
                .unwrap();
                for _ in 0..TOTAL_IDS {
                    match generator.try_generate().unwrap() {
                        Poll::Ready { value } => {
                            black_box(value);
                        }
                        Poll::Pending { .. } => unreachable!(),
                    }
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

/// Wall clock with yielding when a millisecond runs out.
fn benchmark_mono_sequential_snowflake(c: &mut Criterion) {
    let mut group = c.benchmark_group("mono/sequential/snowflake");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = SnowflakeGenerator::new(identity(), SystemClock::default())
        .unwrap()
        .with_wait_policy(WaitPolicy::unbounded(Backoff::Yield));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.generate().unwrap());
            }
        });
    });

    group.finish();
}

/// One shared generator, increasing thread counts.
fn benchmark_mono_contended_snowflake(c: &mut Criterion) {
    let mut group = c.benchmark_group("mono/contended/snowflake");

    for thread_count in [1, 2, 4, 8] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(
            format!("elems/{TOTAL_IDS}/threads/{thread_count}"),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();

                    for _ in 0..iters {
                        let generator = SnowflakeGenerator::new(identity(), SystemClock::default())
                            .unwrap()
                            .with_wait_policy(WaitPolicy::unbounded(Backoff::Yield));
                        let barrier = Arc::new(Barrier::new(thread_count + 1));
                        scope(|s| {
                            for _ in 0..thread_count {
                                let generator = generator.clone();
                                let barrier = Arc::clone(&barrier);
                                s.spawn(move || {
                                    barrier.wait();
                                    for _ in 0..ids_per_thread {
                                        black_box(generator.generate().unwrap());
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

fn benchmark_ulid(c: &mut Criterion) {
    let mut group = c.benchmark_group("ulid");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let mono = UlidGenerator::new(FixedMockTime { millis: 1 }, ThreadRandom);
    group.bench_function(format!("mock/monotonic/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(mono.generate().unwrap());
            }
        });
    });

    let fresh = UlidGenerator::non_monotonic(SystemClock::default(), ThreadRandom);
    group.bench_function(format!("non_monotonic/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(fresh.generate().unwrap());
            }
        });
    });

    group.finish();
}

fn benchmark_ksuid(c: &mut Criterion) {
    let mut group = c.benchmark_group("ksuid");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = KsuidGenerator::new(SystemClock::default(), ThreadRandom);
    group.bench_function(format!("generate/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.generate());
            }
        });
    });

    group.finish();
}

fn benchmark_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let ulid = Ulid::from_raw(u128::MAX >> 2);
    group.bench_function("ulid/base32", |b| b.iter(|| black_box(ulid).encode()));

    let ksuid = Ksuid::MAX;
    group.bench_function("ksuid/base62", |b| b.iter(|| black_box(ksuid).encode()));

    let text = ksuid.encode();
    group.bench_function("ksuid/decode", |b| {
        b.iter(|| Ksuid::decode(black_box(&text)).unwrap())
    });

    let payload = [0xA5_u8; 64];
    group.bench_function("radix/base62/64_bytes", |b| {
        b.iter(|| radix::encode(black_box(&payload), &BASE62))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_mock_sequential_snowflake,
    benchmark_mono_sequential_snowflake,
    benchmark_mono_contended_snowflake,
    benchmark_ulid,
    benchmark_ksuid,
    benchmark_encoding,
);
criterion_main!(benches);
