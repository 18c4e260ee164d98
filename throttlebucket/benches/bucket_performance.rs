use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use throttlebucket::TokenBucket;

fn benchmark_token_bucket(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_bucket");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(10));

    // Large capacity with a fast refill so requests keep being allowed
    group.bench_function("single_bucket_allowed", |b| {
        let bucket = TokenBucket::new(1_000_000, 1_000_000, Duration::from_millis(1)).unwrap();

        b.iter(|| black_box(bucket.consume_tokens(black_box(1))));
    });

    // Exhausted bucket without replenishment (deny path)
    group.bench_function("single_bucket_denied", |b| {
        let bucket = TokenBucket::new(5, 0, Duration::from_secs(60)).unwrap();
        while bucket.consume_tokens(1) {}

        b.iter(|| black_box(bucket.consume_tokens(black_box(1))));
    });

    // Refill arithmetic on every call
    group.bench_function("refill_every_call", |b| {
        let start = Instant::now();
        let bucket = TokenBucket::new_at(10, 1, Duration::from_nanos(100), start).unwrap();
        let mut now = start;

        b.iter(|| {
            now += Duration::from_nanos(150);
            black_box(bucket.consume_tokens_at(black_box(1), black_box(now)))
        });
    });

    // Many independent subjects, one bucket each
    group.bench_function("rotating_buckets_100", |b| {
        let buckets: Vec<_> = (0..100)
            .map(|_| TokenBucket::new(100, 100, Duration::from_secs(1)).unwrap())
            .collect();
        let mut counter = 0usize;

        b.iter(|| {
            let bucket = &buckets[counter % buckets.len()];
            counter += 1;
            black_box(bucket.consume_tokens(black_box(1)))
        });
    });

    group.finish();
}

fn benchmark_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_bucket_contention");
    group.measurement_time(Duration::from_secs(10));

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * 1_000) as u64));
        group.bench_function(format!("{threads}_threads"), |b| {
            let bucket = Arc::new(
                TokenBucket::new(i64::MAX, i64::MAX, Duration::from_secs(1)).unwrap(),
            );

            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let bucket = Arc::clone(&bucket);
                        thread::spawn(move || {
                            for _ in 0..1_000 {
                                black_box(bucket.consume_tokens(1));
                            }
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_token_bucket, benchmark_contention);
criterion_main!(benches);
