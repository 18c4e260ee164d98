use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::thread;
use std::time::Duration;
use throttlebucket::TokenBucket;

#[test]
fn test_concurrent_consumers_drain_exactly_capacity() {
    let bucket = Arc::new(TokenBucket::new(100, 100, Duration::from_secs(3)).unwrap());
    let granted = Arc::new(AtomicI64::new(0));

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let bucket = Arc::clone(&bucket);
            let granted = Arc::clone(&granted);
            thread::spawn(move || {
                if bucket.consume_tokens(1) {
                    granted.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(granted.load(Ordering::Relaxed), 100);
    assert!(!bucket.consume_tokens(1));
}

#[test]
fn test_oversubscribed_consumers_never_exceed_capacity() {
    let bucket = TokenBucket::new(50, 50, Duration::from_secs(60)).unwrap();
    let granted = AtomicI64::new(0);

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..25 {
                    if bucket.consume_tokens(1) {
                        granted.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    assert_eq!(granted.load(Ordering::Relaxed), 50);
    assert_eq!(bucket.available_tokens(), 0);
}

#[test]
fn test_mixed_request_sizes_under_contention() {
    let bucket = TokenBucket::new(1_000, 1, Duration::from_secs(3600)).unwrap();
    let granted = AtomicI64::new(0);

    thread::scope(|s| {
        for worker in 0..4i64 {
            let bucket = &bucket;
            let granted = &granted;
            s.spawn(move || {
                let size = worker + 1;
                for _ in 0..200 {
                    if bucket.consume_tokens(size) {
                        granted.fetch_add(size, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    let granted = granted.load(Ordering::Relaxed);
    assert!(granted <= 1_000);
    assert_eq!(granted + bucket.available_tokens(), 1_000);
}

#[test]
fn test_refill_with_real_clock() {
    let bucket = TokenBucket::new(3, 3, Duration::from_millis(50)).unwrap();

    for _ in 0..3 {
        assert!(bucket.consume_tokens(1));
    }
    assert!(!bucket.consume_tokens(1));

    thread::sleep(Duration::from_millis(60));

    let result = bucket.try_consume(1);
    assert!(result.allowed);
    assert_eq!(result.remaining, 2);
}
