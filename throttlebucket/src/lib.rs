//! # ThrottleBucket
//!
//! A lazily refilled, thread-safe token bucket rate limiter for Rust.
//!
//! ## Overview
//!
//! A [`TokenBucket`] holds up to `max_tokens` tokens and regains a fixed
//! amount once per full refill interval:
//! - **Lazy refill**: No timers or background threads; elapsed cycles are
//!   credited on each call
//! - **Whole cycles only**: A partially elapsed interval earns nothing, but its
//!   progress carries over to the next call
//! - **Hard capacity**: The balance never exceeds `max_tokens`, however long
//!   the bucket sat idle
//! - **Thread safe**: Refill and spend happen under one lock per bucket
//!
//! ## Quick Start
//!
//! ```
//! use throttlebucket::TokenBucket;
//! use std::time::Duration;
//!
//! // One message per second per user
//! let bucket = TokenBucket::new(1, 1, Duration::from_secs(1))?;
//!
//! if bucket.consume_tokens(1) {
//!     println!("Message sent");
//! } else {
//!     println!("Rate limit exceeded");
//! }
//! # Ok::<(), throttlebucket::BucketError>(())
//! ```
//!
//! ## Common Use Cases
//!
//! ### Daily Quotas
//! ```
//! use throttlebucket::{Refill, TokenBucket};
//!
//! // Three failed credit card transactions per day
//! let card_failures = TokenBucket::with_refill(3, Refill::per_day(3))?;
//!
//! // Twenty account creations per day per IP
//! let signups = TokenBucket::with_refill(20, Refill::per_day(20))?;
//! # Ok::<(), throttlebucket::BucketError>(())
//! ```
//!
//! ### Lifetime Caps
//! A zero refill amount never replenishes the bucket:
//! ```
//! use throttlebucket::TokenBucket;
//! use std::time::Duration;
//!
//! let trial = TokenBucket::new(5, 0, Duration::from_secs(1))?;
//! for _ in 0..5 {
//!     assert!(trial.consume_tokens(1));
//! }
//! assert!(!trial.consume_tokens(1));
//! # Ok::<(), throttlebucket::BucketError>(())
//! ```
//!
//! ### Retry Hints
//! ```
//! use throttlebucket::TokenBucket;
//! use std::time::Duration;
//!
//! let bucket = TokenBucket::new(2, 1, Duration::from_secs(10))?;
//! bucket.consume_tokens(2);
//!
//! let result = bucket.try_consume(1);
//! if !result.allowed {
//!     match result.retry_after {
//!         Some(wait) => println!("Retry in {wait:?}"),
//!         None => println!("Request can never succeed"),
//!     }
//! }
//! # Ok::<(), throttlebucket::BucketError>(())
//! ```
//!
//! ## Thread Safety
//!
//! `TokenBucket` is `Send + Sync` and its methods take `&self`. Share it with
//! an [`Arc`](std::sync::Arc):
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use throttlebucket::TokenBucket;
//!
//! let bucket = Arc::new(TokenBucket::new(100, 100, Duration::from_secs(3)).unwrap());
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let bucket = Arc::clone(&bucket);
//!         std::thread::spawn(move || bucket.consume_tokens(1))
//!     })
//!     .collect();
//! for handle in handles {
//!     assert!(handle.join().unwrap());
//! }
//! ```

pub mod core;

pub use crate::core::{BucketError, ConsumeResult, Refill, TokenBucket};
