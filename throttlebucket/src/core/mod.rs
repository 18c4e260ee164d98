//! Core components of the throttlebucket rate limiting library
//!
//! This module contains the fundamental building blocks:
//! - [`refill`]: Refill rules (tokens granted per interval)
//! - [`bucket`]: The lazily refilled token bucket

pub mod bucket;
pub mod refill;

pub use bucket::{ConsumeResult, TokenBucket};
pub use refill::Refill;

use std::error::Error;
use std::fmt;

/// Errors that can occur when building a token bucket
///
/// Consuming tokens never fails: a denied request is reported as `false`,
/// not as an error.
///
/// # Example
///
/// ```
/// use throttlebucket::{BucketError, TokenBucket};
/// use std::time::Duration;
///
/// // Negative capacity is rejected at construction
/// match TokenBucket::new(-1, 1, Duration::from_secs(1)) {
///     Err(BucketError::InvalidParameter(name)) => {
///         assert_eq!(name, "max_tokens");
///     }
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketError {
    /// A construction parameter was out of range
    ///
    /// Carries the parameter name: `max_tokens` or `refill_amount` when
    /// negative, `refill_interval` when zero.
    InvalidParameter(&'static str),
}

impl fmt::Display for BucketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketError::InvalidParameter(name) => write!(f, "invalid parameter: {name}"),
        }
    }
}

impl Error for BucketError {}
