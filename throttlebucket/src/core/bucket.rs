//! Token bucket implementation
//!
//! This module provides the [`TokenBucket`] struct: a fixed-capacity counter
//! refilled lazily from elapsed time. No background task runs; every consume
//! call first credits the whole refill cycles elapsed since the last
//! accounting watermark, then tries to spend.

use super::{BucketError, Refill};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Result of a consume attempt
///
/// Contains the outcome together with the bucket balance observed by the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumeResult {
    /// Whether the requested tokens were granted and deducted
    pub allowed: bool,
    /// The capacity of the bucket
    pub limit: i64,
    /// Tokens left in the bucket after this call
    pub remaining: i64,
    /// Time until the request could succeed (`Duration::ZERO` if allowed,
    /// `None` if it never can)
    pub retry_after: Option<Duration>,
}

#[derive(Debug)]
struct BucketState {
    tokens: i64,
    last_update: Instant,
}

impl BucketState {
    fn refill(&mut self, max_tokens: i64, refill: &Refill, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_update);
        let cycles = refill.cycles(elapsed);
        if cycles == 0 {
            return;
        }

        self.tokens = self
            .tokens
            .saturating_add(refill.grant(cycles))
            .min(max_tokens);

        // Advance by whole cycles only so the partial cycle carries over.
        // The span never exceeds `elapsed`, so the watermark stays <= now.
        self.last_update = self
            .last_update
            .checked_add(refill.span(cycles))
            .unwrap_or(now);

        tracing::trace!(
            cycles = cycles as u64,
            tokens = self.tokens,
            "refilled token bucket"
        );
    }

    /// Time until `needed` tokens are in the bucket, if that can ever happen
    fn retry_after(
        &self,
        needed: i64,
        max_tokens: i64,
        refill: &Refill,
        now: Instant,
    ) -> Option<Duration> {
        if needed > max_tokens || refill.amount() == 0 {
            return None;
        }

        let deficit = (needed - self.tokens) as u128;
        let amount = refill.amount() as u128;
        let cycles = deficit.div_ceil(amount);

        self.last_update
            .checked_add(refill.span(cycles))
            .map(|ready_at| ready_at.saturating_duration_since(now))
    }
}

/// Thread-safe token bucket
///
/// The bucket starts full with `max_tokens` tokens and regains
/// `refill.amount()` tokens for every full `refill.interval()` that elapses,
/// never holding more than `max_tokens`. Refill and spend run inside one
/// critical section, so concurrent callers always see a consistent
/// `tokens`/`last_update` pair.
///
/// Share a bucket between threads through an [`Arc`](std::sync::Arc).
///
/// # Example
///
/// ```
/// use throttlebucket::TokenBucket;
/// use std::time::Duration;
///
/// // One message per second
/// let bucket = TokenBucket::new(1, 1, Duration::from_secs(1)).unwrap();
///
/// assert!(bucket.consume_tokens(1));
/// assert!(!bucket.consume_tokens(1));
/// ```
#[derive(Debug)]
pub struct TokenBucket {
    max_tokens: i64,
    refill: Refill,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// Create a full bucket
    ///
    /// # Parameters
    ///
    /// - `max_tokens`: Capacity of the bucket, also its initial balance
    /// - `refill_amount`: Tokens granted per full refill interval
    /// - `refill_interval`: Duration of one refill cycle
    ///
    /// # Errors
    ///
    /// [`BucketError::InvalidParameter`] if `max_tokens` or `refill_amount`
    /// is negative or `refill_interval` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use throttlebucket::TokenBucket;
    /// use std::time::Duration;
    ///
    /// // Three failed card transactions per day
    /// let bucket = TokenBucket::new(3, 3, Duration::from_secs(86_400))?;
    /// # Ok::<(), throttlebucket::BucketError>(())
    /// ```
    pub fn new(
        max_tokens: i64,
        refill_amount: i64,
        refill_interval: Duration,
    ) -> Result<Self, BucketError> {
        Self::new_at(max_tokens, refill_amount, refill_interval, Instant::now())
    }

    /// Create a full bucket whose refill accounting starts at `now`
    pub fn new_at(
        max_tokens: i64,
        refill_amount: i64,
        refill_interval: Duration,
        now: Instant,
    ) -> Result<Self, BucketError> {
        Self::with_refill_at(max_tokens, Refill::new(refill_amount, refill_interval), now)
    }

    /// Create a full bucket from a [`Refill`] rule
    ///
    /// # Example
    ///
    /// ```
    /// use throttlebucket::{Refill, TokenBucket};
    ///
    /// // Twenty account creations per day
    /// let bucket = TokenBucket::with_refill(20, Refill::per_day(20))?;
    /// assert_eq!(bucket.max_tokens(), 20);
    /// # Ok::<(), throttlebucket::BucketError>(())
    /// ```
    pub fn with_refill(max_tokens: i64, refill: Refill) -> Result<Self, BucketError> {
        Self::with_refill_at(max_tokens, refill, Instant::now())
    }

    /// Create a full bucket from a [`Refill`] rule, starting at `now`
    pub fn with_refill_at(
        max_tokens: i64,
        refill: Refill,
        now: Instant,
    ) -> Result<Self, BucketError> {
        if max_tokens < 0 {
            return Err(BucketError::InvalidParameter("max_tokens"));
        }
        if refill.amount() < 0 {
            return Err(BucketError::InvalidParameter("refill_amount"));
        }
        if refill.interval().is_zero() {
            return Err(BucketError::InvalidParameter("refill_interval"));
        }

        Ok(TokenBucket {
            max_tokens,
            refill,
            state: Mutex::new(BucketState {
                tokens: max_tokens,
                last_update: now,
            }),
        })
    }

    /// Try to take `tokens` tokens from the bucket
    ///
    /// Returns `true` if the tokens were available and have been deducted.
    /// A request for zero or a negative number of tokens is always denied and
    /// leaves the bucket untouched.
    pub fn consume_tokens(&self, tokens: i64) -> bool {
        self.consume_tokens_at(tokens, Instant::now())
    }

    /// Try to take `tokens` tokens, observing the bucket at `now`
    ///
    /// An instant earlier than the bucket's watermark counts as no elapsed
    /// time.
    pub fn consume_tokens_at(&self, tokens: i64, now: Instant) -> bool {
        self.try_consume_at(tokens, now).allowed
    }

    /// Try to take `tokens` tokens and report the resulting balance
    pub fn try_consume(&self, tokens: i64) -> ConsumeResult {
        self.try_consume_at(tokens, Instant::now())
    }

    /// Try to take `tokens` tokens at `now` and report the resulting balance
    ///
    /// # Example
    ///
    /// ```
    /// use throttlebucket::TokenBucket;
    /// use std::time::{Duration, Instant};
    ///
    /// let start = Instant::now();
    /// let bucket = TokenBucket::new_at(3, 3, Duration::from_secs(1), start)?;
    ///
    /// let result = bucket.try_consume_at(3, start);
    /// assert!(result.allowed);
    /// assert_eq!(result.remaining, 0);
    ///
    /// let result = bucket.try_consume_at(1, start + Duration::from_millis(400));
    /// assert!(!result.allowed);
    /// assert_eq!(result.retry_after, Some(Duration::from_millis(600)));
    /// # Ok::<(), throttlebucket::BucketError>(())
    /// ```
    pub fn try_consume_at(&self, tokens: i64, now: Instant) -> ConsumeResult {
        let mut state = self.state.lock();

        if tokens <= 0 {
            return ConsumeResult {
                allowed: false,
                limit: self.max_tokens,
                remaining: state.tokens,
                retry_after: None,
            };
        }

        state.refill(self.max_tokens, &self.refill, now);

        if state.tokens >= tokens {
            state.tokens -= tokens;
            return ConsumeResult {
                allowed: true,
                limit: self.max_tokens,
                remaining: state.tokens,
                retry_after: Some(Duration::ZERO),
            };
        }

        tracing::debug!(
            requested = tokens,
            available = state.tokens,
            "token bucket denied request"
        );

        ConsumeResult {
            allowed: false,
            limit: self.max_tokens,
            remaining: state.tokens,
            retry_after: state.retry_after(tokens, self.max_tokens, &self.refill, now),
        }
    }

    /// Current balance after crediting elapsed refill cycles
    pub fn available_tokens(&self) -> i64 {
        self.available_tokens_at(Instant::now())
    }

    /// Current balance at `now` after crediting elapsed refill cycles
    pub fn available_tokens_at(&self, now: Instant) -> i64 {
        let mut state = self.state.lock();
        state.refill(self.max_tokens, &self.refill, now);
        state.tokens
    }

    /// Capacity of the bucket
    pub fn max_tokens(&self) -> i64 {
        self.max_tokens
    }

    /// Refill rule of the bucket
    pub fn refill(&self) -> Refill {
        self.refill
    }

    /// Instant up to which refill cycles have been credited
    pub fn last_update(&self) -> Instant {
        self.state.lock().last_update
    }
}
