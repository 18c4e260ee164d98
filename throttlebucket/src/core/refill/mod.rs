//! Refill rules for the token bucket
//!
//! This module provides the [`Refill`] type which describes how a bucket is
//! replenished: a fixed number of tokens granted once per elapsed interval.
//! It translates human-friendly limits (e.g., "3 per day") into an
//! amount/interval pair.

use std::time::Duration;

#[cfg(test)]
mod tests;

/// Refill defines how many tokens a bucket regains and how often
///
/// A refill grants `amount` tokens once every full `interval`. Partial
/// intervals earn nothing; the bucket only credits whole cycles.
///
/// Unlike an emission-interval rate, `Refill::per_day(3)` grants all three
/// tokens at once when a full day has elapsed, rather than one token every
/// eight hours.
///
/// # Examples
///
/// ```
/// use throttlebucket::Refill;
/// use std::time::Duration;
///
/// // 1 token every second
/// let refill = Refill::per_second(1);
/// assert_eq!(refill.interval(), Duration::from_secs(1));
///
/// // 20 tokens every day
/// let refill = Refill::per_day(20);
/// assert_eq!(refill.amount(), 20);
/// assert_eq!(refill.interval(), Duration::from_secs(86_400));
///
/// // Custom rule: 5 tokens every 250ms
/// let refill = Refill::new(5, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refill {
    amount: i64,
    interval: Duration,
}

impl Refill {
    /// Creates a refill rule granting `amount` tokens every `interval`
    ///
    /// The values are validated when the rule is handed to a
    /// [`TokenBucket`](crate::TokenBucket), not here.
    ///
    /// # Example
    ///
    /// ```
    /// use throttlebucket::Refill;
    /// use std::time::Duration;
    ///
    /// // Two tokens every 500ms
    /// let refill = Refill::new(2, Duration::from_millis(500));
    /// ```
    pub fn new(amount: i64, interval: Duration) -> Self {
        Refill { amount, interval }
    }

    /// Creates a rule granting n tokens every second
    ///
    /// # Example
    ///
    /// ```
    /// use throttlebucket::Refill;
    ///
    /// // 100 tokens per second
    /// let refill = Refill::per_second(100);
    /// ```
    pub fn per_second(n: i64) -> Self {
        Refill::new(n, Duration::from_secs(1))
    }

    /// Creates a rule granting n tokens every minute
    pub fn per_minute(n: i64) -> Self {
        Refill::new(n, Duration::from_secs(60))
    }

    /// Creates a rule granting n tokens every hour
    ///
    /// # Example
    ///
    /// ```
    /// use throttlebucket::Refill;
    ///
    /// // Password reset attempts: 3 per hour
    /// let refill = Refill::per_hour(3);
    /// ```
    pub fn per_hour(n: i64) -> Self {
        Refill::new(n, Duration::from_secs(3600))
    }

    /// Creates a rule granting n tokens every day
    pub fn per_day(n: i64) -> Self {
        Refill::new(n, Duration::from_secs(86_400))
    }

    /// Returns the number of tokens granted per full interval
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the duration of one refill cycle
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of whole intervals contained in `elapsed`
    ///
    /// Returns 0 for a zero interval; buckets never hold one.
    pub(crate) fn cycles(&self, elapsed: Duration) -> u128 {
        let interval_ns = self.interval.as_nanos();
        if interval_ns == 0 {
            return 0;
        }
        elapsed.as_nanos() / interval_ns
    }

    /// Total duration spanned by `cycles` intervals
    pub(crate) fn span(&self, cycles: u128) -> Duration {
        duration_from_nanos(self.interval.as_nanos().saturating_mul(cycles))
    }

    /// Tokens granted for `cycles` intervals, saturating at `i64::MAX`
    pub(crate) fn grant(&self, cycles: u128) -> i64 {
        let granted = (self.amount.max(0) as u128).saturating_mul(cycles);
        i64::try_from(granted).unwrap_or(i64::MAX)
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}
