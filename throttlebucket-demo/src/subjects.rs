//! Rate-limited subjects used by the demo
//!
//! Each subject owns an independent [`TokenBucket`] and the messages printed
//! when an action is allowed or denied.

use serde::Serialize;
use throttlebucket::{BucketError, Refill, TokenBucket};

/// A rate-limited action performed by one subject
pub struct Subject {
    /// Short identifier used in JSON output
    pub name: &'static str,
    /// Printed when the action is allowed
    pub allowed_message: &'static str,
    /// Printed when the action is denied
    pub denied_message: &'static str,
    bucket: TokenBucket,
}

/// Outcome of one consume attempt
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Outcome {
    pub iteration: u32,
    pub subject: &'static str,
    pub allowed: bool,
    pub remaining: i64,
}

impl Subject {
    pub fn new(
        name: &'static str,
        max_tokens: i64,
        refill: Refill,
        allowed_message: &'static str,
        denied_message: &'static str,
    ) -> Result<Self, BucketError> {
        Ok(Subject {
            name,
            allowed_message,
            denied_message,
            bucket: TokenBucket::with_refill(max_tokens, refill)?,
        })
    }

    /// Spend one token for this iteration
    pub fn attempt(&self, iteration: u32) -> Outcome {
        let result = self.bucket.try_consume(1);

        if !result.allowed {
            tracing::debug!(
                subject = self.name,
                retry_after = ?result.retry_after,
                "rate limit exceeded"
            );
        }

        Outcome {
            iteration,
            subject: self.name,
            allowed: result.allowed,
            remaining: result.remaining,
        }
    }

    /// Human-readable line for an outcome of this subject
    pub fn describe(&self, outcome: &Outcome) -> String {
        if outcome.allowed {
            format!("[True] {}", self.allowed_message)
        } else {
            format!("[False] {}", self.denied_message)
        }
    }
}

/// The three demo subjects
///
/// - A user sending one message per second
/// - A user with three allowed failed credit card transactions per day
/// - A single IP creating twenty accounts per day
pub fn default_subjects() -> Result<Vec<Subject>, BucketError> {
    Ok(vec![
        Subject::new(
            "user_messages",
            1,
            Refill::per_second(1),
            "User allowed to send a message",
            "User rate limit exceeded",
        )?,
        Subject::new(
            "user_card_failures",
            3,
            Refill::per_day(3),
            "User allowed for credit card transaction",
            "User exceeded credit card transactions limit",
        )?,
        Subject::new(
            "ip_account_creation",
            20,
            Refill::per_day(20),
            "IP allowed to create an account",
            "IP exceeded account creation limit",
        )?,
    ])
}
