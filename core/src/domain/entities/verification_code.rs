//! Verification code entity for email-based two-factor and recovery flows.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest issuable code (inclusive)
pub const CODE_MIN: u32 = 100_000;

/// Largest issuable code (inclusive)
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// A one-time verification code bound to a destination identity.
///
/// Records are append-only: issuing a new code for the same destination does
/// not delete or overwrite earlier records, it merely supersedes them. The
/// only mutation a record ever sees is the `used` flip on redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code record
    pub id: Uuid,

    /// Normalized destination identity (lower-cased, trimmed email)
    pub destination: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully redeemed
    pub used: bool,
}

impl VerificationCode {
    /// Creates a new verification code with a random 6-digit code and the
    /// default 5-minute expiration.
    pub fn new(destination: String) -> Self {
        Self::new_with_expiration(destination, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new verification code with a custom expiration time.
    pub fn new_with_expiration(destination: String, expiration_minutes: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            destination,
            code: Self::generate_code(),
            issued_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            used: false,
        }
    }

    /// Generates a uniform random 6-digit code in [`CODE_MIN`]..=[`CODE_MAX`].
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }

    /// Checks if the code has expired as of `now`.
    ///
    /// Expiry is wall-clock based: nothing actively expires a record, it
    /// simply becomes inert once `expires_at` has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the code is still redeemable as of `now` (not used, not
    /// expired). Supersession by a later code is a store-level property and
    /// is not visible on a single record.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.used && !self.is_expired(now)
    }

    /// Time remaining until expiration, or zero if already expired.
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
