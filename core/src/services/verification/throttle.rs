//! Resend cooldown policy
//!
//! A pure function of `(last_issued_at, now)`. The core holds no timer and
//! no per-destination state; the caller re-evaluates the policy on each
//! render tick of its countdown display, and the service evaluates it
//! against the store's latest record when enforcing authoritatively.

use chrono::{DateTime, Duration, Utc};

/// Cooldown policy governing when a new code may be issued for a destination
#[derive(Debug, Clone, Copy)]
pub struct ResendThrottle {
    cooldown_seconds: i64,
}

impl ResendThrottle {
    /// Create a throttle with the given cooldown window
    pub fn new(cooldown_seconds: i64) -> Self {
        Self { cooldown_seconds }
    }

    /// The cooldown window in seconds
    pub fn cooldown_seconds(&self) -> i64 {
        self.cooldown_seconds
    }

    /// True if no issuance is recorded or the cooldown has fully elapsed
    pub fn can_resend(&self, last_issued_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_issued_at {
            None => true,
            Some(issued_at) => now - issued_at >= Duration::seconds(self.cooldown_seconds),
        }
    }

    /// Seconds until a resend becomes allowed, clamped at zero
    pub fn remaining_seconds(&self, last_issued_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - last_issued_at).num_seconds();
        (self.cooldown_seconds - elapsed).max(0)
    }

    /// The instant a destination becomes eligible for another code
    pub fn next_resend_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::seconds(self.cooldown_seconds)
    }
}
