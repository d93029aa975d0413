//! Configuration for the verification service

use crate::domain::entities::verification_code::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Minimum seconds between code issuances for one destination
    pub resend_cooldown_seconds: i64,
    /// Whether the cooldown is enforced against the store on issue, rather
    /// than left to the caller's countdown display
    pub enforce_cooldown: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: 60,
            enforce_cooldown: true,
        }
    }
}
