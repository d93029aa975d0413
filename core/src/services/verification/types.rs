//! Types for verification service results

use chrono::{DateTime, Utc};

use crate::domain::entities::verification_code::VerificationCode;

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct IssueCodeResult {
    /// The verification code record that was persisted. The caller owns
    /// delivery of `record.code` to the destination; the service never
    /// transmits it.
    pub record: VerificationCode,
    /// When the destination becomes eligible for another code
    pub next_resend_at: DateTime<Utc>,
}
