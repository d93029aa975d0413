//! Main verification service implementation

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use rand::Rng;
use std::sync::Arc;
use tracing;

use fr_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::verification_code::{VerificationCode, CODE_LENGTH};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::code_store::CodeStore;

use super::config::VerificationConfig;
use super::throttle::ResendThrottle;
use super::types::IssueCodeResult;

/// Default length of generated temporary passwords
pub const TEMP_PASSWORD_LENGTH: usize = 8;

const TEMP_PASSWORD_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Service owning the one-time verification code workflow.
///
/// Stateless in process memory: every per-destination fact lives in the
/// [`CodeStore`]. Redemption race-safety rests on the store's
/// compare-and-set contract for `mark_used`, not on core-side locks.
pub struct VerificationService<S: CodeStore> {
    /// Code store for persisting and looking up records
    store: Arc<S>,
    /// Resend cooldown policy
    throttle: ResendThrottle,
    /// Service configuration
    config: VerificationConfig,
}

impl<S: CodeStore> VerificationService<S> {
    /// Create a new verification service
    pub fn new(store: Arc<S>, config: VerificationConfig) -> Self {
        let throttle = ResendThrottle::new(config.resend_cooldown_seconds);
        Self {
            store,
            throttle,
            config,
        }
    }

    /// The service's cooldown policy, for callers driving a countdown display
    pub fn throttle(&self) -> &ResendThrottle {
        &self.throttle
    }

    /// Issue a new verification code for a destination.
    ///
    /// This method:
    /// 1. Validates and normalizes the destination email
    /// 2. Enforces the resend cooldown against the store (when configured)
    /// 3. Generates and persists a fresh 6-digit code
    ///
    /// Earlier records for the destination are left untouched; they become
    /// non-latest and thereby unredeemable. Delivery of the code is the
    /// caller's responsibility.
    ///
    /// # Errors
    ///
    /// * [`DomainError::InvalidInput`] - empty or malformed destination
    /// * [`DomainError::CooldownActive`] - issued too recently
    /// * [`DomainError::StoreUnavailable`] - the code store failed
    pub async fn issue_code(&self, destination: &str) -> DomainResult<IssueCodeResult> {
        let destination = normalize_email(destination);
        if destination.is_empty() {
            return Err(DomainError::InvalidInput {
                message: "destination is empty".to_string(),
            });
        }
        if !is_valid_email(&destination) {
            return Err(DomainError::InvalidInput {
                message: "destination is not a valid email".to_string(),
            });
        }

        let now = Utc::now();

        if self.config.enforce_cooldown {
            if let Some(latest) = self.store.find_latest_active(&destination, now).await? {
                if !self.throttle.can_resend(Some(latest.issued_at), now) {
                    let retry_after_seconds =
                        self.throttle.remaining_seconds(latest.issued_at, now);
                    tracing::warn!(
                        destination = %mask_email(&destination),
                        retry_after_seconds,
                        event = "resend_denied",
                        "Verification code requested within cooldown window"
                    );
                    return Err(DomainError::CooldownActive {
                        retry_after_seconds,
                    });
                }
            }
        }

        let record = VerificationCode::new_with_expiration(
            destination.clone(),
            self.config.code_expiration_minutes,
        );

        self.store.insert(&record).await.map_err(|e| {
            tracing::error!(
                destination = %mask_email(&destination),
                error = %e,
                event = "code_store_failed",
                "Failed to persist verification code"
            );
            e
        })?;

        tracing::info!(
            destination = %mask_email(&destination),
            record_id = %record.id,
            event = "code_issued",
            "Issued new verification code"
        );

        let next_resend_at = self.throttle.next_resend_at(record.issued_at);
        Ok(IssueCodeResult {
            record,
            next_resend_at,
        })
    }

    /// Redeem a submitted code for a destination, consuming it exactly once.
    ///
    /// Only the most recently issued unused, unexpired code for the
    /// destination is eligible. Wrong code, expired code, superseded code,
    /// already-used code, and a lost mark-used race all fail with the same
    /// [`DomainError::InvalidOrExpired`] so callers cannot tell the cases
    /// apart.
    ///
    /// # Errors
    ///
    /// * [`DomainError::InvalidInput`] - empty destination or a submission
    ///   that is not exactly 6 ASCII digits
    /// * [`DomainError::InvalidOrExpired`] - redemption failed
    /// * [`DomainError::StoreUnavailable`] - the code store failed
    pub async fn redeem_code(
        &self,
        destination: &str,
        submitted: &str,
    ) -> DomainResult<VerificationCode> {
        let destination = normalize_email(destination);
        if destination.is_empty() {
            return Err(DomainError::InvalidInput {
                message: "destination is empty".to_string(),
            });
        }
        if submitted.len() != CODE_LENGTH || !submitted.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidInput {
                message: format!("code must be exactly {} digits", CODE_LENGTH),
            });
        }

        let now = Utc::now();

        let record = match self.store.find_latest_active(&destination, now).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    destination = %mask_email(&destination),
                    event = "redeem_failed",
                    "No active verification code for destination"
                );
                return Err(DomainError::InvalidOrExpired);
            }
        };

        if !constant_time_eq(record.code.as_bytes(), submitted.as_bytes()) {
            tracing::warn!(
                destination = %mask_email(&destination),
                record_id = %record.id,
                event = "redeem_failed",
                "Submitted code does not match latest active code"
            );
            return Err(DomainError::InvalidOrExpired);
        }

        match self.store.mark_used(record.id).await {
            Ok(()) => {
                tracing::info!(
                    destination = %mask_email(&destination),
                    record_id = %record.id,
                    event = "code_redeemed",
                    "Verification code redeemed"
                );
                Ok(VerificationCode {
                    used: true,
                    ..record
                })
            }
            // Concurrent redemption lost the race; indistinguishable from an
            // invalid code at this boundary
            Err(DomainError::Conflict) => {
                tracing::warn!(
                    destination = %mask_email(&destination),
                    record_id = %record.id,
                    event = "redeem_conflict",
                    "Lost mark-used race for verification code"
                );
                Err(DomainError::InvalidOrExpired)
            }
            Err(e) => Err(e),
        }
    }
}

/// Generate a random alphanumeric temporary password for the recovery flow.
pub fn generate_temporary_password(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..TEMP_PASSWORD_CHARS.len());
            TEMP_PASSWORD_CHARS[idx] as char
        })
        .collect()
}
