//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
///
/// Redemption failures are deliberately undifferentiated: wrong code, expired
/// code, superseded code, and already-used code all surface as
/// [`DomainError::InvalidOrExpired`] so a caller cannot enumerate which case
/// occurred.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller-correctable input problem, rejected before any store access
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Redemption failed: wrong, expired, superseded, or already-used code
    #[error("Invalid or expired verification code")]
    InvalidOrExpired,

    /// A new code may not be issued for this destination yet
    #[error("Resend cooldown active, retry in {retry_after_seconds}s")]
    CooldownActive { retry_after_seconds: i64 },

    /// Lost a compare-and-set race or attempted a duplicate insert
    #[error("Conflicting concurrent update")]
    Conflict,

    /// The contact is not a registered user and cannot be selected
    #[error("Contact {contact_id} is not a registered user")]
    PartialSelectionInvalid { contact_id: String },

    /// The code store failed or timed out; not retried by the core
    #[error("Code store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// The user directory failed or timed out; not retried by the core
    #[error("Directory unavailable: {message}")]
    DirectoryUnavailable { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidInput {
            message: "destination is empty".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid input: destination is empty");

        let err = DomainError::CooldownActive {
            retry_after_seconds: 42,
        };
        assert_eq!(err.to_string(), "Resend cooldown active, retry in 42s");

        let err = DomainError::PartialSelectionInvalid {
            contact_id: "c-9".to_string(),
        };
        assert_eq!(err.to_string(), "Contact c-9 is not a registered user");
    }

    #[test]
    fn test_errors_are_comparable() {
        let err = DomainError::InvalidOrExpired;
        assert_eq!(err.clone(), DomainError::InvalidOrExpired);
        assert_ne!(DomainError::Conflict, DomainError::InvalidOrExpired);
    }
}
