//! Verification service module for email-based one-time codes
//!
//! This module provides the one-time-code workflow shared by login
//! two-factor authentication and password recovery:
//! - Code issuance with authoritative resend cooldown
//! - Exactly-once redemption against the code store
//! - Temporary password generation for the recovery flow

mod config;
mod service;
mod throttle;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use service::{generate_temporary_password, VerificationService, TEMP_PASSWORD_LENGTH};
pub use throttle::ResendThrottle;
pub use types::IssueCodeResult;
