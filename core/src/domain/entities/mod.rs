//! Domain entities representing core business objects.

pub mod contact;
pub mod verification_code;

// Re-export commonly used types
pub use contact::{ContactIdentity, DirectoryUser, MatchResult};
pub use verification_code::{
    VerificationCode, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES,
};
