//! Business services containing domain logic and use cases.

pub mod contacts;
pub mod verification;

// Re-export commonly used types
pub use contacts::{ensure_selectable, filter_by_name, sorted_by_display_name, ContactReconciler};
pub use verification::{
    IssueCodeResult, ResendThrottle, VerificationConfig, VerificationService,
};
