//! # Frontiers Core
//!
//! Core business logic for the Frontiers backend: the one-time verification
//! code workflow (login two-factor and password recovery) and contact-identity
//! reconciliation against the registered-user directory.
//!
//! The crate is backend-agnostic: persistence and directory access happen
//! through the [`repositories::CodeStore`] and [`repositories::Directory`]
//! capability traits supplied by the hosting application.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
