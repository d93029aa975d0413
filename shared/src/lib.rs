//! Shared utilities for the Frontiers backend
//!
//! This crate provides identity normalization and validation helpers used
//! across the server modules:
//! - Email normalization, validation, and masking for logs
//! - Phone number normalization for directory matching

pub mod utils;

// Re-export commonly used items at crate root
pub use utils::{email, phone};
