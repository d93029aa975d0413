//! Capability traits through which the core reaches its backing store and
//! user directory, with in-memory mock implementations for testing.

pub mod code_store;
pub mod directory;

// Re-export commonly used types
pub use code_store::{CodeStore, MockCodeStore};
pub use directory::{Directory, MockDirectory};
