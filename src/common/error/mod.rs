//! Unified error types for pocketword.
//!
//! This module provides a single error type covering header validation,
//! bounds-checked reads, and chunk resolution failures.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
