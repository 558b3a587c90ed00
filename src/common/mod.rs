//! Low-level reading primitives and the crate-wide error type.

pub mod binary;
pub mod error;

pub use error::{Error, Result};
