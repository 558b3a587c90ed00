//! Unified error types for pocketword.
//!
//! Every fatal decode failure surfaces as one [`Error`] value. Recoverable
//! conditions are reported as diagnostics on the decoded document instead.
use thiserror::Error;

/// Main error type for pocketword operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the expected magic bytes
    #[error("Not a psw/pwi file (bad header)")]
    BadMagic,

    /// A read ran past the end of the available data
    #[error("Unexpected end of data: expected {expected} bytes, got {available}")]
    UnexpectedEof { expected: usize, available: usize },

    /// A compressed integer reached the 16-bit escape sentinel
    #[error("Bad int encoding: value exceeds the representable range")]
    IntegerOverflow,

    /// A chunk id was referenced but never defined in the stream
    #[error("Dangling chunk reference: 0x{id:04X} ({context})")]
    DanglingChunk { id: u16, context: String },

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error must abort the whole decode regardless of options.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::BadMagic | Error::IntegerOverflow | Error::Io(_))
    }
}

/// Result type for pocketword operations.
pub type Result<T> = std::result::Result<T, Error>;
