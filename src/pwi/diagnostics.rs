//! Recoverable decode conditions.
//!
//! Anything that degrades the output without invalidating the whole document
//! is recorded here, in decode order, and logged through `tracing`.

use crate::common::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// What went wrong, with the ids needed to locate it in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// The header declares a version other than the verified one
    UnsupportedVersion { version: u16 },
    /// A shape chunk of a type this decoder does not interpret
    UnsupportedShape { id: u16, chunk_type: u16 },
    /// A polyline carries a non-identity transform; points are used as-is
    UnsupportedTransform { id: u16 },
    /// An opcode missing from the opcode table, skipped with no argument
    UnknownOpcode { paragraph: u16, opcode: u8 },
    /// A known opcode with no geometric effect implemented
    UnhandledOpcode { paragraph: u16, opcode: u8 },
    /// A referenced chunk id is absent from the container
    DanglingReference { id: u16, context: String },
    /// A later chunk replaced an earlier one with the same id
    DuplicateChunk { id: u16 },
    /// A unit was abandoned because its payload could not be decoded
    Skipped { unit: String, reason: String },
}

/// A single recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnsupportedVersion { version } => {
                write!(f, "unsupported format version {}, proceeding anyway", version)
            },
            DiagnosticKind::UnsupportedShape { id, chunk_type } => {
                write!(f, "shape 0x{:04X}: chunk type {} unimplemented", id, chunk_type)
            },
            DiagnosticKind::UnsupportedTransform { id } => {
                write!(f, "polyline 0x{:04X}: transform unimplemented", id)
            },
            DiagnosticKind::UnknownOpcode { paragraph, opcode } => write!(
                f,
                "paragraph 0x{:04X}: unknown opcode 0x{:02X}, assuming no argument",
                paragraph, opcode
            ),
            DiagnosticKind::UnhandledOpcode { paragraph, opcode } => write!(
                f,
                "paragraph 0x{:04X}: opcode 0x{:02X} unimplemented",
                paragraph, opcode
            ),
            DiagnosticKind::DanglingReference { id, context } => {
                write!(f, "dangling chunk reference 0x{:04X} ({})", id, context)
            },
            DiagnosticKind::DuplicateChunk { id } => {
                write!(f, "chunk 0x{:04X} defined more than once, keeping the last", id)
            },
            DiagnosticKind::Skipped { unit, reason } => write!(f, "skipped {}: {}", unit, reason),
        }
    }
}

/// Ordered collection of diagnostics for one decode run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it as a warning.
    pub fn push(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { kind };
        tracing::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    /// Append diagnostics gathered elsewhere, keeping their order.
    ///
    /// These were already logged when first recorded.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Turn a unit-level failure into a diagnostic unless it must abort.
    ///
    /// Fatal errors always propagate; in strict mode every error does.
    /// Otherwise a dangling reference is recorded as such, anything else as
    /// a skipped `unit`, and `Ok(None)` is returned.
    pub(crate) fn recover<T>(
        &mut self,
        result: Result<T>,
        strict: bool,
        unit: impl FnOnce() -> String,
    ) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if strict || err.is_fatal() => Err(err),
            Err(Error::DanglingChunk { id, context }) => {
                self.push(DiagnosticKind::DanglingReference { id, context });
                Ok(None)
            },
            Err(err) => {
                self.push(DiagnosticKind::Skipped {
                    unit: unit(),
                    reason: err.to_string(),
                });
                Ok(None)
            },
        }
    }

    /// Whether any recorded diagnostic matches `predicate`.
    pub fn any(&self, predicate: impl Fn(&DiagnosticKind) -> bool) -> bool {
        self.entries.iter().any(|d| predicate(&d.kind))
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
