//! Top-level psw/pwi document decoding.
//!
//! Decoding runs in two phases. The whole chunk stream is first collected
//! into an immutable [`ChunkMap`]; the paragraph and drawing tables are then
//! resolved against it, since any chunk may reference one stored later.

use super::chunk::ChunkMap;
use super::config::DecodeOptions;
use super::consts::{MAGIC, SUPPORTED_VERSION};
use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::drawing::{Drawing, decode_drawings};
use super::paragraph::{Paragraph, decode_paragraphs};
use super::types::CanvasBounds;
use crate::common::binary::ByteCursor;
use crate::common::error::{Error, Result};
use bytes::Bytes;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// A fully decoded psw/pwi document.
///
/// # Examples
///
/// ```rust,no_run
/// use pocketword::pwi::Document;
///
/// let doc = Document::open("notes.pwi")?;
/// println!("version {}, {} drawings", doc.version, doc.drawings.len());
/// for diagnostic in &doc.diagnostics {
///     eprintln!("warning: {}", diagnostic);
/// }
/// # Ok::<(), pocketword::common::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Format version declared in the header
    pub version: u16,
    /// Extent of every decoded drawing frame
    pub canvas: CanvasBounds,
    /// Paragraphs in table order
    pub paragraphs: Vec<Paragraph>,
    /// Drawings in table order
    pub drawings: Vec<Drawing>,
    /// Recoverable conditions met while decoding, in decode order
    pub diagnostics: Diagnostics,
}

impl Document {
    /// Read and decode a file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, &DecodeOptions::default())
    }

    /// Read and decode a file.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening document");
        let data = fs::read(path)?;
        Self::from_bytes_with_options(data, options)
    }

    /// Decode an in-memory file with default options.
    ///
    /// Accepts anything convertible to [`Bytes`]; a `Vec<u8>` is taken
    /// over without copying and chunk payloads share it.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        Self::from_bytes_with_options(data, &DecodeOptions::default())
    }

    /// Decode an in-memory file.
    pub fn from_bytes_with_options(data: impl Into<Bytes>, options: &DecodeOptions) -> Result<Self> {
        let data = data.into();
        let mut diagnostics = Diagnostics::new();

        let (version, body_start) = read_header(&data)?;
        if version != SUPPORTED_VERSION {
            diagnostics.push(DiagnosticKind::UnsupportedVersion { version });
        }

        let chunks = ChunkMap::parse(data.slice(body_start..))?;
        for &id in chunks.duplicates() {
            diagnostics.push(DiagnosticKind::DuplicateChunk { id });
        }

        let paragraphs = decode_paragraphs(&chunks, options, &mut diagnostics)?;
        let (drawings, canvas) = decode_drawings(&chunks, options, &mut diagnostics)?;

        tracing::debug!(
            version,
            paragraphs = paragraphs.len(),
            drawings = drawings.len(),
            diagnostics = diagnostics.len(),
            "decoded document"
        );

        Ok(Document {
            version,
            canvas,
            paragraphs,
            drawings,
            diagnostics,
        })
    }

    /// Number of shapes decoded across all drawings.
    pub fn shape_count(&self) -> usize {
        self.drawings.iter().map(|d| d.shapes.len()).sum()
    }

    /// Dump the decoded model, diagnostics included, as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Other(format!("Failed to serialize document to YAML: {}", e)))
    }
}

/// Validate the file header, returning the version and the body offset.
fn read_header(data: &[u8]) -> Result<(u16, usize)> {
    if !data.starts_with(MAGIC) {
        return Err(Error::BadMagic);
    }

    let mut cursor = ByteCursor::new(data);
    cursor.skip(MAGIC.len())?;
    let version = cursor.read_u16()?;
    // reserved
    cursor.skip(2)?;
    Ok((version, cursor.position()))
}
