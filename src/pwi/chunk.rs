//! Chunk container parsing.
//!
//! The body of a psw/pwi file is a flat run of `(type, id, length, payload)`
//! records. They are collected into a [`ChunkMap`] in one forward pass before
//! anything resolves ids, since tables freely reference chunks that appear
//! later in the stream.

use super::consts::{
    CHUNK_CIRCLE, CHUNK_DRAWING, CHUNK_GROUP, CHUNK_LENGTH_UNIT, CHUNK_LINE, CHUNK_PARAGRAPH,
    CHUNK_PARAGRAPH_BREAK, CHUNK_PICTURE, CHUNK_POLYLINE, CHUNK_RECTANGLE, CHUNK_TEXT,
    CHUNK_TRIANGLE,
};
use crate::common::binary::ByteCursor;
use crate::common::error::{Error, Result};
use bytes::Bytes;
use std::collections::BTreeMap;

/// Chunk type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    Paragraph,
    ParagraphBreak,
    Picture,
    Text,
    Group,
    Polyline,
    Rectangle,
    Circle,
    Line,
    Triangle,
    Drawing,
    /// Any type code without a dedicated variant
    Other(u16),
}

impl ChunkKind {
    pub fn from_u16(value: u16) -> Self {
        match value {
            CHUNK_PARAGRAPH => Self::Paragraph,
            CHUNK_PARAGRAPH_BREAK => Self::ParagraphBreak,
            CHUNK_PICTURE => Self::Picture,
            CHUNK_TEXT => Self::Text,
            CHUNK_GROUP => Self::Group,
            CHUNK_POLYLINE => Self::Polyline,
            CHUNK_RECTANGLE => Self::Rectangle,
            CHUNK_CIRCLE => Self::Circle,
            CHUNK_LINE => Self::Line,
            CHUNK_TRIANGLE => Self::Triangle,
            CHUNK_DRAWING => Self::Drawing,
            other => Self::Other(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            Self::Paragraph => CHUNK_PARAGRAPH,
            Self::ParagraphBreak => CHUNK_PARAGRAPH_BREAK,
            Self::Picture => CHUNK_PICTURE,
            Self::Text => CHUNK_TEXT,
            Self::Group => CHUNK_GROUP,
            Self::Polyline => CHUNK_POLYLINE,
            Self::Rectangle => CHUNK_RECTANGLE,
            Self::Circle => CHUNK_CIRCLE,
            Self::Line => CHUNK_LINE,
            Self::Triangle => CHUNK_TRIANGLE,
            Self::Drawing => CHUNK_DRAWING,
            Self::Other(other) => other,
        }
    }

    /// Byte length of a payload whose header declares `raw_length`.
    #[inline]
    pub fn payload_len(self, raw_length: u16) -> usize {
        match self {
            Self::Text => raw_length as usize,
            _ => raw_length as usize * CHUNK_LENGTH_UNIT,
        }
    }
}

/// One record of the container.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: u16,
    pub kind: ChunkKind,
    /// Payload bytes, sharing the input buffer
    pub data: Bytes,
}

impl Chunk {
    /// Cursor over the payload.
    #[inline]
    pub fn cursor(&self) -> ByteCursor<'_> {
        ByteCursor::new(&self.data)
    }
}

/// Immutable id → chunk mapping built from the container body.
///
/// # Examples
///
/// ```rust
/// use bytes::Bytes;
/// use pocketword::pwi::{ChunkKind, ChunkMap};
///
/// // type 103, id 7, length 1 (4 bytes)
/// let body = Bytes::from_static(&[103, 0, 7, 0, 1, 0, 0xAA, 0xBB, 0xCC, 0xDD]);
/// let chunks = ChunkMap::parse(body).unwrap();
/// let chunk = chunks.get(7).unwrap();
/// assert_eq!(chunk.kind, ChunkKind::Polyline);
/// assert_eq!(&chunk.data[..], &[0xAA, 0xBB, 0xCC, 0xDD]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChunkMap {
    chunks: BTreeMap<u16, Chunk>,
    duplicates: Vec<u16>,
}

impl ChunkMap {
    /// Split a chunk stream into its records.
    ///
    /// Reads headers until the stream is exhausted. A later chunk with an
    /// already-seen id replaces the earlier one; the replaced ids are kept
    /// in [`ChunkMap::duplicates`]. A header or payload that runs past the
    /// end of the stream is an error.
    pub fn parse(body: Bytes) -> Result<Self> {
        let mut map = ChunkMap::default();
        let mut cursor = ByteCursor::new(&body);

        while !cursor.eof() {
            let kind = ChunkKind::from_u16(cursor.read_u16()?);
            let id = cursor.read_u16()?;
            let raw_length = cursor.read_u16()?;
            let len = kind.payload_len(raw_length);

            let start = cursor.position();
            cursor.skip(len)?;
            let data = body.slice(start..start + len);

            tracing::trace!(id, ?kind, len, "chunk");
            if map.chunks.insert(id, Chunk { id, kind, data }).is_some() {
                map.duplicates.push(id);
            }
        }

        tracing::debug!(
            count = map.chunks.len(),
            duplicates = map.duplicates.len(),
            "parsed chunk container"
        );
        Ok(map)
    }

    #[inline]
    pub fn get(&self, id: u16) -> Option<&Chunk> {
        self.chunks.get(&id)
    }

    /// Look up a referenced chunk, failing with a dangling-reference error.
    pub fn resolve(&self, id: u16, context: impl FnOnce() -> String) -> Result<&Chunk> {
        self.chunks.get(&id).ok_or_else(|| Error::DanglingChunk {
            id,
            context: context(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All chunks in ascending id order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Ids that were defined more than once, in stream order.
    #[inline]
    pub fn duplicates(&self) -> &[u16] {
        &self.duplicates
    }
}
