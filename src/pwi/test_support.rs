//! Fixture builders for unit tests.

use super::consts::{CHUNK_LENGTH_UNIT, CHUNK_TEXT, IDENTITY_TRANSFORM, MAGIC};
use bytes::Bytes;

/// LSB-first bit writer, the inverse of `BitReader`.
#[derive(Debug, Default)]
pub struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Append the low `n` bits of `value`, lowest first.
    pub fn signed(&mut self, n: u32, value: i32) -> &mut Self {
        for i in 0..n {
            self.bits.push((value >> i) & 1 == 1);
        }
        self
    }

    /// Append `value` in the shortest escape-coded form.
    pub fn compressed(&mut self, value: i32) -> &mut Self {
        match value {
            -15..=15 => self.signed(5, value),
            16..=47 => self.signed(5, -16).signed(6, value - 16),
            -46..=-16 => self.signed(5, -16).signed(6, value + 15),
            -127..=127 => self.signed(5, -16).signed(6, -32).signed(8, value),
            _ => self
                .signed(5, -16)
                .signed(6, -32)
                .signed(8, -128)
                .signed(16, value),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.bits.len().div_ceil(8)];
        for (i, &bit) in self.bits.iter().enumerate() {
            if bit {
                out[i / 8] |= 1 << (i % 8);
            }
        }
        out
    }
}

fn encode_deltas(deltas: &[(i32, i32)]) -> Vec<u8> {
    let mut bits = BitWriter::new();
    for &(dx, dy) in deltas {
        bits.compressed(dx).compressed(dy);
    }
    bits.to_bytes()
}

/// Compact point header followed by the delta stream.
pub fn compact_points(base_x: u8, base_y: u8, deltas: &[(i32, i32)]) -> Vec<u8> {
    let stream = encode_deltas(deltas);
    let mut out = vec![
        (deltas.len() + 1) as u8,
        (stream.len() + 4) as u8,
        base_x,
        base_y,
    ];
    out.extend_from_slice(&stream);
    out
}

/// Extended point header followed by the delta stream.
pub fn extended_points(base_x: u16, base_y: u16, deltas: &[(i32, i32)]) -> Vec<u8> {
    let stream = encode_deltas(deltas);
    let mut out = vec![0xF2, 0xF2];
    out.extend_from_slice(&((stream.len() + 10) as u16).to_le_bytes());
    out.extend_from_slice(&((deltas.len() + 1) as u16).to_le_bytes());
    out.extend_from_slice(&base_x.to_le_bytes());
    out.extend_from_slice(&base_y.to_le_bytes());
    out.extend_from_slice(&stream);
    out
}

/// Polyline chunk payload fields.
pub struct PolylineSpec {
    pub color: u8,
    pub width: u8,
    pub filled: bool,
    pub dx: i16,
    pub dy: i16,
    pub size: (u16, u16),
    pub transform: [u8; 20],
}

impl Default for PolylineSpec {
    fn default() -> Self {
        Self {
            color: 0,
            width: 1,
            filled: false,
            dx: 0,
            dy: 0,
            size: (10, 10),
            transform: IDENTITY_TRANSFORM,
        }
    }
}

pub fn polyline(spec: &PolylineSpec, points: &[u8]) -> Vec<u8> {
    let mut out = vec![0, 0, 0, spec.color, spec.width, spec.filled as u8];
    out.extend_from_slice(&[0; 6]);
    out.extend_from_slice(&spec.dx.to_le_bytes());
    out.extend_from_slice(&spec.dy.to_le_bytes());
    out.extend_from_slice(&spec.size.0.to_le_bytes());
    out.extend_from_slice(&spec.size.1.to_le_bytes());
    out.extend_from_slice(&spec.transform);
    out.extend_from_slice(points);
    out
}

pub fn picture(width: u16, lines: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![0; 4];
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&(lines.len() as u16).to_le_bytes());
    out.extend_from_slice(&[0; 2]);
    for line in lines {
        out.extend_from_slice(line);
    }
    out
}

pub fn drawing(line: u16, origin_x: i16, raw_y: i16, size: (u16, u16), shapes: &[u16]) -> Vec<u8> {
    let mut out = vec![0; 2];
    out.extend_from_slice(&(shapes.len() as u16).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&line.to_le_bytes());
    out.extend_from_slice(&[0; 2]);
    out.extend_from_slice(&origin_x.to_le_bytes());
    out.extend_from_slice(&raw_y.to_le_bytes());
    out.extend_from_slice(&size.0.to_le_bytes());
    out.extend_from_slice(&size.1.to_le_bytes());
    out.extend_from_slice(&[0; 8]);
    for id in shapes {
        out.extend_from_slice(&id.to_le_bytes());
    }
    out
}

pub fn drawing_table(drawings: &[u16]) -> Vec<u8> {
    let mut out = vec![0; 2];
    out.extend_from_slice(&(drawings.len() as u16).to_le_bytes());
    out.extend_from_slice(&[0; 8]);
    for id in drawings {
        out.extend_from_slice(&id.to_le_bytes());
    }
    out
}

/// Paragraph table; entries are `(num_lines, paragraph_chunk_id)`.
pub fn paragraph_table(entries: &[(u16, u16)]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0; 20]);
    for &(lines, id) in entries {
        out.extend_from_slice(&lines.to_le_bytes());
        out.extend_from_slice(&[0; 2]);
        out.extend_from_slice(&id.to_le_bytes());
        out.extend_from_slice(&[0; 2]);
    }
    out
}

pub fn paragraph(dimension_id: u16, left_margin: i16, commands: &[u8]) -> Vec<u8> {
    let mut out = vec![0; 8];
    out.extend_from_slice(&dimension_id.to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&left_margin.to_le_bytes());
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(commands);
    out
}

/// Chunk stream builder.
#[derive(Debug, Default)]
pub struct ChunkStream {
    bytes: Vec<u8>,
}

impl ChunkStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header with an explicit length field and the payload verbatim.
    pub fn raw(mut self, chunk_type: u16, id: u16, raw_length: u16, payload: &[u8]) -> Self {
        self.bytes.extend_from_slice(&chunk_type.to_le_bytes());
        self.bytes.extend_from_slice(&id.to_le_bytes());
        self.bytes.extend_from_slice(&raw_length.to_le_bytes());
        self.bytes.extend_from_slice(payload);
        self
    }

    /// Append a chunk, zero-padding non-text payloads to whole words.
    pub fn chunk(self, chunk_type: u16, id: u16, payload: &[u8]) -> Self {
        if chunk_type == CHUNK_TEXT {
            return self.raw(chunk_type, id, payload.len() as u16, payload);
        }
        let words = payload.len().div_ceil(CHUNK_LENGTH_UNIT);
        let mut padded = payload.to_vec();
        padded.resize(words * CHUNK_LENGTH_UNIT, 0);
        self.raw(chunk_type, id, words as u16, &padded)
    }

    pub fn build(self) -> Bytes {
        Bytes::from(self.bytes)
    }

    /// Prefix the stream with a file header.
    pub fn file(self, version: u16) -> Vec<u8> {
        let mut out = MAGIC.to_vec();
        out.extend_from_slice(&version.to_le_bytes());
        out.extend_from_slice(&[0; 2]);
        out.extend_from_slice(&self.bytes);
        out
    }
}
