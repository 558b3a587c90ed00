//! Constants for the Pocket Word container format.

use super::types::Rgb;

/// Magic bytes at the beginning of every psw/pwi file (`{\pwi` + 5 bytes)
pub const MAGIC: &[u8; 10] = b"\x7B\x5C\x70\x77\x69\x15\x00\x00\x01\x01";

/// The only format version verified against real documents
pub const SUPPORTED_VERSION: u16 = 6;

/// Size of the file header: magic, version, 2 reserved bytes
pub const HEADER_SIZE: usize = MAGIC.len() + 4;

/// Chunk lengths other than raw text are declared in 4-byte units
pub const CHUNK_LENGTH_UNIT: usize = 4;

// Chunk type codes
/// Free-form paragraph record
pub const CHUNK_PARAGRAPH: u16 = 65;
/// Paragraph break record
pub const CHUNK_PARAGRAPH_BREAK: u16 = 66;
/// Inline picture embedded in a paragraph
pub const CHUNK_PICTURE: u16 = 67;
/// Raw text; its length field is a literal byte count
pub const CHUNK_TEXT: u16 = 85;
/// Shape group
pub const CHUNK_GROUP: u16 = 102;
/// Polyline shape
pub const CHUNK_POLYLINE: u16 = 103;
/// Rectangle shape
pub const CHUNK_RECTANGLE: u16 = 104;
/// Circle shape
pub const CHUNK_CIRCLE: u16 = 105;
/// Straight line shape
pub const CHUNK_LINE: u16 = 106;
/// Triangle shape
pub const CHUNK_TRIANGLE: u16 = 107;
/// Drawing frame
pub const CHUNK_DRAWING: u16 = 131;

// Well-known chunk ids
//
// The two table ids below have not been confirmed against a reference file.
// Both can be overridden with `DecodeOptions::with_paragraph_table_id` and
// `DecodeOptions::with_drawing_table_id`.
/// Default id of the paragraph table chunk (unverified)
pub const PARAGRAPH_TABLE_ID: u16 = 0x0004;
/// Default id of the drawing table chunk (unverified)
pub const DRAWING_TABLE_ID: u16 = 0x0005;
/// Paragraph table entries with this chunk id carry no content
pub const NO_CHUNK: u16 = 0;

/// Height of one text line in document units
pub const LINE_HEIGHT: i32 = 72;

/// Transform block carried by every untransformed polyline
pub const IDENTITY_TRANSFORM: [u8; 20] = [
    0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// First byte at or above this value selects the extended point header
pub const EXTENDED_POINTS_MARKER: u8 = 0xF0;
/// Header overhead included in the extended form's byte length
pub const EXTENDED_POINTS_OVERHEAD: usize = 10;
/// Header overhead included in the compact form's byte length
pub const COMPACT_POINTS_OVERHEAD: usize = 4;

/// Stroke width used for inline picture strokes
pub const PICTURE_STROKE_WIDTH: u8 = 4;

/// Minimum canvas edge length
pub const MIN_CANVAS_EDGE: i32 = 100;

/// Fixed 16-entry color palette addressed by 4-bit indices
pub const PALETTE: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(132, 130, 132),
    Rgb::new(198, 195, 198),
    Rgb::new(255, 255, 255),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(132, 0, 0),
    Rgb::new(0, 130, 0),
    Rgb::new(0, 0, 132),
    Rgb::new(0, 130, 132),
    Rgb::new(132, 0, 132),
    Rgb::new(132, 130, 0),
];

/// Resolve a 4-bit palette index; higher bits are ignored.
#[inline]
pub const fn palette(index: u8) -> Rgb {
    PALETTE[(index & 0x0F) as usize]
}
