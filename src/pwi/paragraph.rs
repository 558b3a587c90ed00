//! Paragraph table and command stream decoding.
//!
//! The paragraph table lists every paragraph with its line count. Walking the
//! table drives a text cursor: each entry moves the cursor down by its line
//! count, and each paragraph's command stream moves it right and places
//! inline pictures at it.
//!
//! Paragraph chunk layout:
//!
//! ```text
//! [-- x8] [dimension_id u16] [-- x4] [left_margin i16] [-- x8] [commands...]
//! ```

use super::chunk::ChunkMap;
use super::config::DecodeOptions;
use super::consts::{LINE_HEIGHT, NO_CHUNK};
use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::shape::{InlinePicture, decode_inline_picture};
use super::types::Point;
use crate::common::binary::ByteCursor;
use crate::common::error::Result;
use phf::phf_map;
use serde::Serialize;

/// Picture embed; argument is the picture chunk id
pub const OP_PICTURE: u8 = 0xC2;
/// Separator; argument is a horizontal advance
pub const OP_SEPARATOR: u8 = 0xC3;
/// End of the command stream
pub const OP_END: u8 = 0xC4;
/// Font selector
pub const OP_FONT: u8 = 0xE5;
/// Unhandled opcode that is still worth reporting
pub const OP_UNHANDLED_C1: u8 = 0xC1;

/// Argument byte count of every known opcode.
static OPCODE_ARG_LEN: phf::Map<u8, usize> = phf_map! {
    0xC1u8 => 1,
    0xC2u8 => 2,
    0xC3u8 => 2,
    0xC4u8 => 1,
    0xC5u8 => 2,
    0xE5u8 => 2,
    0xE6u8 => 2,
    0xE7u8 => 1,
    0xE8u8 => 1,
    0xE9u8 => 1,
    0xEAu8 => 1,
    0xEBu8 => 1,
    0xECu8 => 2,
    0xEFu8 => 3,
};

/// Argument length of `opcode`, or `None` when it is not in the table.
#[inline]
pub fn opcode_arg_len(opcode: u8) -> Option<usize> {
    OPCODE_ARG_LEN.get(&opcode).copied()
}

/// One decoded command of a paragraph's stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParagraphCommand {
    Picture { id: u16 },
    Separator { advance: u16 },
    End,
    Font { id: u16 },
    /// Known opcode, arguments consumed but not interpreted
    Unhandled { opcode: u8, args: Vec<u8> },
    /// Opcode outside the table, treated as having no argument
    Unknown { opcode: u8 },
}

/// A decoded paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub id: u16,
    pub line_count: u16,
    /// Dimension chunk; looked up but not interpreted
    pub dimension_id: u16,
    pub left_margin: i16,
    /// Text cursor when the command stream started
    pub start: Point,
    /// Text cursor when the command stream ended
    pub end: Point,
    pub commands: Vec<ParagraphCommand>,
    pub pictures: Vec<InlinePicture>,
}

/// One row of the paragraph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TableEntry {
    num_lines: u16,
    chunk_id: u16,
}

fn read_table(cursor: &mut ByteCursor<'_>) -> Result<Vec<TableEntry>> {
    let count = cursor.read_u32()?;
    // line and character totals
    cursor.skip(5 * 4)?;

    (0..count)
        .map(|_| {
            let num_lines = cursor.read_u16()?;
            cursor.skip(2)?;
            let chunk_id = cursor.read_u16()?;
            cursor.skip(2)?;
            Ok(TableEntry {
                num_lines,
                chunk_id,
            })
        })
        .collect()
}

/// Decode every paragraph listed in the paragraph table.
///
/// A missing table means the document has no paragraphs. Entries with chunk
/// id 0 still advance the cursor but produce no paragraph.
pub fn decode_paragraphs(
    chunks: &ChunkMap,
    options: &DecodeOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Paragraph>> {
    let Some(table) = chunks.get(options.paragraph_table_id) else {
        tracing::debug!(
            id = options.paragraph_table_id,
            "no paragraph table, skipping paragraphs"
        );
        return Ok(Vec::new());
    };

    let table = read_table(&mut table.cursor());
    let Some(entries) = diagnostics.recover(table, options.strict, || "paragraph table".to_string())?
    else {
        return Ok(Vec::new());
    };
    tracing::debug!(count = entries.len(), "decoding paragraphs");

    let mut text_cursor = Point::default();
    let mut paragraphs = Vec::new();

    for entry in entries {
        // once the cursor leaves the coordinate range no later entry can be placed
        let moved = text_cursor.translate(0, LINE_HEIGHT * entry.num_lines as i32);
        let Some(moved) = diagnostics.recover(moved, options.strict, || "paragraph table".to_string())?
        else {
            break;
        };
        text_cursor = moved;
        if entry.chunk_id == NO_CHUNK {
            continue;
        }

        let result = decode_paragraph(chunks, entry, &mut text_cursor, options, diagnostics);
        let unit = || format!("paragraph 0x{:04X}", entry.chunk_id);
        if let Some(paragraph) = diagnostics.recover(result, options.strict, unit)? {
            paragraphs.push(paragraph);
        }
    }

    Ok(paragraphs)
}

fn decode_paragraph(
    chunks: &ChunkMap,
    entry: TableEntry,
    text_cursor: &mut Point,
    options: &DecodeOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Paragraph> {
    let id = entry.chunk_id;
    let chunk = chunks.resolve(id, || "paragraph table entry".to_string())?;
    let mut cursor = chunk.cursor();

    cursor.skip(8)?;
    let dimension_id = cursor.read_u16()?;
    if chunks.get(dimension_id).is_none() {
        diagnostics.push(DiagnosticKind::DanglingReference {
            id: dimension_id,
            context: format!("dimensions of paragraph 0x{:04X}", id),
        });
    }
    cursor.skip(4)?;
    let left_margin = cursor.read_i16()?;
    cursor.skip(8)?;

    text_cursor.x = left_margin as i32;
    let start = *text_cursor;

    let mut commands = Vec::new();
    let mut pictures = Vec::new();

    while !cursor.eof() {
        let opcode = cursor.read_u8()?;
        let Some(arg_len) = opcode_arg_len(opcode) else {
            diagnostics.push(DiagnosticKind::UnknownOpcode {
                paragraph: id,
                opcode,
            });
            commands.push(ParagraphCommand::Unknown { opcode });
            continue;
        };
        let args = cursor.read(arg_len)?;

        let command = match opcode {
            OP_PICTURE => {
                let picture_id = u16::from_le_bytes([args[0], args[1]]);
                let result = chunks
                    .resolve(picture_id, || format!("picture in paragraph 0x{:04X}", id))
                    .and_then(|picture| decode_inline_picture(picture, text_cursor, diagnostics));
                let unit = || format!("picture 0x{:04X}", picture_id);
                if let Some(Some(picture)) = diagnostics.recover(result, options.strict, unit)? {
                    pictures.push(picture);
                }
                ParagraphCommand::Picture { id: picture_id }
            },
            OP_SEPARATOR => {
                let advance = u16::from_le_bytes([args[0], args[1]]);
                *text_cursor = text_cursor.translate(advance as i32, 0)?;
                ParagraphCommand::Separator { advance }
            },
            OP_END => {
                commands.push(ParagraphCommand::End);
                break;
            },
            OP_FONT => ParagraphCommand::Font {
                id: u16::from_le_bytes([args[0], args[1]]),
            },
            _ => {
                if opcode == OP_UNHANDLED_C1 {
                    diagnostics.push(DiagnosticKind::UnhandledOpcode {
                        paragraph: id,
                        opcode,
                    });
                } else {
                    tracing::debug!(paragraph = id, opcode, "skipping unhandled opcode");
                }
                ParagraphCommand::Unhandled {
                    opcode,
                    args: args.to_vec(),
                }
            },
        };
        commands.push(command);
    }

    Ok(Paragraph {
        id,
        line_count: entry.num_lines,
        dimension_id,
        left_margin,
        start,
        end: *text_cursor,
        commands,
        pictures,
    })
}
