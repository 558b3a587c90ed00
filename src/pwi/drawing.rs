//! Drawing table and drawing frame decoding.
//!
//! Drawing chunk layout:
//!
//! ```text
//! [-- x2] [shape_count u16] [-- x4] [line u16] [-- x2]
//! [origin_x i16] [raw_y i16] [width u16] [height u16] [-- x8]
//! [shape_id u16] * shape_count
//! ```
//!
//! A frame is anchored to a text line: its top edge sits `raw_y` units above
//! the bottom of line `line`.

use super::chunk::ChunkMap;
use super::config::DecodeOptions;
use super::consts::LINE_HEIGHT;
use super::diagnostics::Diagnostics;
use super::shape::{Frame, Polyline, decode_shape};
use super::types::{CanvasBounds, Point, Size};
use crate::common::binary::ByteCursor;
use crate::common::error::Result;
use rayon::prelude::*;
use serde::Serialize;

/// A decoded drawing frame and the shapes that could be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Drawing {
    pub id: u16,
    /// Text line the frame is anchored to
    pub line: u16,
    pub origin: Point,
    pub size: Size,
    /// Declared member shapes, in order
    pub shape_ids: Vec<u16>,
    /// Decoded polylines, in declared order
    pub shapes: Vec<Polyline>,
}

impl Drawing {
    #[inline]
    pub fn frame(&self) -> Frame {
        Frame {
            origin: self.origin,
            size: self.size,
        }
    }
}

/// Top edge of a frame anchored `raw_y` units above the bottom of `line`.
#[inline]
pub fn frame_top(line: u16, raw_y: i16) -> i32 {
    (line as i32 + 1) * LINE_HEIGHT - raw_y as i32
}

fn read_table(cursor: &mut ByteCursor<'_>) -> Result<Vec<u16>> {
    cursor.skip(2)?;
    let count = cursor.read_u16()?;
    cursor.skip(8)?;
    (0..count).map(|_| Ok(cursor.read_u16()?)).collect()
}

/// Decode every drawing in the drawing table.
///
/// Returns the drawings in table order together with the canvas bounds,
/// seeded from `options.min_canvas` and grown by every decoded frame.
pub fn decode_drawings(
    chunks: &ChunkMap,
    options: &DecodeOptions,
    diagnostics: &mut Diagnostics,
) -> Result<(Vec<Drawing>, CanvasBounds)> {
    let mut bounds = CanvasBounds::new(options.min_canvas);

    let Some(table) = chunks.get(options.drawing_table_id) else {
        tracing::debug!(
            id = options.drawing_table_id,
            "no drawing table, skipping drawings"
        );
        return Ok((Vec::new(), bounds));
    };

    let table = read_table(&mut table.cursor());
    let Some(ids) = diagnostics.recover(table, options.strict, || "drawing table".to_string())?
    else {
        return Ok((Vec::new(), bounds));
    };
    tracing::debug!(count = ids.len(), parallel = options.parallel, "decoding drawings");

    let resolve = |id: u16| {
        let mut local = Diagnostics::new();
        let result = decode_drawing(chunks, id, options.strict, &mut local);
        (result, local)
    };
    let results: Vec<_> = if options.parallel {
        ids.par_iter().map(|&id| resolve(id)).collect()
    } else {
        ids.iter().map(|&id| resolve(id)).collect()
    };

    let mut drawings = Vec::with_capacity(ids.len());
    for (id, (result, local)) in ids.iter().zip(results) {
        diagnostics.extend(local);
        let unit = || format!("drawing 0x{:04X}", id);
        if let Some(drawing) = diagnostics.recover(result, options.strict, unit)? {
            bounds.include(drawing.origin, drawing.size);
            drawings.push(drawing);
        }
    }

    Ok((drawings, bounds))
}

fn decode_drawing(
    chunks: &ChunkMap,
    id: u16,
    strict: bool,
    diagnostics: &mut Diagnostics,
) -> Result<Drawing> {
    let chunk = chunks.resolve(id, || "drawing table entry".to_string())?;
    let mut cursor = chunk.cursor();

    cursor.skip(2)?;
    let shape_count = cursor.read_u16()?;
    cursor.skip(4)?;
    let line = cursor.read_u16()?;
    cursor.skip(2)?;
    let origin_x = cursor.read_i16()? as i32;
    let raw_y = cursor.read_i16()?;
    let origin = Point::new(origin_x, frame_top(line, raw_y));
    let size = Size::new(cursor.read_u16()? as i32, cursor.read_u16()? as i32);
    cursor.skip(8)?;
    let shape_ids = (0..shape_count)
        .map(|_| cursor.read_u16())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let frame = Frame { origin, size };
    let mut shapes = Vec::with_capacity(shape_ids.len());
    for &shape_id in &shape_ids {
        let result = chunks
            .resolve(shape_id, || format!("shape of drawing 0x{:04X}", id))
            .and_then(|shape| decode_shape(shape, frame, diagnostics));
        let unit = || format!("shape 0x{:04X}", shape_id);
        if let Some(Some(shape)) = diagnostics.recover(result, strict, unit)? {
            shapes.push(shape);
        }
    }

    tracing::trace!(id, line, ?origin, ?size, shapes = shapes.len(), "decoded drawing");
    Ok(Drawing {
        id,
        line,
        origin,
        size,
        shape_ids,
        shapes,
    })
}
