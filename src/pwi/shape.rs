//! Shape chunk interpretation.
//!
//! Two kinds of geometry are decoded:
//!
//! - Polyline chunks (type 103) placed inside a drawing frame
//! - Inline picture chunks (type 67) placed at the text cursor
//!
//! Rectangles, circles, lines, triangles and groups are recognized but not
//! decoded; they are reported and skipped.

use super::chunk::{Chunk, ChunkKind};
use super::consts::{IDENTITY_TRANSFORM, PICTURE_STROKE_WIDTH, palette};
use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::points::decode_points;
use super::types::{Point, Rgb, Size};
use crate::common::error::Result;
use serde::Serialize;

/// Placement of a drawing frame, in flipped page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub origin: Point,
    pub size: Size,
}

/// A decoded polyline shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Polyline {
    pub id: u16,
    pub stroke: Rgb,
    /// Only meaningful when `filled` is set
    pub fill: Rgb,
    pub stroke_width: u8,
    /// Filled polylines are implicitly closed
    pub filled: bool,
    /// Declared bounding size; informational
    pub size: Size,
    /// False when the transform block was not the identity and was ignored
    pub identity_transform: bool,
    pub points: Vec<Point>,
}

impl Polyline {
    /// Fill color, if the shape is filled.
    #[inline]
    pub fn fill_color(&self) -> Option<Rgb> {
        self.filled.then_some(self.fill)
    }
}

/// Decode the chunk behind a drawing's shape reference.
///
/// Returns `Ok(None)` with a diagnostic for shape types that are not decoded.
pub fn decode_shape(
    chunk: &Chunk,
    frame: Frame,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Polyline>> {
    match chunk.kind {
        ChunkKind::Polyline => decode_polyline(chunk, frame, diagnostics).map(Some),
        kind => {
            diagnostics.push(DiagnosticKind::UnsupportedShape {
                id: chunk.id,
                chunk_type: kind.to_u16(),
            });
            Ok(None)
        },
    }
}

/// Decode a polyline chunk positioned inside `frame`.
pub fn decode_polyline(
    chunk: &Chunk,
    frame: Frame,
    diagnostics: &mut Diagnostics,
) -> Result<Polyline> {
    let mut cursor = chunk.cursor();

    cursor.skip(3)?;
    let color = cursor.read_u8()?;
    let stroke_width = cursor.read_u8()?;
    let filled = cursor.read_u8()? != 0;
    cursor.skip(6)?;

    let dx = cursor.read_i16()? as i32;
    let dy = cursor.read_i16()? as i32;
    let offset = Point::new(
        frame.origin.x + dx,
        frame.origin.y + frame.size.height - dy,
    );
    let size = Size::new(cursor.read_u16()? as i32, cursor.read_u16()? as i32);

    let transform: [u8; 20] = cursor.read_array()?;
    let identity_transform = transform == IDENTITY_TRANSFORM;
    if !identity_transform {
        diagnostics.push(DiagnosticKind::UnsupportedTransform { id: chunk.id });
    }

    let points = decode_points(&mut cursor, offset)?;

    Ok(Polyline {
        id: chunk.id,
        stroke: palette(color),
        fill: palette(color >> 4),
        stroke_width,
        filled,
        size,
        identity_transform,
        points,
    })
}

/// An open stroke drawn by an inline picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stroke {
    pub color: Rgb,
    pub width: u8,
    pub points: Vec<Point>,
}

/// A picture embedded in a paragraph's text flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlinePicture {
    pub id: u16,
    /// Text cursor position the strokes are relative to
    pub origin: Point,
    /// Horizontal advance applied to the text cursor
    pub advance: i32,
    pub strokes: Vec<Stroke>,
}

/// Decode an inline picture at `text_cursor` and advance the cursor past it.
///
/// Returns `Ok(None)` with a diagnostic, leaving the cursor untouched, when
/// the chunk is not a picture.
pub fn decode_inline_picture(
    chunk: &Chunk,
    text_cursor: &mut Point,
    diagnostics: &mut Diagnostics,
) -> Result<Option<InlinePicture>> {
    if chunk.kind != ChunkKind::Picture {
        diagnostics.push(DiagnosticKind::UnsupportedShape {
            id: chunk.id,
            chunk_type: chunk.kind.to_u16(),
        });
        return Ok(None);
    }

    let mut cursor = chunk.cursor();
    cursor.skip(4)?;
    let advance = cursor.read_u16()? as i32;
    let line_count = cursor.read_u16()?;
    cursor.skip(2)?;

    let origin = *text_cursor;
    let strokes = (0..line_count)
        .map(|_| {
            decode_points(&mut cursor, origin).map(|points| Stroke {
                color: Rgb::BLACK,
                width: PICTURE_STROKE_WIDTH,
                points,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    *text_cursor = text_cursor.translate(advance, 0)?;

    Ok(Some(InlinePicture {
        id: chunk.id,
        origin,
        advance,
        strokes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::Error;
    use crate::pwi::consts::{CHUNK_PICTURE, CHUNK_POLYLINE, CHUNK_RECTANGLE, PALETTE};
    use crate::pwi::test_support::{PolylineSpec, compact_points, picture, polyline};
    use bytes::Bytes;

    fn chunk(chunk_type: u16, id: u16, payload: Vec<u8>) -> Chunk {
        Chunk {
            id,
            kind: ChunkKind::from_u16(chunk_type),
            data: Bytes::from(payload),
        }
    }

    const FRAME: Frame = Frame {
        origin: Point::new(50, 116),
        size: Size::new(40, 30),
    };

    #[test]
    fn test_polyline_fields_and_offset() {
        let spec = PolylineSpec {
            color: 0x4A,
            width: 3,
            filled: true,
            dx: 5,
            dy: 10,
            size: (12, 34),
            ..Default::default()
        };
        let payload = polyline(&spec, &compact_points(2, 3, &[(4, 4)]));
        let mut diagnostics = Diagnostics::new();
        let shape = decode_polyline(&chunk(CHUNK_POLYLINE, 7, payload), FRAME, &mut diagnostics)
            .unwrap();

        assert_eq!(shape.stroke, PALETTE[0xA]);
        assert_eq!(shape.fill, PALETTE[0x4]);
        assert_eq!(shape.fill_color(), Some(PALETTE[0x4]));
        assert_eq!(shape.stroke_width, 3);
        assert!(shape.filled);
        assert_eq!(shape.size, Size::new(12, 34));
        assert!(shape.identity_transform);
        // offset = (50 + 5, 116 + 30 - 10) = (55, 136)
        assert_eq!(
            shape.points,
            vec![Point::new(57, 133), Point::new(61, 129)]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unfilled_has_no_fill_color() {
        let payload = polyline(&PolylineSpec::default(), &compact_points(0, 0, &[]));
        let shape = decode_polyline(
            &chunk(CHUNK_POLYLINE, 1, payload),
            FRAME,
            &mut Diagnostics::new(),
        )
        .unwrap();
        assert_eq!(shape.fill_color(), None);
    }

    #[test]
    fn test_non_identity_transform_is_reported_and_ignored() {
        let mut transform = IDENTITY_TRANSFORM;
        transform[4] = 0x7F;
        let spec = PolylineSpec {
            transform,
            ..Default::default()
        };
        let payload = polyline(&spec, &compact_points(1, 1, &[(1, 1)]));
        let mut diagnostics = Diagnostics::new();
        let shape = decode_polyline(&chunk(CHUNK_POLYLINE, 9, payload), FRAME, &mut diagnostics)
            .unwrap();

        assert!(!shape.identity_transform);
        assert_eq!(shape.points.len(), 2);
        assert!(diagnostics.any(|k| *k == DiagnosticKind::UnsupportedTransform { id: 9 }));
    }

    #[test]
    fn test_unsupported_shape_is_skipped() {
        let mut diagnostics = Diagnostics::new();
        let result =
            decode_shape(&chunk(CHUNK_RECTANGLE, 3, vec![0; 8]), FRAME, &mut diagnostics).unwrap();

        assert!(result.is_none());
        assert!(diagnostics.any(|k| {
            *k == DiagnosticKind::UnsupportedShape {
                id: 3,
                chunk_type: CHUNK_RECTANGLE,
            }
        }));
    }

    #[test]
    fn test_truncated_polyline() {
        let err = decode_polyline(
            &chunk(CHUNK_POLYLINE, 1, vec![0; 20]),
            FRAME,
            &mut Diagnostics::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof { .. }));
    }

    #[test]
    fn test_inline_picture_strokes_and_advance() {
        let payload = picture(
            25,
            &[
                compact_points(1, 2, &[(3, 3)]),
                compact_points(0, 0, &[(1, 0), (0, 1)]),
            ],
        );
        let mut text_cursor = Point::new(10, 144);
        let mut diagnostics = Diagnostics::new();
        let pic = decode_inline_picture(
            &chunk(CHUNK_PICTURE, 4, payload),
            &mut text_cursor,
            &mut diagnostics,
        )
        .unwrap()
        .unwrap();

        assert_eq!(pic.origin, Point::new(10, 144));
        assert_eq!(pic.advance, 25);
        assert_eq!(pic.strokes.len(), 2);
        assert_eq!(
            pic.strokes[0].points,
            vec![Point::new(11, 142), Point::new(14, 139)]
        );
        assert_eq!(
            pic.strokes[1].points,
            vec![Point::new(10, 144), Point::new(11, 144), Point::new(11, 143)]
        );
        assert!(pic.strokes.iter().all(|s| s.width == 4 && s.color == Rgb::BLACK));
        assert_eq!(text_cursor, Point::new(35, 144));
    }

    #[test]
    fn test_non_picture_chunk_leaves_cursor() {
        let mut text_cursor = Point::new(1, 2);
        let mut diagnostics = Diagnostics::new();
        let result = decode_inline_picture(
            &chunk(CHUNK_POLYLINE, 4, vec![0; 8]),
            &mut text_cursor,
            &mut diagnostics,
        )
        .unwrap();

        assert!(result.is_none());
        assert_eq!(text_cursor, Point::new(1, 2));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_picture_advance_overflow_leaves_cursor() {
        let payload = picture(25, &[compact_points(0, 0, &[])]);
        let mut text_cursor = Point::new(i32::MAX - 10, 72);
        let err = decode_inline_picture(
            &chunk(CHUNK_PICTURE, 4, payload),
            &mut text_cursor,
            &mut Diagnostics::new(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::InvalidFormat(_)));
        assert_eq!(text_cursor, Point::new(i32::MAX - 10, 72));
    }
}
