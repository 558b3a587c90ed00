//! Point list decoding.
//!
//! A point list is a header naming the point count, the byte length of the
//! delta stream and the first point, followed by `num_points - 1` compressed
//! `(dx, dy)` pairs. Two header forms exist:
//!
//! ```text
//! compact:  [num_points u8] [len+4 u8] [base_x u8] [base_y u8]
//! extended: [-- --] [len+10 u16] [num_points u16] [base_x u16] [base_y u16]
//! ```
//!
//! The extended form is recognized by a first byte of 0xF0 or above. Shape
//! coordinates grow upward, so every y component is subtracted from the
//! offset.

use super::bits::BitReader;
use super::consts::{COMPACT_POINTS_OVERHEAD, EXTENDED_POINTS_MARKER, EXTENDED_POINTS_OVERHEAD};
use super::types::Point;
use crate::common::binary::ByteCursor;
use crate::common::error::{Error, Result};

/// Decoded point list header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PointHeader {
    num_points: usize,
    stream_len: usize,
    base_x: i32,
    base_y: i32,
}

impl PointHeader {
    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        if cursor.peek_u8()? >= EXTENDED_POINTS_MARKER {
            cursor.skip(2)?;
            let len = cursor.read_u16()? as usize;
            let num_points = cursor.read_u16()? as usize;
            let base_x = cursor.read_u16()? as i32;
            let base_y = cursor.read_u16()? as i32;
            Ok(Self {
                num_points,
                stream_len: strip_overhead(len, EXTENDED_POINTS_OVERHEAD)?,
                base_x,
                base_y,
            })
        } else {
            let num_points = cursor.read_u8()? as usize;
            let len = cursor.read_u8()? as usize;
            let base_x = cursor.read_u8()? as i32;
            let base_y = cursor.read_u8()? as i32;
            Ok(Self {
                num_points,
                stream_len: strip_overhead(len, COMPACT_POINTS_OVERHEAD)?,
                base_x,
                base_y,
            })
        }
    }
}

fn strip_overhead(len: usize, overhead: usize) -> Result<usize> {
    len.checked_sub(overhead).ok_or_else(|| {
        Error::InvalidFormat(format!(
            "point list length {} is shorter than its {}-byte header",
            len, overhead
        ))
    })
}

/// Decode one point list starting at the cursor, relative to `offset`.
///
/// Consumes the header plus exactly the declared delta-stream length; bits
/// left over after the last delta are ignored. A list that declares zero
/// points yields no points.
pub fn decode_points(cursor: &mut ByteCursor<'_>, offset: Point) -> Result<Vec<Point>> {
    let header = PointHeader::read(cursor)?;
    let stream = cursor.read(header.stream_len)?;

    if header.num_points == 0 {
        return Ok(Vec::new());
    }

    let mut points = Vec::with_capacity(header.num_points);
    let mut point = offset.translate(header.base_x, -header.base_y)?;
    points.push(point);

    let mut bits = BitReader::new(stream);
    for _ in 1..header.num_points {
        let dx = bits.read_compressed_int()?;
        let dy = bits.read_compressed_int()?;
        point = point.translate(dx, -dy)?;
        points.push(point);
    }

    tracing::trace!(
        num_points = header.num_points,
        stream_len = header.stream_len,
        unused_bits = bits.bits_remaining(),
        "decoded point list"
    );
    Ok(points)
}
