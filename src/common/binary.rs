//! Binary data parsing utilities.
//!
//! This module provides little-endian integer reads over byte slices and a
//! bounds-checked sequential [`ByteCursor`]. Every read past the end of the
//! buffer is reported as [`BinaryError::InsufficientData`]; nothing is ever
//! silently truncated.

use zerocopy::{FromBytes, I16, LE, U16, U32};

/// Binary parsing error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// Not enough data to read the requested type
    InsufficientData { expected: usize, available: usize },
    /// Failed to parse the data
    ParseError(String),
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::InsufficientData {
                expected,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data: expected {}, got {}",
                    expected, available
                )
            },
            BinaryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

#[inline]
fn check_len(data: &[u8], offset: usize, width: usize) -> BinaryResult<()> {
    match offset.checked_add(width) {
        Some(end) if end <= data.len() => Ok(()),
        _ => Err(BinaryError::InsufficientData {
            expected: offset.saturating_add(width),
            available: data.len(),
        }),
    }
}

/// Read a little-endian u16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use pocketword::common::binary::read_u16_le;
/// let data = [0x34, 0x12, 0x78, 0x56];
/// assert_eq!(read_u16_le(&data, 0).unwrap(), 0x1234);
/// assert_eq!(read_u16_le(&data, 2).unwrap(), 0x5678);
/// ```
#[inline]
pub fn read_u16_le(data: &[u8], offset: usize) -> BinaryResult<u16> {
    check_len(data, offset, 2)?;
    U16::<LE>::read_from_bytes(&data[offset..offset + 2])
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u16".to_string()))
}

/// Read a little-endian i16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use pocketword::common::binary::read_i16_le;
/// let data = [0xFF, 0xFF];
/// assert_eq!(read_i16_le(&data, 0).unwrap(), -1i16);
/// ```
#[inline]
pub fn read_i16_le(data: &[u8], offset: usize) -> BinaryResult<i16> {
    check_len(data, offset, 2)?;
    I16::<LE>::read_from_bytes(&data[offset..offset + 2])
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read i16".to_string()))
}

/// Read a little-endian u32 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use pocketword::common::binary::read_u32_le;
/// let data = [0x78, 0x56, 0x34, 0x12];
/// assert_eq!(read_u32_le(&data, 0).unwrap(), 0x12345678);
/// ```
#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> BinaryResult<u32> {
    check_len(data, offset, 4)?;
    U32::<LE>::read_from_bytes(&data[offset..offset + 4])
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u32".to_string()))
}

/// Sequential reader over a borrowed byte buffer.
///
/// The cursor position always stays within `0..=len`. A read that would run
/// past the end fails without moving the cursor.
///
/// # Examples
///
/// ```
/// use pocketword::common::binary::ByteCursor;
///
/// let mut cursor = ByteCursor::new(&[0x01, 0x34, 0x12, 0xAA]);
/// assert_eq!(cursor.read_u8().unwrap(), 0x01);
/// assert_eq!(cursor.read_u16().unwrap(), 0x1234);
/// assert_eq!(cursor.peek_u8().unwrap(), 0xAA);
/// assert!(!cursor.eof());
/// cursor.skip(1).unwrap();
/// assert!(cursor.eof());
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'data> {
    data: &'data [u8],
    pos: usize,
}

impl<'data> ByteCursor<'data> {
    /// Create a cursor positioned at the start of `data`.
    #[inline]
    pub fn new(data: &'data [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether the cursor has consumed the whole buffer.
    #[inline]
    pub fn eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Return the next `n` bytes without advancing.
    #[inline]
    pub fn peek(&self, n: usize) -> BinaryResult<&'data [u8]> {
        check_len(self.data, self.pos, n)?;
        Ok(&self.data[self.pos..self.pos + n])
    }

    /// Return the next `n` bytes and advance past them.
    #[inline]
    pub fn read(&mut self, n: usize) -> BinaryResult<&'data [u8]> {
        let bytes = self.peek(n)?;
        self.pos += n;
        Ok(bytes)
    }

    /// Read `N` bytes into a fixed-size array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> BinaryResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    /// Advance past `n` reserved bytes.
    #[inline]
    pub fn skip(&mut self, n: usize) -> BinaryResult<()> {
        self.read(n).map(|_| ())
    }

    #[inline]
    pub fn peek_u8(&self) -> BinaryResult<u8> {
        self.peek(1).map(|b| b[0])
    }

    #[inline]
    pub fn read_u8(&mut self) -> BinaryResult<u8> {
        self.read(1).map(|b| b[0])
    }

    #[inline]
    pub fn read_u16(&mut self) -> BinaryResult<u16> {
        let value = read_u16_le(self.data, self.pos)?;
        self.pos += 2;
        Ok(value)
    }

    #[inline]
    pub fn read_i16(&mut self) -> BinaryResult<i16> {
        let value = read_i16_le(self.data, self.pos)?;
        self.pos += 2;
        Ok(value)
    }

    #[inline]
    pub fn read_u32(&mut self) -> BinaryResult<u32> {
        let value = read_u32_le(self.data, self.pos)?;
        self.pos += 4;
        Ok(value)
    }
}
