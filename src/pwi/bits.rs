//! Compressed integer decoding.
//!
//! Point deltas are packed into a bitstream read least-significant bit first:
//! bit 0 through bit 7 of the first byte, then bit 0 through bit 7 of the
//! next, and so on. Each value uses an escape-coded tiering scheme:
//!
//! | tier | bits | range                  | sentinel (escalate) |
//! |------|------|------------------------|---------------------|
//! | 1    | 5    | -15..=15               | -16                 |
//! | 2    | 6    | 16..=47, -46..=-16     | -32 (would be -47)  |
//! | 3    | 8    | -127..=127             | -128                |
//! | 4    | 16   | -32767..=32767         | -32768 (fatal)      |

use crate::common::error::{Error, Result};

/// LSB-first bit reader over a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'data> {
    data: &'data [u8],
    bit_pos: usize,
}

impl<'data> BitReader<'data> {
    #[inline]
    pub fn new(data: &'data [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Number of bits consumed so far.
    #[inline]
    pub fn bits_read(&self) -> usize {
        self.bit_pos
    }

    /// Number of bits left in the stream.
    #[inline]
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_pos
    }

    /// Read `n` bits (at most 32) as an unsigned value, first bit lowest.
    pub fn read_bits(&mut self, n: u32) -> Result<u32> {
        debug_assert!(n <= 32);
        if (n as usize) > self.bits_remaining() {
            return Err(Error::UnexpectedEof {
                expected: (self.bit_pos + n as usize).div_ceil(8),
                available: self.data.len(),
            });
        }

        let mut value = 0u32;
        for i in 0..n {
            let byte = self.data[self.bit_pos / 8];
            let bit = (byte >> (self.bit_pos % 8)) & 1;
            value |= (bit as u32) << i;
            self.bit_pos += 1;
        }
        Ok(value)
    }

    /// Read `n` bits as an `n`-bit two's-complement integer.
    pub fn read_signed(&mut self, n: u32) -> Result<i32> {
        let raw = self.read_bits(n)?;
        let shift = 32 - n;
        Ok(((raw << shift) as i32) >> shift)
    }

    /// Decode one escape-coded integer.
    ///
    /// Reaching the 16-bit sentinel yields [`Error::IntegerOverflow`].
    pub fn read_compressed_int(&mut self) -> Result<i32> {
        let v = self.read_signed(5)?;
        if v != -16 {
            return Ok(v);
        }

        let v = self.read_signed(6)?;
        if v >= 0 {
            return Ok(v + 16);
        }
        if v != -32 {
            return Ok(v - 15);
        }

        let v = self.read_signed(8)?;
        if v != -128 {
            return Ok(v);
        }

        let v = self.read_signed(16)?;
        if v != -32768 {
            return Ok(v);
        }
        Err(Error::IntegerOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pwi::test_support::BitWriter;
    use proptest::prelude::*;

    fn decode_one(bits: &BitWriter) -> (Result<i32>, usize) {
        let bytes = bits.to_bytes();
        let mut reader = BitReader::new(&bytes);
        let value = reader.read_compressed_int();
        (value, reader.bits_read())
    }

    #[test]
    fn test_bit_order_is_lsb_first() {
        // 0b1010_0110: first five bits are 0,1,1,0,0 -> 0b00110 = 6
        let mut reader = BitReader::new(&[0b1010_0110, 0b0000_0001]);
        assert_eq!(reader.read_bits(5).unwrap(), 0b00110);
        // remaining 1,0,1 from byte 0 then 1 from byte 1
        assert_eq!(reader.read_bits(4).unwrap(), 0b1101);
    }

    #[test]
    fn test_read_signed_sign_extends() {
        let mut reader = BitReader::new(&[0b0001_0000]);
        assert_eq!(reader.read_signed(5).unwrap(), -16);
        let mut reader = BitReader::new(&[0xFF, 0xFF]);
        assert_eq!(reader.read_signed(16).unwrap(), -1);
        let mut reader = BitReader::new(&[0x00, 0x80]);
        assert_eq!(reader.read_signed(16).unwrap(), -32768);
    }

    #[test]
    fn test_read_past_end() {
        let mut reader = BitReader::new(&[0xFF]);
        reader.read_bits(5).unwrap();
        assert!(matches!(
            reader.read_bits(5),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_tier_two_extremes() {
        for (raw, expected) in [(0, 16), (31, 47), (-1, -16), (-31, -46)] {
            let mut bits = BitWriter::new();
            bits.signed(5, -16).signed(6, raw);
            let (value, consumed) = decode_one(&bits);
            assert_eq!(value.unwrap(), expected, "raw {}", raw);
            assert_eq!(consumed, 11);
        }
    }

    #[test]
    fn test_tier_two_negative_boundary() {
        let mut bits = BitWriter::new();
        bits.signed(5, -16).signed(6, -2);
        assert_eq!(decode_one(&bits).0.unwrap(), -17);
    }

    #[test]
    fn test_tier_three_extremes() {
        for value in [127, -127, 0, 48, -47] {
            let mut bits = BitWriter::new();
            bits.signed(5, -16).signed(6, -32).signed(8, value);
            let (decoded, consumed) = decode_one(&bits);
            assert_eq!(decoded.unwrap(), value);
            assert_eq!(consumed, 19);
        }
    }

    #[test]
    fn test_tier_four_extremes() {
        for value in [32767, -32767, 128, -128] {
            let mut bits = BitWriter::new();
            bits.signed(5, -16)
                .signed(6, -32)
                .signed(8, -128)
                .signed(16, value);
            let (decoded, consumed) = decode_one(&bits);
            assert_eq!(decoded.unwrap(), value);
            assert_eq!(consumed, 35);
        }
    }

    #[test]
    fn test_tier_four_sentinel_is_fatal() {
        let mut bits = BitWriter::new();
        bits.signed(5, -16)
            .signed(6, -32)
            .signed(8, -128)
            .signed(16, -32768);
        let err = decode_one(&bits).0.unwrap_err();
        assert!(matches!(err, Error::IntegerOverflow));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_writer_encoding_matches_reader() {
        for value in [-32767, -1000, -128, -47, -46, -17, -16, -15, 0, 15, 16, 47, 48, 127, 128, 32767]
        {
            let mut bits = BitWriter::new();
            bits.compressed(value);
            assert_eq!(decode_one(&bits).0.unwrap(), value);
        }
    }

    proptest! {
        #[test]
        fn prop_direct_range_uses_five_bits(value in -15i32..=15) {
            let mut bits = BitWriter::new();
            bits.signed(5, value);
            let (decoded, consumed) = decode_one(&bits);
            prop_assert_eq!(decoded.unwrap(), value);
            prop_assert_eq!(consumed, 5);
        }

        #[test]
        fn prop_sequences_decode_in_order(
            values in proptest::collection::vec(-32767i32..=32767, 1..40)
        ) {
            let mut bits = BitWriter::new();
            for &v in &values {
                bits.compressed(v);
            }
            let bytes = bits.to_bytes();
            let mut reader = BitReader::new(&bytes);
            for &v in &values {
                prop_assert_eq!(reader.read_compressed_int().unwrap(), v);
            }
            prop_assert_eq!(reader.bits_read(), bits.len());
        }
    }
}
