//! Bit-level reader with bounded operations.

use crate::error::{BitError, BitResult};

/// A bit-level reader for unpacking symbol streams.
///
/// Bits are taken from each byte starting at bit 0, the inverse of
/// [`BitWriter`](crate::BitWriter). All reads are bounds-checked; the reader
/// never panics on malformed input.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Returns the number of bits remaining to read.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.data
            .len()
            .saturating_mul(8)
            .saturating_sub(self.bit_pos)
    }

    /// Returns `true` if there are no more bits to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }

    /// Returns the current bit position.
    #[must_use]
    pub const fn bit_position(&self) -> usize {
        self.bit_pos
    }

    /// Returns `true` if every unread bit is zero.
    ///
    /// An exhausted reader trivially satisfies this.
    #[must_use]
    pub fn remaining_bits_are_zero(&self) -> bool {
        let byte_idx = self.bit_pos / 8;
        let Some((first, rest)) = self.data.get(byte_idx..).and_then(<[u8]>::split_first) else {
            return true;
        };
        let bit_idx = self.bit_pos % 8;
        (*first >> bit_idx) == 0 && rest.iter().all(|&byte| byte == 0)
    }

    /// Reads a single bit.
    pub fn read_bit(&mut self) -> BitResult<bool> {
        let byte_idx = self.bit_pos / 8;
        let Some(&byte) = self.data.get(byte_idx) else {
            return Err(BitError::UnexpectedEof {
                requested: 1,
                available: 0,
            });
        };
        let bit = (byte >> (self.bit_pos % 8)) & 1;
        self.bit_pos += 1;
        Ok(bit == 1)
    }

    /// Reads `bits` bits and assembles them most-significant bit first.
    pub fn read_bits(&mut self, bits: usize) -> BitResult<u64> {
        if bits > 64 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 64 });
        }
        if bits == 0 {
            return Ok(0);
        }
        let available = self.bits_remaining();
        if bits > available {
            return Err(BitError::UnexpectedEof {
                requested: bits,
                available,
            });
        }

        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits_remaining();
        (remaining, Some(remaining))
    }
}

/// Expands `bytes` into their ordered bit sequence, bit 0 of each byte first.
#[must_use]
pub fn unpack_bits(bytes: &[u8]) -> Vec<bool> {
    BitReader::new(bytes).collect()
}
