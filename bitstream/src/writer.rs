//! Bit-level writer for packing symbol streams.

use crate::error::{BitError, BitResult};

/// A bit-level writer for packing symbol streams into bytes.
///
/// Bits fill each byte starting at the least-significant position, so the
/// first bit written lands in bit 0 of the first byte. Call
/// [`finish`](Self::finish) to get the zero-padded byte buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// The completed bytes.
    bytes: Vec<u8>,
    /// Current byte being filled (not yet pushed to `bytes`).
    current_byte: u8,
    /// Number of bits written to `current_byte` (0-7).
    bit_count: u8,
}

impl BitWriter {
    /// Creates a new empty `BitWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `BitWriter` with room for `bytes` completed bytes.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            current_byte: 0,
            bit_count: 0,
        }
    }

    /// Creates a new `BitWriter` with room for `bits` bits, rounded up to whole bytes.
    #[must_use]
    pub fn with_capacity_bits(bits: usize) -> Self {
        Self::with_capacity(bits.div_ceil(8))
    }

    /// Returns the number of bits written so far.
    #[must_use]
    pub fn bits_written(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, value: bool) {
        self.current_byte |= u8::from(value) << self.bit_count;
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    /// Writes the low `bits` bits of `value`, most-significant bit first.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::InvalidBitCount`] if `bits > 64`.
    /// Returns [`BitError::ValueOutOfRange`] if `value` doesn't fit in `bits`.
    pub fn write_bits(&mut self, value: u64, bits: usize) -> BitResult<()> {
        if bits > 64 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 64 });
        }
        if bits == 0 {
            return Ok(());
        }
        if bits < 64 && value >= (1u64 << bits) {
            return Err(BitError::ValueOutOfRange { value, bits });
        }

        for i in (0..bits).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Appends every bit of `bits` in order.
    pub fn extend_bits<I>(&mut self, bits: I)
    where
        I: IntoIterator<Item = bool>,
    {
        for bit in bits {
            self.write_bit(bit);
        }
    }

    /// Finishes writing and returns the byte buffer.
    ///
    /// If the last byte is incomplete, its unused high bits stay zero.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.current_byte);
        }
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    ///
    /// If the last byte is incomplete, its unused high bits stay zero.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        if self.bit_count > 0 {
            self.bytes.push(self.current_byte);
        }
        buf.append(&mut self.bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = BitWriter::new();
        assert_eq!(writer.bits_written(), 0);
        let bytes = writer.finish();
        assert!(bytes.is_empty());
    }

    #[test]
    fn write_single_bit_true() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        assert_eq!(writer.bits_written(), 1);
        let bytes = writer.finish();
        // First bit lands in bit 0, the remaining 7 bits are padding.
        assert_eq!(bytes, vec![0b0000_0001]);
    }

    #[test]
    fn write_single_bit_false() {
        let mut writer = BitWriter::new();
        writer.write_bit(false);
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b0000_0000]);
    }

    #[test]
    fn write_full_byte() {
        let mut writer = BitWriter::new();
        for bit in [true, false, true, false, true, false, true, false] {
            writer.write_bit(bit);
        }
        assert_eq!(writer.bits_written(), 8);
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b0101_0101]);
    }

    #[test]
    fn write_partial_byte_with_padding() {
        let mut writer = BitWriter::new();
        // Stream order: 1 1 0 1 0
        writer.write_bit(true);
        writer.write_bit(true);
        writer.write_bit(false);
        writer.write_bit(true);
        writer.write_bit(false);
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b0000_1011]);
    }

    #[test]
    fn write_bits_zero() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFF, 0).unwrap();
        assert_eq!(writer.bits_written(), 0);
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn write_bits_is_msb_first_in_stream() {
        let mut writer = BitWriter::new();
        // Stream order 1 0 0 0, packed from bit 0 upward.
        writer.write_bits(0b1000, 4).unwrap();
        assert_eq!(writer.bits_written(), 4);
        assert_eq!(writer.finish(), vec![0b0000_0001]);
    }

    #[test]
    fn write_bits_across_byte_boundary() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b111, 3).unwrap();
        writer.write_bits(0b1100_0011, 8).unwrap();
        let bytes = writer.finish();
        // Stream: 1 1 1 | 1 1 0 0 0 | 0 1 1
        assert_eq!(bytes, vec![0b0001_1111, 0b0000_0110]);
    }

    #[test]
    fn write_bits_invalid_count() {
        let mut writer = BitWriter::new();
        let result = writer.write_bits(0, 65);
        assert!(matches!(
            result,
            Err(BitError::InvalidBitCount {
                bits: 65,
                max_bits: 64
            })
        ));
    }

    #[test]
    fn write_bits_value_out_of_range() {
        let mut writer = BitWriter::new();
        let result = writer.write_bits(16, 4);
        assert!(matches!(
            result,
            Err(BitError::ValueOutOfRange { value: 16, bits: 4 })
        ));
    }

    #[test]
    fn write_bits_64_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(u64::MAX, 64).unwrap();
        assert_eq!(writer.finish(), vec![0xFF; 8]);
    }

    #[test]
    fn extend_bits_matches_write_bit() {
        let bits = [false, false, true, false, true, false, true, true, false];
        let mut a = BitWriter::new();
        a.extend_bits(bits);
        let mut b = BitWriter::new();
        for bit in bits {
            b.write_bit(bit);
        }
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn with_capacity_bits_rounds_up() {
        let writer = BitWriter::with_capacity_bits(9);
        assert_eq!(writer.bits_written(), 0);
        assert!(writer.bytes.capacity() >= 2);
    }

    #[test]
    fn finish_into() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xAB, 8).unwrap();

        let mut buf = vec![0x00, 0x11];
        writer.finish_into(&mut buf);
        assert_eq!(buf, vec![0x00, 0x11, 0xD5]);
    }

    #[test]
    fn finish_into_with_padding() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);

        let mut buf = Vec::new();
        writer.finish_into(&mut buf);
        assert_eq!(buf, vec![0b0000_0001]);
    }
}
