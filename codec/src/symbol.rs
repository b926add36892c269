//! The four-symbol delta grammar.
//!
//! | Symbol      | Bits                     |
//! |-------------|--------------------------|
//! | `Repeat`    | `0`                      |
//! | `Increment` | `10`                     |
//! | `Decrement` | `110`                    |
//! | `Literal`   | `111` + 4 bits MSB first |

use bitstream::BitWriter;

use crate::types::REGISTER_MASK;

/// Number of payload bits carried by a literal.
pub const LITERAL_BITS: usize = 4;

/// Longest symbol in the grammar.
pub const MAX_SYMBOL_BITS: usize = 3 + LITERAL_BITS;

/// One encoded delta between consecutive register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Repeat,
    Increment,
    Decrement,
    /// Carries the new register value in its low four bits.
    Literal(u8),
}

impl Symbol {
    /// Chooses the shortest symbol that moves `previous` to `current`.
    ///
    /// Both arguments are register values; steps of ±1 wrap modulo 16.
    #[must_use]
    pub fn classify(previous: u8, current: u8) -> Self {
        let previous = previous & REGISTER_MASK;
        let current = current & REGISTER_MASK;
        if current == previous {
            Self::Repeat
        } else if current == wrapping_increment(previous) {
            Self::Increment
        } else if current == wrapping_decrement(previous) {
            Self::Decrement
        } else {
            Self::Literal(current)
        }
    }

    /// Returns the encoded length in bits.
    #[must_use]
    pub const fn bit_len(self) -> usize {
        match self {
            Self::Repeat => 1,
            Self::Increment => 2,
            Self::Decrement => 3,
            Self::Literal(_) => MAX_SYMBOL_BITS,
        }
    }

    /// Returns the register value after applying this symbol to `previous`.
    #[must_use]
    pub const fn apply(self, previous: u8) -> u8 {
        match self {
            Self::Repeat => previous & REGISTER_MASK,
            Self::Increment => wrapping_increment(previous),
            Self::Decrement => wrapping_decrement(previous),
            Self::Literal(value) => value & REGISTER_MASK,
        }
    }

    /// Appends this symbol's bits to `writer`.
    pub fn write(self, writer: &mut BitWriter) {
        match self {
            Self::Repeat => writer.write_bit(false),
            Self::Increment => {
                writer.write_bit(true);
                writer.write_bit(false);
            }
            Self::Decrement => {
                writer.write_bit(true);
                writer.write_bit(true);
                writer.write_bit(false);
            }
            Self::Literal(value) => {
                for _ in 0..3 {
                    writer.write_bit(true);
                }
                for shift in (0..LITERAL_BITS).rev() {
                    writer.write_bit((value >> shift) & 1 == 1);
                }
            }
        }
    }
}

/// Adds one to a register value, wrapping 15 to 0.
#[must_use]
pub const fn wrapping_increment(register: u8) -> u8 {
    register.wrapping_add(1) & REGISTER_MASK
}

/// Subtracts one from a register value, wrapping 0 to 15.
#[must_use]
pub const fn wrapping_decrement(register: u8) -> u8 {
    register.wrapping_sub(1) & REGISTER_MASK
}

/// Encodes a sequence of register values against a single running register.
#[derive(Debug)]
pub struct SymbolEncoder {
    writer: BitWriter,
    previous: u8,
}

impl SymbolEncoder {
    /// Creates an encoder sized for `samples` worst-case symbols.
    #[must_use]
    pub fn with_capacity(samples: usize) -> Self {
        Self {
            writer: BitWriter::with_capacity_bits(samples.saturating_mul(MAX_SYMBOL_BITS)),
            previous: 0,
        }
    }

    /// Encodes one register value and returns the symbol used.
    pub fn push(&mut self, register: u8) -> Symbol {
        encode_into(&mut self.writer, &mut self.previous, register)
    }

    /// Returns the number of bits written so far.
    #[must_use]
    pub fn bits_written(&self) -> usize {
        self.writer.bits_written()
    }

    /// Pads the final byte and returns the payload.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.writer.finish()
    }
}

/// Encodes one register value against an external register table entry.
pub(crate) fn encode_into(writer: &mut BitWriter, previous: &mut u8, register: u8) -> Symbol {
    let symbol = Symbol::classify(*previous, register);
    symbol.write(writer);
    *previous = symbol.apply(*previous);
    symbol
}
