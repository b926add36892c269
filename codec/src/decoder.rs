//! Delta decoder state machine.

use bitstream::{BitReader, BitResult};

use crate::symbol::{wrapping_decrement, wrapping_increment, LITERAL_BITS};
use crate::types::REGISTER_MASK;

/// Position inside the symbol prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeState {
    /// Between symbols: a `0` repeats, a `1` starts a longer symbol.
    #[default]
    Idle,
    /// After `1`: a `0` increments.
    Increment,
    /// After `11`: a `0` decrements, a `1` escapes to a literal.
    Decrement,
}

/// Outcome of feeding one bit to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: DecodeState,
    /// Register value completed by this bit, if any.
    pub emitted: Option<u8>,
    /// Number of literal bits the driver must read next.
    pub literal_bits: usize,
}

impl Step {
    const fn advance(next: DecodeState) -> Self {
        Self {
            next,
            emitted: None,
            literal_bits: 0,
        }
    }

    const fn emit(value: u8) -> Self {
        Self {
            next: DecodeState::Idle,
            emitted: Some(value),
            literal_bits: 0,
        }
    }
}

/// Feeds one bit to the state machine.
///
/// `previous` is the register value the pending symbol is relative to.
#[must_use]
pub const fn transition(state: DecodeState, bit: bool, previous: u8) -> Step {
    match (state, bit) {
        (DecodeState::Idle, false) => Step::emit(previous & REGISTER_MASK),
        (DecodeState::Idle, true) => Step::advance(DecodeState::Increment),
        (DecodeState::Increment, false) => Step::emit(wrapping_increment(previous)),
        (DecodeState::Increment, true) => Step::advance(DecodeState::Decrement),
        (DecodeState::Decrement, false) => Step::emit(wrapping_decrement(previous)),
        (DecodeState::Decrement, true) => Step {
            next: DecodeState::Idle,
            emitted: None,
            literal_bits: LITERAL_BITS,
        },
    }
}

/// Pulls whole symbols out of a packed payload.
#[derive(Debug, Clone)]
pub struct SymbolDecoder<'a> {
    reader: BitReader<'a>,
    state: DecodeState,
}

impl<'a> SymbolDecoder<'a> {
    #[must_use]
    pub const fn new(payload: &'a [u8]) -> Self {
        Self {
            reader: BitReader::new(payload),
            state: DecodeState::Idle,
        }
    }

    /// Decodes the next symbol relative to `previous` and returns the new register value.
    ///
    /// Fails with [`bitstream::BitError::UnexpectedEof`] if the payload ends
    /// mid-symbol or before one starts.
    pub fn next_register(&mut self, previous: u8) -> BitResult<u8> {
        loop {
            let bit = self.reader.read_bit()?;
            let step = transition(self.state, bit, previous);
            self.state = step.next;
            if let Some(value) = step.emitted {
                return Ok(value);
            }
            if step.literal_bits > 0 {
                let literal = self.reader.read_bits(step.literal_bits)?;
                return Ok(literal.to_le_bytes()[0] & REGISTER_MASK);
            }
        }
    }

    /// Returns the number of unread bits.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.reader.bits_remaining()
    }

    /// Returns `true` if what is left can only be byte padding.
    #[must_use]
    pub fn at_padding(&self) -> bool {
        self.state == DecodeState::Idle
            && self.reader.bits_remaining() < 8
            && self.reader.remaining_bits_are_zero()
    }
}
