//! Bit packing primitives for the fpmedia codec.
//!
//! This crate provides [`BitWriter`] and [`BitReader`] for bit-level packing
//! and unpacking of symbol streams.
//!
//! # Bit order
//!
//! Bits fill each byte from the least-significant position upward: the first
//! bit of the stream is bit 0 of byte 0, the ninth is bit 0 of byte 1. Multi-bit
//! values written with [`BitWriter::write_bits`] enter the stream
//! most-significant bit first. The final byte is zero-padded.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads/writes are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about samples, symbols, or containers.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bit(true);
//! writer.write_bits(0b1000, 4).unwrap();
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b0000_0011]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(reader.read_bit().unwrap());
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1000);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{BitError, BitResult};
pub use reader::{unpack_bits, BitReader};
pub use writer::BitWriter;
