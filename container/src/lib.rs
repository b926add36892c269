//! Container layout for the fpmedia codec.
//!
//! This crate multiplexes an audio payload and a video payload behind a small
//! fixed header. It knows nothing about samples or symbols: payloads are opaque
//! byte slices.
//!
//! # Layout
//!
//! | Field          | Size | Notes                                  |
//! |----------------|------|----------------------------------------|
//! | start marker   | 1    | `'A'` (0x41)                           |
//! | width, height  | 1+1  | only in [`HeaderLayout::WithGeometry`] |
//! | audio length   | 4    | little-endian `u32`                    |
//! | video length   | 4    | little-endian `u32`                    |
//! | end marker     | 1    | `'Z'` (0x5A)                           |
//! | audio payload  | n    |                                        |
//! | video payload  | m    |                                        |
//!
//! # Design Principles
//!
//! - **Bit-exact format** - Byte layout is fixed and shared with hardware readers.
//! - **Bounded decoding** - Declared lengths are validated against limits and input size before slicing.
//! - **Zero-copy** - Decoded payloads borrow from the input.

mod error;
mod header;
mod limits;
mod mux;

pub use error::{ContainerResult, DecodeError, EncodeError, LimitKind, Marker};
pub use header::{
    ContainerHeader, FrameGeometry, HeaderLayout, COMPACT_HEADER_SIZE, GEOMETRY_HEADER_SIZE,
    MARKER_END, MARKER_START,
};
pub use limits::Limits;
pub use mux::{decode_container, decode_header, encode_container, encode_header, Container};
