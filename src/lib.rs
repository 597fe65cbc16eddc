//! `sparsepack` - Bit-packed value streams for compact debug metadata
//!
//! Per-scope debugging metadata attached to generated code is mostly small
//! integers, zeros, and floats with long runs of trailing zero bits. Writing it
//! with a fixed-width or byte-aligned encoding wastes most of every byte. This
//! crate packs such values into a bit stream where a zero costs one bit.
//!
//! # Features
//! - **Sparse codec**: zero in 1 bit, other 32-bit values in 8 bits per
//!   significant 6-bit group, packed with no alignment between values
//! - **Dense codec**: byte-aligned LEB128 sibling behind the same traits
//! - **Shared layering**: signed, float, double, long, bool and byte encodings
//!   written once on top of the integer primitive
//! - **Scopes**: flush-and-measure with [`ValueWriteStream::position`], discard
//!   with [`ValueWriteStream::roll_back`]
//!
//! # Example
//! ```
//! use sparsepack::{SparseReadStream, SparseWriteStream, ValueReadStream, ValueWriteStream};
//!
//! let mut out = SparseWriteStream::new();
//! out.write_int(0);
//! out.write_int(1);
//! out.write_signed_int(-3);
//! out.write_double(2.5);
//! out.write_long(-1);
//! let len = out.position();
//!
//! let bytes = out.buffer();
//! assert_eq!(bytes.len(), len);
//!
//! let mut input = SparseReadStream::new(bytes, 0);
//! assert_eq!(input.read_int(), 0);
//! assert_eq!(input.read_int(), 1);
//! assert_eq!(input.read_signed_int(), -3);
//! assert_eq!(input.read_double(), 2.5);
//! assert_eq!(input.read_long(), -1);
//! ```
//!
//! # Wire Format
//!
//! There is no header or length prefix. The producer and the consumer agree on
//! the sequence of value types, and the consumer knows where the stream ends.
//!
//! ## Sparse integers
//!
//! | Value | Encoding | Bits |
//! |-------|----------|------|
//! | 0 | `0` | 1 |
//! | 1..=63 | `10dddddd` | 8 |
//! | 64..=4095 | `11dddddd 10dddddd` | 16 |
//! | ... | one `11` token per extra 6-bit group | 8 each |
//! | 2^30..=2^32-1 | `11` x5, `10` x1 | 48 |
//!
//! Bits are written MSB first. Each 8-bit token starts wherever the previous
//! value ended, so a token usually spans two bytes. A flush pads the last
//! partial byte with zero bits.
//!
//! ## Derived types
//!
//! | Type | Encoded as |
//! |------|------------|
//! | signed int | zigzag fold, then one int |
//! | float | IEEE bits, bit-reversed, one int |
//! | double | high half reversed, then low half reversed, two ints |
//! | long | low half, then high half, each as a signed int |
//! | bool, byte | their integer value as one int |
//!
//! # Concurrency
//!
//! Write streams own their buffer and bit cursor and are used from one thread.
//! Read streams only borrow a finished buffer, so any number of them can
//! decode the same bytes in parallel, each with its own cursor.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod buffer;
pub mod constants;
mod dense;
mod error;
pub mod logging;
mod sparse;
mod stream;
mod value;


// Re-export public API
pub use buffer::WriteBuffer;
pub use dense::{DenseReadStream, DenseWriteStream};
pub use error::ParseError;
pub use sparse::{SparseReadStream, SparseWriteStream};
pub use stream::{ValueReadStream, ValueWriteStream};
pub use value::{Schema, StreamValue, Value, ValueKind};

/// Integer strategy selector for tools that choose a codec at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    #[default]
    Sparse,
    Dense,
}

impl Codec {
    /// Fresh write stream for this strategy.
    #[must_use]
    pub fn writer(self) -> Box<dyn ValueWriteStream> {
        match self {
            Self::Sparse => Box::new(SparseWriteStream::new()),
            Self::Dense => Box::new(DenseWriteStream::new()),
        }
    }

    /// Read stream for this strategy over `buf`, starting at byte `position`.
    #[must_use]
    pub fn reader(self, buf: &[u8], position: usize) -> Box<dyn ValueReadStream + '_> {
        match self {
            Self::Sparse => Box::new(SparseReadStream::new(buf, position)),
            Self::Dense => Box::new(DenseReadStream::new(buf, position)),
        }
    }

    /// The other strategy.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Sparse => Self::Dense,
            Self::Dense => Self::Sparse,
        }
    }
}
