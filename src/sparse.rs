//! Sparse bit-packed integer strategy.
//!
//! | Value | Encoding | Bits |
//! |-------|----------|------|
//! | 0 | `0` | 1 |
//! | non-zero | `11dddddd`* `10dddddd` | 8 per significant 6-bit group |
//!
//! Groups go most significant first and leading all-zero groups are skipped.
//! Tokens are written at whatever bit offset the stream is at, so they
//! straddle byte boundaries freely; only [`SparseWriteStream::position`]
//! pads to the next byte.

use crate::buffer::WriteBuffer;
use crate::constants::{
    DATA_BITS, DATA_MASK, DEFAULT_INITIAL_CAPACITY, MAX_SPARSE_LEN, TAG_CONTINUATION, TAG_MASK,
    TAG_TERMINAL,
};
use crate::stream::{ValueReadStream, ValueWriteStream};

/// Bits accumulated on the write side but not yet committed to the buffer.
///
/// The `byte_pos` low bits of `curr_byte` are pending, oldest first; the rest
/// are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct BitCursor {
    curr_byte: u8,
    byte_pos: u8,
}

/// Sparse encoder over an owned, growing buffer.
#[derive(Debug, Clone)]
pub struct SparseWriteStream {
    buf: WriteBuffer,
    cursor: BitCursor,
}

impl SparseWriteStream {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: WriteBuffer::with_capacity(capacity),
            cursor: BitCursor::default(),
        }
    }

    /// Allocated size of the underlying buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Flush and take the encoded bytes.
    #[must_use]
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.flush();
        self.buf.into_vec()
    }

    /// Append a single `0` bit.
    #[inline]
    fn write_zero(&mut self) {
        let c = &mut self.cursor;
        c.curr_byte <<= 1;
        c.byte_pos += 1;
        if c.byte_pos == 8 {
            self.buf.write(c.curr_byte);
            *c = BitCursor::default();
        }
    }

    /// Append an 8-bit token after the pending bits.
    ///
    /// The pending bits and the token's high bits complete one byte; the
    /// token's low `byte_pos` bits become the new pending bits.
    #[inline]
    fn write_token(&mut self, token: u8) {
        let pending = u32::from(self.cursor.curr_byte);
        let p = u32::from(self.cursor.byte_pos);
        let t = u32::from(token);
        // u32 shifts: with p == 0 both the pending byte and the kept bits vanish.
        self.buf.write(((pending << (8 - p)) | (t >> p)) as u8);
        self.cursor.curr_byte = ((0xFF_u32 >> (8 - p)) & t) as u8;
    }

    /// Commit the partial byte, zero-padded on the right.
    fn flush(&mut self) {
        let c = self.cursor;
        if c.byte_pos == 0 {
            return;
        }
        tracing::trace!(pending_bits = c.byte_pos, at = self.buf.position(), "flushing partial byte");
        self.buf.write(c.curr_byte << (8 - c.byte_pos));
        self.cursor = BitCursor::default();
    }
}

impl Default for SparseWriteStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueWriteStream for SparseWriteStream {
    fn write_int(&mut self, value: u32) {
        if value == 0 {
            self.write_zero();
            return;
        }
        for i in (1..MAX_SPARSE_LEN as u32).rev() {
            let high = value >> (DATA_BITS * i);
            if high != 0 {
                self.write_token(TAG_CONTINUATION | (high & DATA_MASK) as u8);
            }
        }
        self.write_token(TAG_TERMINAL | (value & DATA_MASK) as u8);
    }

    fn position(&mut self) -> usize {
        self.flush();
        self.buf.position()
    }

    fn roll_back(&mut self, pos: usize) {
        tracing::trace!(from = self.buf.position(), to = pos, "rolling back scope");
        self.cursor = BitCursor::default();
        self.buf.set_position(pos);
    }

    fn buffer(&self) -> &[u8] {
        self.buf.as_bytes()
    }
}

/// Sparse decoder over a borrowed byte slice.
///
/// Bytes past the end of the slice read as zero.
#[derive(Debug, Clone)]
pub struct SparseReadStream<'a> {
    buf: &'a [u8],
    position: usize,
    bit_pos: u32,
}

impl<'a> SparseReadStream<'a> {
    /// Start decoding at byte `position` of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8], position: usize) -> Self {
        Self {
            buf,
            position,
            bit_pos: 0,
        }
    }

    /// Bit offset within the byte at [`position`](ValueReadStream::position).
    #[must_use]
    pub fn bit_position(&self) -> u32 {
        self.bit_pos
    }

    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.buf.get(index).copied().unwrap_or(0)
    }

    /// Consume the next bit if it is a zero flag.
    #[inline]
    fn read_zero(&mut self) -> bool {
        if self.byte_at(self.position) & (0x80 >> self.bit_pos) != 0 {
            return false;
        }
        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.position += 1;
            self.bit_pos = 0;
        }
        true
    }

    /// Read the 8 bits starting at the cursor.
    #[inline]
    fn read_token(&mut self) -> u8 {
        let first = self.byte_at(self.position);
        self.position += 1;
        if self.bit_pos == 0 {
            return first;
        }
        let second = self.byte_at(self.position);
        (first << self.bit_pos) | (second >> (8 - self.bit_pos))
    }
}

impl ValueReadStream for SparseReadStream<'_> {
    fn read_int(&mut self) -> u32 {
        if self.read_zero() {
            return 0;
        }
        let mut result = 0u32;
        for _ in 0..MAX_SPARSE_LEN {
            let token = self.read_token();
            result = (result << DATA_BITS) | (u32::from(token) & DATA_MASK);
            // Well-formed input ends on TAG_TERMINAL; any other tag also stops.
            if token & TAG_MASK != TAG_CONTINUATION {
                break;
            }
        }
        result
    }

    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, pos: usize) {
        self.position = pos;
        self.bit_pos = 0;
    }
}
