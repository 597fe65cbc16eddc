//! Strategy traits for value streams.
//!
//! A strategy only supplies the unsigned 32-bit primitive (`write_int` /
//! `read_int`) plus cursor management. Signed ints, floats, doubles, longs,
//! booleans and bytes are layered on top here, once, and inherited by every
//! strategy.
//!
//! Floats are bit-reversed before encoding. IEEE values that are integers or
//! short binary fractions end in long runs of zero mantissa bits; reversal
//! turns those into leading zeros, which cost nothing in either integer codec.
//! Doubles are reversed per 32-bit half. Longs are split into halves and
//! sign-folded without reversal.

use crate::constants::{fold_sign, join_halves, split_halves, unfold_sign};
use crate::value::StreamValue;

/// Encoder side of a value stream.
pub trait ValueWriteStream {
    /// Append an unsigned 32-bit value.
    fn write_int(&mut self, value: u32);

    /// Flush any partial byte (zero-padded) and return the committed length.
    ///
    /// Calling it again without writing in between returns the same length
    /// and leaves the buffer untouched.
    fn position(&mut self) -> usize;

    /// Discard everything from byte `pos` on, including unflushed bits.
    fn roll_back(&mut self, pos: usize);

    /// Committed bytes. Bits not yet flushed by [`position`](Self::position)
    /// are not included.
    fn buffer(&self) -> &[u8];

    /// Flush and return the start offset of the scope about to be written.
    #[inline]
    fn start_scope(&mut self) -> usize {
        self.position()
    }

    /// Pad to the next byte boundary.
    #[inline]
    fn align(&mut self) {
        self.position();
    }

    #[inline]
    fn write_signed_int(&mut self, value: i32) {
        self.write_int(fold_sign(value));
    }

    #[inline]
    fn write_float(&mut self, value: f32) {
        self.write_int(value.to_bits().reverse_bits());
    }

    #[inline]
    fn write_double(&mut self, value: f64) {
        let (high, low) = split_halves(value.to_bits());
        self.write_int(high.reverse_bits());
        self.write_int(low.reverse_bits());
    }

    #[inline]
    fn write_long(&mut self, value: i64) {
        let (high, low) = split_halves(value as u64);
        self.write_signed_int(low as i32);
        self.write_signed_int(high as i32);
    }

    #[inline]
    fn write_bool(&mut self, value: bool) {
        self.write_int(u32::from(value));
    }

    /// Bytes are carried as their 8-bit pattern, so at most two tokens.
    #[inline]
    fn write_byte(&mut self, value: i8) {
        self.write_int(u32::from(value as u8));
    }

    /// Append any supported value type.
    #[inline]
    fn write<T: StreamValue>(&mut self, value: T)
    where
        Self: Sized,
    {
        value.write_to(self);
    }
}

/// Decoder side of a value stream.
///
/// Readers trust the caller to stop after as many reads as there were writes.
/// Reading further yields unspecified values but never panics.
pub trait ValueReadStream {
    /// Decode the next unsigned 32-bit value.
    fn read_int(&mut self) -> u32;

    /// Current byte offset into the underlying slice.
    fn position(&self) -> usize;

    /// Jump to an absolute byte offset, at bit 0 of that byte.
    fn set_position(&mut self, pos: usize);

    #[inline]
    fn read_signed_int(&mut self) -> i32 {
        unfold_sign(self.read_int())
    }

    #[inline]
    fn read_float(&mut self) -> f32 {
        f32::from_bits(self.read_int().reverse_bits())
    }

    #[inline]
    fn read_double(&mut self) -> f64 {
        let high = self.read_int().reverse_bits();
        let low = self.read_int().reverse_bits();
        f64::from_bits(join_halves(high, low))
    }

    #[inline]
    fn read_long(&mut self) -> i64 {
        let low = self.read_signed_int() as u32;
        let high = self.read_signed_int() as u32;
        join_halves(high, low) as i64
    }

    #[inline]
    fn read_bool(&mut self) -> bool {
        self.read_int() != 0
    }

    #[inline]
    fn read_byte(&mut self) -> i8 {
        self.read_int() as i8
    }

    /// Decode any supported value type.
    #[inline]
    fn read<T: StreamValue>(&mut self) -> T
    where
        Self: Sized,
    {
        T::read_from(self)
    }
}
