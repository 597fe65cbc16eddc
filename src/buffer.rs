//! Growable byte buffer backing every write stream.

use crate::constants::{GROWTH_FACTOR, MIN_GROWTH};

/// Owned byte buffer with a logical length below its allocated size.
///
/// The whole allocation is kept zero-initialised in a `Vec<u8>` whose `len()`
/// is the capacity; `position` is the number of committed bytes. Moving the
/// position backwards never releases memory, so a scope can be encoded,
/// measured, discarded and encoded again without reallocating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteBuffer {
    buf: Vec<u8>,
    position: usize,
}

impl WriteBuffer {
    /// Create a buffer with `capacity` bytes allocated and nothing committed.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity],
            position: 0,
        }
    }

    /// Append one byte, growing the allocation if it is full.
    #[inline]
    pub fn write(&mut self, byte: u8) {
        if self.position == self.buf.len() {
            self.grow(self.position + 1);
        }
        self.buf[self.position] = byte;
        self.position += 1;
    }

    /// Committed length in bytes.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the logical end to `pos`.
    ///
    /// Bytes at and after `pos` stay allocated and become overwritable. A
    /// position past the current capacity grows the allocation so the next
    /// write lands exactly at `pos`.
    pub fn set_position(&mut self, pos: usize) {
        if pos > self.buf.len() {
            self.grow(pos);
        }
        self.position = pos;
    }

    /// Allocated size in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Committed bytes `[0, position)`.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.position]
    }

    /// Take the committed bytes, dropping the unused tail of the allocation.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.position);
        self.buf
    }

    /// Grow geometrically until at least `required` bytes are allocated.
    #[cold]
    #[inline(never)]
    fn grow(&mut self, required: usize) {
        let old = self.buf.len();
        let mut new = old.saturating_mul(GROWTH_FACTOR).max(MIN_GROWTH);
        while new < required {
            new = new.saturating_mul(GROWTH_FACTOR);
        }
        tracing::trace!(old, new, position = self.position, "growing write buffer");
        self.buf.resize(new, 0);
    }
}

impl Default for WriteBuffer {
    fn default() -> Self {
        Self::with_capacity(crate::constants::DEFAULT_INITIAL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_from_empty_uses_floor() {
        let mut buf = WriteBuffer::with_capacity(0);
        buf.write(7);
        assert_eq!(buf.capacity(), MIN_GROWTH);
        assert_eq!(buf.as_bytes(), &[7]);
    }

    #[test]
    fn test_grow_doubles_and_preserves_bytes() {
        let mut buf = WriteBuffer::with_capacity(100);
        for i in 0..101u32 {
            buf.write(i as u8);
        }
        assert_eq!(buf.capacity(), 200);
        assert_eq!(buf.position(), 101);
        assert!(buf.as_bytes().iter().enumerate().all(|(i, &b)| b == i as u8));
    }

    #[test]
    fn test_set_position_keeps_capacity() {
        let mut buf = WriteBuffer::with_capacity(16);
        for b in [1, 2, 3, 4] {
            buf.write(b);
        }
        buf.set_position(1);
        assert_eq!(buf.capacity(), 16);
        buf.write(9);
        assert_eq!(buf.as_bytes(), &[1, 9]);
    }

    #[test]
    fn test_set_position_past_capacity_grows() {
        let mut buf = WriteBuffer::with_capacity(4);
        buf.set_position(30);
        assert!(buf.capacity() >= 30);
        buf.write(0xAA);
        assert_eq!(buf.position(), 31);
        assert_eq!(buf.as_bytes()[30], 0xAA);
    }

    #[test]
    fn test_into_vec_truncates() {
        let mut buf = WriteBuffer::with_capacity(32);
        buf.write(1);
        buf.write(2);
        assert_eq!(buf.into_vec(), vec![1, 2]);
    }
}
