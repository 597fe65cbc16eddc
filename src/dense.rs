//! Dense byte-aligned integer strategy.
//!
//! Every value occupies whole bytes: unsigned LEB128, seven data bits per byte
//! starting with the least significant group, high bit set on every byte but
//! the last. Zero costs a full byte, so this strategy suits streams without
//! long zero runs.

use crate::buffer::WriteBuffer;
use crate::constants::{DEFAULT_INITIAL_CAPACITY, MAX_DENSE_LEN};
use crate::stream::{ValueReadStream, ValueWriteStream};

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7F;

/// Dense encoder over an owned, growing buffer.
#[derive(Debug, Clone)]
pub struct DenseWriteStream {
    buf: WriteBuffer,
}

impl DenseWriteStream {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: WriteBuffer::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into_vec()
    }
}

impl Default for DenseWriteStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueWriteStream for DenseWriteStream {
    fn write_int(&mut self, mut value: u32) {
        loop {
            let byte = (value as u8) & PAYLOAD_MASK;
            value >>= 7;
            if value == 0 {
                self.buf.write(byte);
                return;
            }
            self.buf.write(byte | CONTINUATION);
        }
    }

    /// Dense values are always byte-aligned; nothing to flush.
    fn position(&mut self) -> usize {
        self.buf.position()
    }

    fn roll_back(&mut self, pos: usize) {
        tracing::trace!(from = self.buf.position(), to = pos, "rolling back scope");
        self.buf.set_position(pos);
    }

    fn buffer(&self) -> &[u8] {
        self.buf.as_bytes()
    }
}

/// Dense decoder over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct DenseReadStream<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> DenseReadStream<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8], position: usize) -> Self {
        Self { buf, position }
    }
}

impl ValueReadStream for DenseReadStream<'_> {
    fn read_int(&mut self) -> u32 {
        let mut result = 0u32;
        for i in 0..MAX_DENSE_LEN {
            let byte = self.buf.get(self.position).copied().unwrap_or(0);
            self.position += 1;
            result |= u32::from(byte & PAYLOAD_MASK) << (7 * i);
            if byte & CONTINUATION == 0 {
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
    }
}
