//! Format constants and small helpers shared by both stream strategies.

/// Longest sparse encoding of a 32-bit value, in tokens (bytes).
///
/// A value with all 32 bits significant needs six 6-bit groups.
pub const MAX_SPARSE_LEN: usize = 6;

/// Longest dense (LEB128) encoding of a 32-bit value, in bytes.
pub const MAX_DENSE_LEN: usize = 5;

/// Longest encoding of a single value under either strategy.
pub const MAX_ENCODED_LEN: usize = if MAX_SPARSE_LEN > MAX_DENSE_LEN {
    MAX_SPARSE_LEN
} else {
    MAX_DENSE_LEN
};

/// Smallest capacity a write buffer grows to, so two maximal values always fit.
pub const MIN_GROWTH: usize = 2 * MAX_ENCODED_LEN;

/// Capacity multiplier applied when a write buffer runs out of room.
pub const GROWTH_FACTOR: usize = 2;

/// Capacity used by `new()` constructors.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Mask selecting the two tag bits of a sparse token.
pub(crate) const TAG_MASK: u8 = 0xC0;

/// Tag `11`: more tokens follow.
pub(crate) const TAG_CONTINUATION: u8 = 0xC0;

/// Tag `10`: last token of a value.
pub(crate) const TAG_TERMINAL: u8 = 0x80;

/// Mask selecting the six data bits of a sparse token.
pub(crate) const DATA_MASK: u32 = 0x3F;

/// Data bits carried per sparse token.
pub(crate) const DATA_BITS: u32 = 6;

/// Fold a signed value so small magnitudes of either sign stay small.
///
/// Maps 0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, ...
#[inline]
#[must_use]
pub const fn fold_sign(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Inverse of [`fold_sign`].
#[inline]
#[must_use]
pub const fn unfold_sign(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Split a 64-bit pattern into `(high, low)` 32-bit halves.
#[inline]
pub(crate) const fn split_halves(bits: u64) -> (u32, u32) {
    ((bits >> 32) as u32, bits as u32)
}

/// Join `(high, low)` 32-bit halves into a 64-bit pattern.
#[inline]
pub(crate) const fn join_halves(high: u32, low: u32) -> u64 {
    ((high as u64) << 32) | low as u64
}

/// Number of bits the sparse codec spends on `value`.
///
/// Zero costs one flag bit; anything else costs one 8-bit token per
/// significant 6-bit group.
#[inline]
#[must_use]
pub const fn sparse_bit_len(value: u32) -> u32 {
    if value == 0 {
        return 1;
    }
    let significant = u32::BITS - value.leading_zeros();
    significant.div_ceil(DATA_BITS) * 8
}

/// Number of bytes the dense codec spends on `value`.
#[inline]
#[must_use]
pub const fn dense_byte_len(value: u32) -> usize {
    if value < 1 << 7 {
        1
    } else if value < 1 << 14 {
        2
    } else if value < 1 << 21 {
        3
    } else if value < 1 << 28 {
        4
    } else {
        5
    }
}
