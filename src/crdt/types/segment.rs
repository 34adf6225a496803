//! Segment type and per-level range helpers.
//!
//! An identifier is a sequence of segments. Level `p` (0-indexed from the
//! left) holds values in `0..=2^(base + p)`, so every level is twice as wide
//! as the one above it.

/// One integer element of an [`Identifier`](super::Identifier).
pub type Segment = u64;

/// Largest value a segment may hold at `level`: `2^(base + level)`.
///
/// Returns `None` when the value does not fit in a [`Segment`].
pub fn max_segment(base: u32, level: usize) -> Option<Segment> {
    let exponent = u32::try_from(level).ok()?.checked_add(base)?;
    1u64.checked_shl(exponent)
}

/// Number of distinct values a segment may hold at `level`: `2^(base + level) + 1`.
pub fn level_radix(base: u32, level: usize) -> Option<u128> {
    max_segment(base, level).map(|max| u128::from(max) + 1)
}
