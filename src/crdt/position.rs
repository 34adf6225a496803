//! Position arithmetic over identifier prefixes.
//!
//! These functions project identifier prefixes into numbers so the allocator
//! can measure how much room lies between two neighbours at a given depth.
//! All of them are pure and never mutate their inputs.

use crate::crdt::types::{Identifier, Segment, level_radix};

/// Returns the first `depth` segments of `id`, zero-padded on the right when
/// `id` is shorter than `depth`.
pub fn prefix(id: &Identifier, depth: usize) -> Identifier {
    (0..depth).map(|level| id.segment(level)).collect()
}

/// Flat projection of the prefix of `id` at `depth`:
/// `Σ id[i] · 2^(base + i)` for `i < depth - 1`, plus `id[depth - 1]`.
///
/// Missing segments count as zero. The sum saturates at `u128::MAX`.
///
/// This projection weighs each level independently and is only monotone over
/// the first two levels; use [`get_interval`] to measure room between prefixes.
pub fn get_position(id: &Identifier, depth: usize, base: u32) -> u128 {
    let Some(last) = depth.checked_sub(1) else {
        return 0;
    };

    let higher = (0..last).fold(0u128, |position, level| {
        let weight = u32::try_from(level)
            .ok()
            .and_then(|level| level.checked_add(base))
            .and_then(|exponent| 1u128.checked_shl(exponent))
            .unwrap_or(u128::MAX);
        position.saturating_add(u128::from(id.segment(level)).saturating_mul(weight))
    });

    higher.saturating_add(u128::from(id.segment(last)))
}

/// Room between two prefixes at `depth`.
///
/// This is the mixed-radix distance `right - left`, where level `p` counts
/// `2^(base + p) + 1` values. It is positive exactly when `right` sorts after
/// `left` at this depth, and saturates instead of overflowing.
///
/// # Arguments
///
/// * `depth` - Number of leading segments to compare
/// * `left` - The lower prefix
/// * `right` - The upper prefix
/// * `base` - The allocator's base
pub fn get_interval(depth: usize, left: &Identifier, right: &Identifier, base: u32) -> i128 {
    (0..depth).fold(0i128, |interval, level| {
        let radix = level_radix(base, level)
            .and_then(|radix| i128::try_from(radix).ok())
            .unwrap_or(i128::MAX);
        let gap = signed(right.segment(level)) - signed(left.segment(level));
        interval.saturating_mul(radix).saturating_add(gap)
    })
}

fn signed(segment: Segment) -> i128 {
    i128::from(segment)
}
