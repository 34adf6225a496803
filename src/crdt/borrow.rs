//! Mixed-radix borrow and carry over identifier segments.
//!
//! An identifier is treated as a number whose digit at level `p` runs from 0
//! to `2^(base + p)`. Decrementing or incrementing it therefore propagates a
//! borrow or carry toward the shallower levels, each with its own width.

use tracing::trace;

use crate::crdt::types::{Segment, level_radix};

/// Decrements `id` at `position`, borrowing from shallower segments.
///
/// A non-zero segment at `position` is simply decremented by one. A zero
/// segment is set to its level maximum minus `shortfall`, which takes
/// `shortfall + 1` from that level; whatever the level cannot cover is
/// borrowed from the one above, as many units as needed. If the borrow runs
/// past the first segment it is dropped.
///
/// # Arguments
///
/// * `id` - Segments to update in place
/// * `position` - Level the decrement starts at
/// * `shortfall` - Extra amount taken from the zero segment at `position`
/// * `base` - The allocator's base
pub fn subtract_id(id: &mut [Segment], position: usize, shortfall: Segment, base: u32) {
    if id.is_empty() {
        return;
    }
    let start = position.min(id.len() - 1);
    if id[start] != 0 {
        id[start] -= 1;
        return;
    }

    // Amount still to take at the current level
    let mut owed = u128::from(shortfall) + 1;
    for level in (0..=start).rev() {
        let segment = u128::from(id[level]);
        if segment >= owed {
            id[level] = Segment::try_from(segment - owed).unwrap_or(Segment::MAX);
            return;
        }
        let radix = level_radix(base, level).unwrap_or(u128::from(Segment::MAX) + 1);
        let borrowed = (owed - segment).div_ceil(radix);
        // Below radix, so it fits a Segment
        id[level] = Segment::try_from(borrowed * radix + segment - owed).unwrap_or(Segment::MAX);
        trace!(level, segment = id[level], borrowed, "borrowing from shallower level");
        owed = borrowed;
    }
    trace!("borrow ran past the first segment");
}

/// Adds `amount` to `id` at `position`, carrying into shallower segments when
/// a segment exceeds its level maximum.
///
/// If the carry runs past the first segment it is dropped.
pub fn carry_id(id: &mut [Segment], position: usize, amount: Segment, base: u32) {
    if id.is_empty() {
        return;
    }
    let mut carry = u128::from(amount);
    for level in (0..=position.min(id.len() - 1)).rev() {
        if carry == 0 {
            return;
        }
        let sum = u128::from(id[level]) + carry;
        match level_radix(base, level) {
            Some(radix) => {
                // sum % radix is at most the level maximum, which fits a Segment
                id[level] = Segment::try_from(sum % radix).unwrap_or(Segment::MAX);
                carry = sum / radix;
            }
            None => {
                id[level] = Segment::try_from(sum).unwrap_or(Segment::MAX);
                carry = 0;
            }
        }
        if carry > 0 {
            trace!(level, segment = id[level], "carrying into shallower level");
        }
    }
    if carry > 0 {
        trace!("carry ran past the first segment");
    }
}
