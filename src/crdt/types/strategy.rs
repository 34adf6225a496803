//! Placement strategies for the allocator.

use std::fmt;

/// Where a fresh segment is placed within the available interval.
///
/// The allocator picks one strategy per depth the first time it works at that
/// depth and keeps it for the rest of its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// New segments lean toward the left neighbour (ascending).
    BoundaryPlus,
    /// New segments lean toward the right neighbour (descending).
    BoundaryMinus,
}

impl From<bool> for Strategy {
    fn from(coin: bool) -> Self {
        if coin {
            Strategy::BoundaryPlus
        } else {
            Strategy::BoundaryMinus
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BoundaryPlus => write!(f, "boundary+"),
            Strategy::BoundaryMinus => write!(f, "boundary-"),
        }
    }
}
