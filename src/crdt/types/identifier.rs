//! Variable-depth identifier for items of a replicated sequence.
//!
//! This module contains the Identifier struct, whose total order decides where
//! an item sits in the sequence on every replica.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::crdt::types::segment::{Segment, max_segment};

/// An ordered sequence of segments identifying a position in the sequence.
///
/// The length of the sequence is its depth. A shorter identifier is
/// conceptually followed by infinite zeros, so `[1]`, `[1, 0]` and `[1, 0, 0]`
/// all name the same position and compare equal.
///
/// # Ordering
///
/// Identifiers are compared segment by segment from the left after padding the
/// shorter one with zeros. For well-formed identifiers this is the same as
/// comparing their mixed-radix values.
///
/// # Serialization
///
/// Identifiers serialize as a bare array of non-negative integers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(Vec<Segment>);

impl Identifier {
    /// Creates an identifier from its segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Identifier(segments)
    }

    /// The lowest sentinel, `[0]`.
    pub fn begin() -> Self {
        Identifier(vec![0])
    }

    /// The highest sentinel for `base`, `[2^base]`.
    ///
    /// Returns `None` when `2^base` does not fit in a segment.
    pub fn end(base: u32) -> Option<Self> {
        max_segment(base, 0).map(|max| Identifier(vec![max]))
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Borrows the segments.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Consumes the identifier, returning its segments.
    pub fn into_segments(self) -> Vec<Segment> {
        self.0
    }

    /// Segment at `level`, or zero past the end.
    pub fn segment(&self, level: usize) -> Segment {
        self.0.get(level).copied().unwrap_or(0)
    }

    /// Returns true if every segment lies within its level's range for `base`.
    pub fn is_well_formed(&self, base: u32) -> bool {
        self.0
            .iter()
            .enumerate()
            .all(|(level, &segment)| max_segment(base, level).is_some_and(|max| segment <= max))
    }

    /// Segments with trailing zeros removed.
    fn significant(&self) -> &[Segment] {
        let len = self
            .0
            .iter()
            .rposition(|&segment| segment != 0)
            .map_or(0, |last| last + 1);
        &self.0[..len]
    }
}

/// Compares two identifiers by the sequence's total order.
pub fn compare(a: &Identifier, b: &Identifier) -> Ordering {
    let depth = a.depth().max(b.depth());
    (0..depth)
        .map(|level| a.segment(level).cmp(&b.segment(level)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other).is_eq()
    }
}

impl Eq for Identifier {}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with Eq, which ignores trailing zeros
        self.significant().hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<Segment>> for Identifier {
    fn from(segments: Vec<Segment>) -> Self {
        Identifier(segments)
    }
}

impl From<&[Segment]> for Identifier {
    fn from(segments: &[Segment]) -> Self {
        Identifier(segments.to_vec())
    }
}

impl From<Identifier> for Vec<Segment> {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl FromIterator<Segment> for Identifier {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Identifier(iter.into_iter().collect())
    }
}
