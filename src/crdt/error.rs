//! Error types for allocation and configuration.

use thiserror::Error;

/// Errors raised by [`Allocator::alloc`](crate::Allocator::alloc).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocError {
    /// No depth up to the configured ceiling leaves room between the operands.
    ///
    /// Also reached in release builds when the left operand does not precede
    /// the right one.
    #[error("no room between identifiers within {max_depth} levels")]
    DepthExhausted {
        /// The ceiling that was reached
        max_depth: usize,
    },
}

/// Errors raised when building an allocator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base must be at least 1
    #[error("base must be at least 1")]
    ZeroBase,

    /// The boundary must be at least 1
    #[error("boundary must be at least 1")]
    ZeroBoundary,

    /// The depth ceiling must be at least 1
    #[error("max_depth must be at least 1")]
    ZeroDepth,

    /// The deepest level's segments would not fit in a u64
    #[error("segments at depth {max_depth} with base {base} overflow u64")]
    SegmentOverflow {
        /// Configured base
        base: u32,
        /// Configured depth ceiling
        max_depth: usize,
    },

    /// The configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
