//! LSEQ identifier allocation for conflict-free replicated sequences.
//!
//! This module contains the allocator and all its supporting arithmetic and
//! types.

pub mod allocator;
pub mod borrow;
pub mod error;
pub mod position;
pub mod random;
pub mod types;

// Re-export the main public API
pub use allocator::{Allocator, SharedAllocator};
pub use error::{AllocError, ConfigError};
pub use position::{get_interval, get_position, prefix};
pub use random::{Lcg, RandomSource};
pub use types::{AllocatorConfig, Identifier, Segment, Strategy, compare};
