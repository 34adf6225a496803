//! # LSEQ CRDT - Identifier Allocation
//!
//! The identifier-allocation core of a conflict-free replicated sequence. Given
//! two identifiers, it synthesizes a new one that sorts strictly between them,
//! so replicas can insert concurrently, without coordination, and still agree
//! on the order of every item once their allocations are exchanged.
//!
//! ## Features
//!
//! - **Dense order**: there is always room between two distinct identifiers
//! - **Compact**: the LSEQ scheme picks a placement strategy per depth and caps
//!   each jump, keeping identifiers short over long editing sessions
//! - **Deterministic**: a seeded random source replays the same allocations
//! - **Fails loudly**: running out of representable depth is an error, never a
//!   silent collision
//!
//! ## Example
//!
//! ```rust
//! use crdt_lseq::{Allocator, Identifier};
//!
//! let mut allocator = Allocator::new(42); // seed = 42
//! let begin = Identifier::begin();
//! let end = Identifier::end(allocator.base()).unwrap();
//!
//! let id = allocator.alloc(&begin, &end).unwrap();
//! assert!(begin < id && id < end);
//! ```

pub mod crdt;

// Re-export the main public API from the CRDT module
pub use crdt::{AllocError, Allocator, AllocatorConfig, ConfigError, SharedAllocator};
pub use crdt::{Identifier, Lcg, RandomSource, Segment, Strategy, compare};
pub use crdt::{get_interval, get_position, prefix};
