//! Type definitions for the LSEQ allocator.
//!
//! This module contains the plain value types used throughout the allocator,
//! organized into focused submodules.

pub mod config;
pub mod identifier;
pub mod segment;
pub mod strategy;

pub use config::AllocatorConfig;
pub use identifier::{Identifier, compare};
pub use segment::{Segment, level_radix, max_segment};
pub use strategy::Strategy;
