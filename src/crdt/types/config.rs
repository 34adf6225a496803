//! Allocator configuration.
//!
//! This module contains AllocatorConfig, which holds the three constants that
//! shape identifier growth, along with its validation and JSON loading.

use serde::{Deserialize, Serialize};

use crate::crdt::error::ConfigError;
use crate::crdt::types::segment::max_segment;

/// Default exponent of the first level's range.
pub const DEFAULT_BASE: u32 = 4;
/// Default cap on how far a single allocation jumps from its neighbour.
pub const DEFAULT_BOUNDARY: u64 = 20;
/// Default ceiling on identifier depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Constants controlling identifier allocation.
///
/// All fields are fixed for the lifetime of an allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Level `p` holds segments in `0..=2^(base + p)`
    pub base: u32,
    /// Maximum distance of a new segment from the neighbour it leans toward
    pub boundary: u64,
    /// Deepest level the allocator will descend to before giving up
    pub max_depth: usize,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        AllocatorConfig {
            base: DEFAULT_BASE,
            boundary: DEFAULT_BOUNDARY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AllocatorConfig {
    /// Default configuration with a custom base.
    pub fn with_base(base: u32) -> Self {
        AllocatorConfig {
            base,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON, filling omitted fields with defaults,
    /// and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AllocatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can address every level up to `max_depth`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base == 0 {
            return Err(ConfigError::ZeroBase);
        }
        if self.boundary == 0 {
            return Err(ConfigError::ZeroBoundary);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if max_segment(self.base, self.max_depth - 1).is_none() {
            return Err(ConfigError::SegmentOverflow {
                base: self.base,
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }
}
