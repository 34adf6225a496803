//! LSEQ identifier allocator.
//!
//! This module contains the Allocator, which synthesizes a fresh identifier
//! strictly between two existing ones, and SharedAllocator, a thread-safe
//! handle around it.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::crdt::borrow::{carry_id, subtract_id};
use crate::crdt::error::{AllocError, ConfigError};
use crate::crdt::position::{get_interval, prefix};
use crate::crdt::random::{Lcg, RandomSource};
use crate::crdt::types::{AllocatorConfig, Identifier, Segment, Strategy, max_segment};

/// Allocates identifiers for one replica.
///
/// The allocator walks down the levels of its two neighbours until it finds a
/// depth with room for a new segment, then places the segment close to one of
/// the neighbours. Which neighbour is decided by a coin flip the first time a
/// depth is used and remembered for the allocator's whole lifetime, which
/// keeps identifiers short when editing proceeds in one direction.
///
/// # Design
///
/// - One allocator per replica, each seeded independently
/// - Strategy table only grows; an entry is never overwritten
/// - Allocations jump at most `boundary` away from the chosen neighbour
/// - Never reset: a fresh allocator could replay earlier allocations
#[derive(Debug)]
pub struct Allocator<R = Lcg> {
    /// Constants shaping identifier growth
    config: AllocatorConfig,
    /// Strategy chosen for each depth the allocator has worked at
    strategies: BTreeMap<usize, Strategy>,
    /// Source of coin flips and step draws
    rng: R,
}

impl Allocator<Lcg> {
    /// Creates an allocator with the default configuration, seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Allocator {
            config: AllocatorConfig::default(),
            strategies: BTreeMap::new(),
            rng: Lcg::new(seed),
        }
    }

    /// Creates an allocator with a custom base, seeded with `seed`.
    pub fn with_base(seed: u64, base: u32) -> Result<Self, ConfigError> {
        Self::with_rng(Lcg::new(seed), AllocatorConfig::with_base(base))
    }

    /// Creates an allocator from a full configuration, seeded with `seed`.
    pub fn from_config(seed: u64, config: AllocatorConfig) -> Result<Self, ConfigError> {
        Self::with_rng(Lcg::new(seed), config)
    }
}

impl<R: RandomSource> Allocator<R> {
    /// Creates an allocator drawing from `rng`.
    ///
    /// # Returns
    ///
    /// * `Ok(Allocator)` - If the configuration is valid
    /// * `Err(ConfigError)` - If it is not
    pub fn with_rng(rng: R, config: AllocatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Allocator {
            config,
            strategies: BTreeMap::new(),
            rng,
        })
    }

    /// Gets the configuration.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Gets the base.
    pub fn base(&self) -> u32 {
        self.config.base
    }

    /// Gets the boundary.
    pub fn boundary(&self) -> u64 {
        self.config.boundary
    }

    /// Gets the random source.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Strategy recorded for `depth`, if the allocator has worked at it.
    pub fn strategy(&self, depth: usize) -> Option<Strategy> {
        self.strategies.get(&depth).copied()
    }

    /// All recorded strategies in depth order.
    pub fn strategies(&self) -> impl Iterator<Item = (usize, Strategy)> + '_ {
        self.strategies.iter().map(|(&depth, &strategy)| (depth, strategy))
    }

    /// Allocates a new identifier strictly between `left` and `right`.
    ///
    /// `left` must sort strictly before `right`. This is checked in debug
    /// builds only; in release builds an unordered pair yields
    /// `DepthExhausted`.
    ///
    /// Operands whose segments exceed their level maximum can defeat the
    /// interval search. The allocator then extends `left` one level past the
    /// first level where the operands differ.
    ///
    /// # Arguments
    ///
    /// * `left` - The identifier the new one must follow
    /// * `right` - The identifier the new one must precede
    ///
    /// # Returns
    ///
    /// * `Ok(Identifier)` - The new identifier; for well-formed operands its
    ///   depth is the first depth with an interval of at least 2
    /// * `Err(AllocError)` - If no identifier fits within `max_depth` levels
    pub fn alloc(
        &mut self,
        left: &Identifier,
        right: &Identifier,
    ) -> Result<Identifier, AllocError> {
        debug_assert!(left < right, "alloc called with {left} not before {right}");

        let id = match self.search_interval(left, right) {
            Some(id) if left < &id && &id < right => id,
            _ => self.place_after(left, right)?,
        };
        debug_assert!(left < &id && &id < right, "{id} not between {left} and {right}");
        Ok(id)
    }

    /// Walks down to the first depth with an interval of at least 2 and
    /// places a segment there. Returns `None` if no depth up to `max_depth`
    /// has room.
    fn search_interval(&mut self, left: &Identifier, right: &Identifier) -> Option<Identifier> {
        let base = self.config.base;

        let mut depth = 0;
        let mut interval = 0;
        while interval < 2 {
            if depth == self.config.max_depth {
                return None;
            }
            depth += 1;
            interval = get_interval(depth, &prefix(left, depth), &prefix(right, depth), base);
        }

        let step = Segment::try_from((interval - 1).min(i128::from(self.config.boundary)))
            .unwrap_or(self.config.boundary);
        let strategy = self.strategy_for(depth);
        let level = depth - 1;

        let segments = match strategy {
            Strategy::BoundaryPlus => {
                let add = self.draw_step(step);
                let mut segments = prefix(left, depth).into_segments();
                carry_id(&mut segments, level, add, base);
                segments
            }
            Strategy::BoundaryMinus => {
                let sub = self.draw_step(step);
                let mut segments = prefix(right, depth).into_segments();
                let last = segments[level];
                if last >= sub {
                    segments[level] = last - sub;
                } else {
                    segments[level] = 0;
                    subtract_id(&mut segments, level, sub - last - 1, base);
                }
                segments
            }
        };

        let id = Identifier::new(segments);
        debug!(%left, %right, depth, interval, step, %strategy, %id, "allocated identifier");
        Some(id)
    }

    /// Places an identifier lexicographically between the operands: the
    /// significant segments of `left`, extended at least one level past the
    /// level where `left` and `right` first differ.
    fn place_after(
        &mut self,
        left: &Identifier,
        right: &Identifier,
    ) -> Result<Identifier, AllocError> {
        let max_depth = self.config.max_depth;
        let width = left.depth().max(right.depth());
        let diverge = (0..width).find(|&level| left.segment(level) != right.segment(level));
        let depth = match diverge {
            Some(level) if left.segment(level) < right.segment(level) => {
                let significant = left
                    .segments()
                    .iter()
                    .rposition(|&segment| segment != 0)
                    .map_or(0, |last| last + 1);
                significant.max(level + 1) + 1
            }
            _ => {
                warn!(%left, %right, "operands are not ordered");
                return Err(AllocError::DepthExhausted { max_depth });
            }
        };
        if depth > max_depth {
            warn!(%left, %right, max_depth, "identifier depth exhausted");
            return Err(AllocError::DepthExhausted { max_depth });
        }

        let level = depth - 1;
        let boundary = self.config.boundary;
        let step = max_segment(self.config.base, level).map_or(boundary, |max| max.min(boundary));
        let mut segments = prefix(left, depth).into_segments();
        segments[level] = self.draw_step(step);

        let id = Identifier::new(segments);
        debug!(%left, %right, depth, step, %id, "placed identifier past diverging level");
        Ok(id)
    }

    /// Returns the strategy for `depth`, flipping a coin the first time.
    fn strategy_for(&mut self, depth: usize) -> Strategy {
        let rng = &mut self.rng;
        *self.strategies.entry(depth).or_insert_with(|| {
            let strategy = Strategy::from(rng.boolean());
            trace!(depth, %strategy, "chose strategy for new depth");
            strategy
        })
    }

    /// Draws an integer uniformly in `[1, step]`.
    fn draw_step(&mut self, step: Segment) -> Segment {
        let draw = self.rng.range(0.0, step as f64);
        (draw.floor() as Segment).min(step - 1) + 1
    }
}

/// A cloneable, thread-safe handle to an [`Allocator`].
///
/// An allocator is meant to be driven from one replica's local edit path. When
/// an application needs to allocate from several threads, this wrapper makes
/// each call, including the strategy-table update, atomic.
pub struct SharedAllocator<R = Lcg> {
    inner: Arc<Mutex<Allocator<R>>>,
}

impl<R: RandomSource> SharedAllocator<R> {
    /// Wraps `allocator`.
    pub fn new(allocator: Allocator<R>) -> Self {
        SharedAllocator {
            inner: Arc::new(Mutex::new(allocator)),
        }
    }

    /// Allocates a new identifier strictly between `left` and `right`.
    pub fn alloc(&self, left: &Identifier, right: &Identifier) -> Result<Identifier, AllocError> {
        self.inner.lock().alloc(left, right)
    }

    /// Strategy recorded for `depth`.
    pub fn strategy(&self, depth: usize) -> Option<Strategy> {
        self.inner.lock().strategy(depth)
    }

    /// Runs `f` with exclusive access to the allocator.
    pub fn with_allocator<T>(&self, f: impl FnOnce(&mut Allocator<R>) -> T) -> T {
        f(&mut self.inner.lock())
    }
}

impl<R> Clone for SharedAllocator<R> {
    fn clone(&self) -> Self {
        SharedAllocator {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RandomSource> From<Allocator<R>> for SharedAllocator<R> {
    fn from(allocator: Allocator<R>) -> Self {
        SharedAllocator::new(allocator)
    }
}
