//! Per-call comparison state and its pool.
//!
//! An [`EqualityContext`] records the reference pairs currently being
//! compared and how many shared references the current hash is nested in.
//! It is threaded explicitly through every recursive call and belongs to
//! exactly one top-level call at a time.
//!
//! Hashing does not track identities. Two values that compare equal unfold
//! into the same tree to any finite depth, so cutting every hash off at the
//! same reference depth keeps equal values hashing alike, whatever the
//! lengths of their cycles.

use std::sync::OnceLock;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::StructuralError;

/// Contexts kept by the global pool between calls.
pub const DEFAULT_RETAINED_CONTEXTS: usize = 32;

/// Shared references a hash descends through before it stops.
///
/// Content below this depth contributes [`crate::hash::CYCLE_SENTINEL`].
pub const MAX_HASH_DEPTH: usize = 8;

/// Visited-pair state used to terminate recursion over cyclic graphs.
#[derive(Debug, Default)]
pub struct EqualityContext {
    comparing: FxHashSet<(usize, usize)>,
    hash_depth: usize,
}

impl EqualityContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the `(left, right)` pair as in progress.
    ///
    /// Returns `false` if the pair is already in progress, i.e. a cycle.
    #[inline]
    pub fn enter(&mut self, left: usize, right: usize) -> bool {
        self.comparing.insert((left, right))
    }

    #[inline]
    pub fn exit(&mut self, left: usize, right: usize) {
        self.comparing.remove(&(left, right));
    }

    /// Descend through one shared reference while hashing.
    ///
    /// Returns `false` once [`MAX_HASH_DEPTH`] references are entered; the
    /// caller then contributes a constant instead of descending.
    #[inline]
    pub fn enter_hash(&mut self) -> bool {
        if self.hash_depth >= MAX_HASH_DEPTH {
            return false;
        }
        self.hash_depth += 1;
        true
    }

    #[inline]
    pub fn exit_hash(&mut self) {
        self.hash_depth = self.hash_depth.saturating_sub(1);
    }

    /// Shared references the current hash is nested in.
    pub fn hash_depth(&self) -> usize {
        self.hash_depth
    }

    /// Forget all in-progress state, keeping allocations.
    pub fn reset(&mut self) {
        self.comparing.clear();
        self.hash_depth = 0;
    }

    /// Whether nothing is in progress.
    pub fn is_idle(&self) -> bool {
        self.comparing.is_empty() && self.hash_depth == 0
    }
}

/// Rent/return object pool.
pub trait ObjectPool<T> {
    /// Take an item from the pool, creating one if the pool is empty.
    fn rent(&self) -> T;

    /// Return an item for reuse.
    fn give_back(&self, item: T);
}

/// Pool of reset [`EqualityContext`]s.
#[derive(Debug)]
pub struct ContextPool {
    retained: Mutex<Vec<EqualityContext>>,
    max_retained: usize,
}

impl ContextPool {
    /// Pool keeping at most `max_retained` idle contexts.
    pub fn new(max_retained: usize) -> Result<Self, StructuralError> {
        if max_retained == 0 {
            return Err(StructuralError::invalid_argument(
                "max_retained",
                "a context pool must retain at least one context",
            ));
        }
        Ok(Self::with_capacity(max_retained))
    }

    fn with_capacity(max_retained: usize) -> Self {
        Self {
            retained: Mutex::new(Vec::with_capacity(max_retained)),
            max_retained,
        }
    }

    /// Process-wide pool used by the top-level entry points.
    pub fn global() -> &'static ContextPool {
        static POOL: OnceLock<ContextPool> = OnceLock::new();
        POOL.get_or_init(|| ContextPool::with_capacity(DEFAULT_RETAINED_CONTEXTS))
    }

    /// Run `f` with a rented context, returning it afterward.
    pub fn scoped<R>(&self, f: impl FnOnce(&mut EqualityContext) -> R) -> R {
        let mut cx = self.rent();
        let result = f(&mut cx);
        self.give_back(cx);
        result
    }

    /// Number of idle contexts currently held.
    pub fn retained(&self) -> usize {
        self.retained.lock().len()
    }

    pub fn max_retained(&self) -> usize {
        self.max_retained
    }
}

impl ObjectPool<EqualityContext> for ContextPool {
    fn rent(&self) -> EqualityContext {
        self.retained.lock().pop().unwrap_or_default()
    }

    fn give_back(&self, mut item: EqualityContext) {
        item.reset();
        let mut retained = self.retained.lock();
        if retained.len() < self.max_retained {
            retained.push(item);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests panic on unexpected state")]
mod tests;
