//! Stack growth for deep structural comparisons.
//!
//! Comparing or hashing a value recurses once per `Box`, `Rc` or `Arc` link.
//! An owned list or pointer chain of a few hundred thousand links would
//! overflow a default thread stack, so every such descent in `shapeq` runs
//! through [`ensure_sufficient_stack`].
//!
//! On native targets `stacker` switches to a fresh heap-allocated segment
//! when the current one runs low. On WASM the engine manages the stack and
//! every call is direct.

/// When to grow the stack, and by how much.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackBudget {
    /// Grow once fewer than this many bytes remain.
    pub red_zone: usize,
    /// Size of each new segment in bytes.
    pub segment: usize,
}

impl StackBudget {
    /// Budget for comparer descents.
    ///
    /// One level of a comparison is a handful of small frames, so a 2 MiB
    /// segment holds thousands of levels and a 128 KiB red zone covers the
    /// deepest single level.
    pub const COMPARISON: StackBudget = StackBudget {
        red_zone: 128 * 1024,
        segment: 2 * 1024 * 1024,
    };

    /// Run `f`, first moving to a new segment if the red zone is reached.
    #[inline]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run<R>(self, f: impl FnOnce() -> R) -> R {
        stacker::maybe_grow(self.red_zone, self.segment, f)
    }

    #[inline]
    #[cfg(target_arch = "wasm32")]
    #[allow(clippy::unused_self, reason = "the engine owns the stack")]
    pub fn run<R>(self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// Run `f` under [`StackBudget::COMPARISON`].
///
/// ```text
/// fn equals(&self, x: &Box<T>, y: &Box<T>, cx: &mut EqualityContext) -> bool {
///     ensure_sufficient_stack(|| self.inner.equals(x, y, cx))
/// }
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    StackBudget::COMPARISON.run(f)
}

/// Bytes left on the current stack segment, if the platform reports it.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests;
