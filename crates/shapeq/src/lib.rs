//! Structural equality and hashing for composite data.
//!
//! `shapeq` compares values by their contents instead of their identity and
//! hashes them consistently with that comparison, so arbitrary composite
//! values can serve as cache keys, deduplication keys and test-assertion
//! operands without hand-written `PartialEq`/`Hash` impls.
//!
//! # Pipeline
//!
//! - **Descriptors** ([`TypeDescriptor`]): each [`Structural`] type declares
//!   its members in declaration order and its capabilities.
//! - **Classification** ([`ShapeClassifier`]): every descriptor gets exactly
//!   one [`TypeShape`], or an `UnsupportedShape` error. Unsupported types
//!   never fall back to identity comparison.
//! - **Synthesis** ([`Synthesizer`]): the [`StrategyDescriptor`] plan lists
//!   a type's parts and validates every type reachable from it.
//! - **Compilation** ([`Registry`]): each plan is turned into a
//!   [`CompiledComparer`] once per type and cached for the life of the
//!   process, failures included.
//! - **Strategies** ([`strategy`]): unrolled sequence walks, raw-memory
//!   arrays, order-independent maps, and cycle-aware references.
//!
//! # Cycles
//!
//! Only shared pointers (`Rc`, `Arc`, `rc::Weak`) can close a cycle. Each
//! comparison threads an [`EqualityContext`] recording the pointer pairs in
//! progress, and reaching a pair again compares as equal. Hashing descends
//! through at most [`MAX_HASH_DEPTH`] nested shared pointers; anything
//! deeper contributes [`hash::CYCLE_SENTINEL`]. Both terminate on every
//! graph, and values that compare equal always hash alike, even when their
//! cycles have different lengths.
//!
//! # Example
//!
//! ```
//! use shapeq::Structural;
//!
//! #[derive(Structural, Debug)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     label: Option<String>,
//! }
//!
//! let a = Point { x: 1, y: 2, label: None };
//! let b = Point { x: 1, y: 2, label: None };
//! assert!(shapeq::equals(&a, &b)?);
//! assert_eq!(shapeq::hash(&a)?, shapeq::hash(&b)?);
//! # Ok::<(), shapeq::StructuralError>(())
//! ```

mod classify;
mod context;
mod descriptor;
mod error;
pub mod hash;
mod impls;
mod key;
mod layout;
mod registry;
pub mod strategy;
mod structural;
mod synth;

pub use classify::{Classification, ShapeClassifier, TypeShape};
pub use context::{
    ContextPool, EqualityContext, ObjectPool, DEFAULT_RETAINED_CONTEXTS, MAX_HASH_DEPTH,
};
pub use descriptor::{Capabilities, FieldInfo, TypeDescriptor, TypeKind, TypeRef};
pub use error::{StructuralError, UnsupportedReason};
pub use key::StructuralKey;
pub use layout::{bytes_of_slice, EquatableOps, FixedLayout, RawView};
pub use registry::{CompileSession, CompiledComparer, ComparerHandle, Registry};
pub use shapeq_macros::Structural;
pub use strategy::{
    expect_shape, CompositeComparer, DiscriminantComparer, EqualityStrategy, Strategy,
};
pub use structural::Structural;
pub use synth::{PartDescriptor, PartRole, StrategyDescriptor, Synthesizer};

/// The compiled comparer for `T` from the global registry.
///
/// Compiles on first use. A type that cannot be compiled returns the same
/// error on every call.
pub fn comparer<T: Structural>() -> Result<&'static CompiledComparer<T>, StructuralError> {
    Registry::global().comparer::<T>()
}

/// Structural equality of `x` and `y`.
pub fn equals<T: Structural>(x: &T, y: &T) -> Result<bool, StructuralError> {
    Ok(comparer::<T>()?.equals(x, y))
}

/// Structural hash of `x`, consistent with [`equals`].
pub fn hash<T: Structural>(x: &T) -> Result<u64, StructuralError> {
    Ok(comparer::<T>()?.hash(x))
}

/// Assert that two values are structurally equal.
///
/// Panics with both values' `Debug` output if they differ, and with the
/// error if their type cannot be compared.
#[macro_export]
macro_rules! assert_structural_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => match $crate::equals(left, right) {
                Ok(true) => {}
                Ok(false) => panic!(
                    "assertion failed: structural equality\n  left: {:?}\n right: {:?}",
                    left, right
                ),
                Err(error) => panic!("structural comparison unavailable: {error}"),
            },
        }
    };
}

/// Assert that two values are structurally different.
#[macro_export]
macro_rules! assert_structural_ne {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => match $crate::equals(left, right) {
                Ok(false) => {}
                Ok(true) => panic!(
                    "assertion failed: structural inequality\n  left: {:?}\n right: {:?}",
                    left, right
                ),
                Err(error) => panic!("structural comparison unavailable: {error}"),
            },
        }
    };
}
