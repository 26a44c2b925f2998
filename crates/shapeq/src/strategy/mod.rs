//! Specialized comparison strategies.
//!
//! Every comparer implements [`EqualityStrategy`]. Containers are generic
//! over their element strategy, so the unrolled loops, the raw-memory paths
//! and the map comparer all compose with any element comparer: a
//! nullable-value list is a list comparer over an [`OptionComparer`], a
//! reference list is a list comparer over a [`ReferenceComparer`].

mod composite;
mod map;
mod memory;
mod nullable;
mod reference;
mod scalar;
mod sequence;

pub use composite::{CompositeBuilder, CompositeComparer};
pub use map::{MapAccess, MapComparer};
pub use memory::{EnumArrayComparer, EquatableArrayComparer, FixedLayoutArrayComparer};
pub use nullable::OptionComparer;
pub use reference::{
    BoxComparer, RefCellComparer, ReferenceComparer, SharedPointer, WeakComparer,
};
pub use scalar::{DiscriminantComparer, FloatComparer, FloatBits, ScalarComparer};
pub use sequence::{equals_slices, hash_slice, IterComparer, SequenceAccess, SliceComparer};

use crate::classify::TypeShape;
use crate::context::EqualityContext;
use crate::error::UnsupportedReason;
use crate::hash::{avalanche, fold};
use crate::synth::StrategyDescriptor;
use crate::StructuralError;

/// Pairwise equality and hashing for one type.
///
/// Implementations must keep `equals(x, y) ⇒ hash(x) == hash(y)`.
pub trait EqualityStrategy<T>: Send + Sync {
    fn equals(&self, x: &T, y: &T, cx: &mut EqualityContext) -> bool;

    fn hash(&self, x: &T, cx: &mut EqualityContext) -> u64;

    /// Fold `x` into a running hash.
    ///
    /// A nested hash is avalanched first: it was built with the same [`fold`]
    /// as its parent, and folding it back in unmixed can cancel the parent's
    /// state. Scalar comparers override this with a plain [`fold`].
    /// Strategies for values that can be absent override it to contribute
    /// the null sentinel instead of a hash.
    #[inline]
    fn fold_into(&self, hash: u64, x: &T, cx: &mut EqualityContext) -> u64 {
        fold(hash, avalanche(self.hash(x, cx)))
    }
}

/// Boxed strategy, as stored in a compiled comparer.
pub type Strategy<T> = Box<dyn EqualityStrategy<T>>;

impl<T, S: EqualityStrategy<T> + ?Sized> EqualityStrategy<T> for Box<S> {
    #[inline]
    fn equals(&self, x: &T, y: &T, cx: &mut EqualityContext) -> bool {
        (**self).equals(x, y, cx)
    }

    #[inline]
    fn hash(&self, x: &T, cx: &mut EqualityContext) -> u64 {
        (**self).hash(x, cx)
    }

    #[inline]
    fn fold_into(&self, hash: u64, x: &T, cx: &mut EqualityContext) -> u64 {
        (**self).fold_into(hash, x, cx)
    }
}

type EqFn<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;
type HashFn<T> = Box<dyn Fn(&T) -> u64 + Send + Sync>;

/// Strategy built from a pair of closures.
///
/// Used to plug custom key or value comparison into a [`MapComparer`]. The
/// closures must keep the equals/hash contract themselves.
pub struct FnStrategy<T> {
    eq: EqFn<T>,
    hash: HashFn<T>,
}

impl<T> FnStrategy<T> {
    pub fn new(
        eq: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
        hash: impl Fn(&T) -> u64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            eq: Box::new(eq),
            hash: Box::new(hash),
        }
    }
}

impl<T> EqualityStrategy<T> for FnStrategy<T> {
    fn equals(&self, x: &T, y: &T, _cx: &mut EqualityContext) -> bool {
        (self.eq)(x, y)
    }

    fn hash(&self, x: &T, _cx: &mut EqualityContext) -> u64 {
        (self.hash)(x)
    }
}

/// Error for a strategy builder handed a plan it cannot build.
pub fn shape_mismatch(plan: &StrategyDescriptor) -> StructuralError {
    StructuralError::unsupported(
        plan.type_name(),
        UnsupportedReason::ShapeMismatch {
            shape: plan.shape(),
        },
    )
}

/// Check that `plan` has one of the `accepted` shapes.
pub fn expect_shape(
    plan: &StrategyDescriptor,
    accepted: &[TypeShape],
) -> Result<(), StructuralError> {
    if accepted.contains(&plan.shape()) {
        Ok(())
    } else {
        Err(shape_mismatch(plan))
    }
}
