//! Primitive comparers.

use std::hash::Hash;
use std::marker::PhantomData;

use crate::context::EqualityContext;
use crate::hash::{fold, hash_scalar};

use super::EqualityStrategy;

/// Compares through the type's own `Eq` and hashes through its own `Hash`.
pub struct ScalarComparer<T>(PhantomData<fn(&T)>);

impl<T> ScalarComparer<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ScalarComparer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> EqualityStrategy<T> for ScalarComparer<T> {
    #[inline]
    fn equals(&self, x: &T, y: &T, _cx: &mut EqualityContext) -> bool {
        x == y
    }

    #[inline]
    fn hash(&self, x: &T, _cx: &mut EqualityContext) -> u64 {
        hash_scalar(x)
    }

    #[inline]
    fn fold_into(&self, hash: u64, x: &T, _cx: &mut EqualityContext) -> u64 {
        fold(hash, hash_scalar(x))
    }
}

/// IEEE floats with an equivalence relation.
pub trait FloatBits: Copy + PartialEq {
    fn is_nan(self) -> bool;

    /// Bits with `-0.0` folded onto `0.0` and every NaN onto one pattern.
    fn canonical_bits(self) -> u64;
}

#[allow(clippy::float_cmp, reason = "exact zero test folds -0.0 onto 0.0")]
impl FloatBits for f32 {
    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    #[inline]
    fn canonical_bits(self) -> u64 {
        if self.is_nan() {
            u64::from(f32::NAN.to_bits())
        } else if self == 0.0 {
            0
        } else {
            u64::from(self.to_bits())
        }
    }
}

#[allow(clippy::float_cmp, reason = "exact zero test folds -0.0 onto 0.0")]
impl FloatBits for f64 {
    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    #[inline]
    fn canonical_bits(self) -> u64 {
        if self.is_nan() {
            f64::NAN.to_bits()
        } else if self == 0.0 {
            0
        } else {
            self.to_bits()
        }
    }
}

/// Float comparer: NaN equals NaN, `-0.0` equals `0.0`.
pub struct FloatComparer<T>(PhantomData<fn(&T)>);

impl<T> FloatComparer<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for FloatComparer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatBits> EqualityStrategy<T> for FloatComparer<T> {
    #[inline]
    fn equals(&self, x: &T, y: &T, _cx: &mut EqualityContext) -> bool {
        x == y || (x.is_nan() && y.is_nan())
    }

    #[inline]
    fn hash(&self, x: &T, _cx: &mut EqualityContext) -> u64 {
        hash_scalar(&x.canonical_bits())
    }

    #[inline]
    fn fold_into(&self, hash: u64, x: &T, _cx: &mut EqualityContext) -> u64 {
        fold(hash, hash_scalar(&x.canonical_bits()))
    }
}

/// Fieldless enum comparer over the underlying integer.
///
/// The discriminant is widened to `u128` so every integer `repr` keeps all
/// of its bits.
pub struct DiscriminantComparer<T> {
    discriminant: fn(&T) -> u128,
}

impl<T> DiscriminantComparer<T> {
    pub fn new(discriminant: fn(&T) -> u128) -> Self {
        Self { discriminant }
    }
}

impl<T> EqualityStrategy<T> for DiscriminantComparer<T> {
    #[inline]
    fn equals(&self, x: &T, y: &T, _cx: &mut EqualityContext) -> bool {
        (self.discriminant)(x) == (self.discriminant)(y)
    }

    #[inline]
    fn hash(&self, x: &T, _cx: &mut EqualityContext) -> u64 {
        hash_scalar(&(self.discriminant)(x))
    }

    #[inline]
    fn fold_into(&self, hash: u64, x: &T, _cx: &mut EqualityContext) -> u64 {
        fold(hash, hash_scalar(&(self.discriminant)(x)))
    }
}
