//! Capability hooks for array fast paths.
//!
//! A type advertises its array-level capabilities through
//! [`Structural::fixed_layout`](crate::Structural::fixed_layout) and
//! [`Structural::equatable`](crate::Structural::equatable). Both return plain
//! function-pointer tables, so the array strategies stay generic over the
//! element type without requiring the capability as a trait bound.

use std::hash::Hash;

use crate::hash::hash_scalar;

/// Types whose values can be compared and hashed as raw bytes.
///
/// # Safety
///
/// Implementors must have no padding bytes and no uninitialized bytes in any
/// value, and must contain no interior mutability. Two values must be equal
/// exactly when their bytes are equal. `#[derive(Structural)]` with
/// `#[structural(fixed_layout)]` checks all of this at compile time.
// SAFETY: declaring the trait is sound; the obligation above falls on each
// `unsafe impl`.
#[allow(unsafe_code)]
pub unsafe trait FixedLayout: Copy + 'static {}

macro_rules! fixed_layout_primitives {
    ($($ty:ty),* $(,)?) => {
        $(
            // SAFETY: integers, `bool` and `char` have no padding and every
            // byte of a valid value is initialized.
            #[allow(unsafe_code)]
            unsafe impl FixedLayout for $ty {}
        )*
    };
}

fixed_layout_primitives!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char,
);

/// View a slice of fixed-layout values as its backing bytes.
#[allow(unsafe_code)]
pub fn bytes_of_slice<T: FixedLayout>(slice: &[T]) -> &[u8] {
    // SAFETY: `T: FixedLayout` guarantees every byte of every element is
    // initialized. The pointer and length come from a live slice, `u8` has
    // alignment 1, and the returned borrow shares the input's lifetime.
    unsafe { std::slice::from_raw_parts(slice.as_ptr().cast::<u8>(), std::mem::size_of_val(slice)) }
}

/// Raw byte view of a slice, available for fixed-layout element types.
pub struct RawView<T> {
    bytes: fn(&[T]) -> &[u8],
}

impl<T: FixedLayout> RawView<T> {
    pub fn of() -> Self {
        Self {
            bytes: bytes_of_slice::<T>,
        }
    }
}

impl<T> RawView<T> {
    #[inline]
    pub fn bytes<'a>(&self, slice: &'a [T]) -> &'a [u8] {
        (self.bytes)(slice)
    }
}

impl<T> Clone for RawView<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawView<T> {}

/// The type's own `Eq + Hash` contract, used for self-equatable arrays.
pub struct EquatableOps<T> {
    slice_eq: fn(&[T], &[T]) -> bool,
    hash: fn(&T) -> u64,
}

impl<T: Eq + Hash> EquatableOps<T> {
    pub fn of() -> Self {
        Self {
            slice_eq: <[T] as PartialEq>::eq,
            hash: hash_scalar::<T>,
        }
    }
}

impl<T> EquatableOps<T> {
    /// Slice equality through the element's `Eq`.
    ///
    /// For bytewise-comparable elements the standard library lowers this to
    /// a single memory comparison.
    #[inline]
    pub fn slices_equal(&self, x: &[T], y: &[T]) -> bool {
        (self.slice_eq)(x, y)
    }

    #[inline]
    pub fn hash(&self, value: &T) -> u64 {
        (self.hash)(value)
    }
}

impl<T> Clone for EquatableOps<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EquatableOps<T> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn byte_view_covers_whole_slice() {
        let values = [1_u16, 0x0203];
        let bytes = RawView::<u16>::of().bytes(&values);
        assert_eq!(bytes.len(), 4);
        assert_eq!(u16::from_ne_bytes([bytes[2], bytes[3]]), 0x0203);
    }

    #[test]
    fn hand_written_impl_exposes_every_byte() {
        #[derive(Clone, Copy)]
        #[repr(C)]
        struct Rgb {
            r: u8,
            g: u8,
            b: u8,
        }

        // SAFETY: three `u8` fields under `repr(C)` leave no padding.
        #[allow(unsafe_code)]
        unsafe impl FixedLayout for Rgb {}

        let pixels = [Rgb { r: 1, g: 2, b: 3 }, Rgb { r: 4, g: 5, b: 6 }];
        assert_eq!(bytes_of_slice(&pixels), [1, 2, 3, 4, 5, 6]);
        assert_eq!(pixels[1].r + pixels[1].g + pixels[1].b, 15);
    }

    #[test]
    fn byte_view_of_empty_slice_is_empty() {
        let values: [u64; 0] = [];
        assert!(bytes_of_slice(&values).is_empty());
    }

    #[test]
    fn equatable_ops_use_own_contract() {
        let ops = EquatableOps::<String>::of();
        let a = vec![String::from("x"), String::from("y")];
        let b = a.clone();
        assert!(ops.slices_equal(&a, &b));
        assert!(!ops.slices_equal(&a, &b[..1]));
        assert_eq!(ops.hash(&a[0]), hash_scalar("x"));
    }
}
