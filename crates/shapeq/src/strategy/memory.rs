//! Array comparers that bypass per-element strategies.

use std::marker::PhantomData;

use crate::context::EqualityContext;
use crate::hash::{fold, hash_memory, MemoryRegion, SEED};
use crate::layout::{EquatableOps, RawView};

use super::EqualityStrategy;

/// Arrays of self-equatable elements.
///
/// Equality is slice equality over the element's own `Eq`, so it assumes
/// that contract is consistent with the element's `Hash`.
pub struct EquatableArrayComparer<C: 'static, E: 'static> {
    view: fn(&C) -> &[E],
    ops: EquatableOps<E>,
    _marker: PhantomData<fn(&C)>,
}

impl<C: 'static, E: 'static> EquatableArrayComparer<C, E> {
    pub fn new(view: fn(&C) -> &[E], ops: EquatableOps<E>) -> Self {
        Self {
            view,
            ops,
            _marker: PhantomData,
        }
    }
}

impl<C: 'static, E: 'static> EqualityStrategy<C> for EquatableArrayComparer<C, E> {
    #[inline]
    fn equals(&self, x: &C, y: &C, _cx: &mut EqualityContext) -> bool {
        let (x, y) = ((self.view)(x), (self.view)(y));
        x.len() == y.len() && self.ops.slices_equal(x, y)
    }

    fn hash(&self, x: &C, _cx: &mut EqualityContext) -> u64 {
        let items = (self.view)(x);
        let hash = items
            .iter()
            .fold(SEED, |hash, item| fold(hash, self.ops.hash(item)));
        fold(hash, items.len() as u64)
    }
}

/// Arrays of padding-free elements, compared and hashed as raw memory.
pub struct FixedLayoutArrayComparer<C: 'static, E: 'static> {
    view: fn(&C) -> &[E],
    raw: RawView<E>,
    _marker: PhantomData<fn(&C)>,
}

impl<C: 'static, E: 'static> FixedLayoutArrayComparer<C, E> {
    pub fn new(view: fn(&C) -> &[E], raw: RawView<E>) -> Self {
        Self {
            view,
            raw,
            _marker: PhantomData,
        }
    }

    fn region<'a>(&self, x: &'a C) -> (MemoryRegion<'a>, usize) {
        let items = (self.view)(x);
        (MemoryRegion::whole(self.raw.bytes(items)), items.len())
    }
}

impl<C: 'static, E: 'static> EqualityStrategy<C> for FixedLayoutArrayComparer<C, E> {
    #[inline]
    fn equals(&self, x: &C, y: &C, _cx: &mut EqualityContext) -> bool {
        let (x, x_len) = self.region(x);
        let (y, y_len) = self.region(y);
        x_len == y_len && x.same_contents(&y)
    }

    fn hash(&self, x: &C, _cx: &mut EqualityContext) -> u64 {
        let (region, len) = self.region(x);
        fold(region.hash(SEED), len as u64)
    }
}

/// Arrays of fieldless enums, compared over their underlying integers.
pub struct EnumArrayComparer<C: 'static, E: 'static> {
    view: fn(&C) -> &[E],
    raw: RawView<E>,
    width: usize,
    _marker: PhantomData<fn(&C)>,
}

impl<C: 'static, E: 'static> EnumArrayComparer<C, E> {
    /// `width` is the size in bytes of the enum's integer representation.
    pub fn new(view: fn(&C) -> &[E], raw: RawView<E>, width: usize) -> Self {
        Self {
            view,
            raw,
            width,
            _marker: PhantomData,
        }
    }
}

impl<C: 'static, E: 'static> EqualityStrategy<C> for EnumArrayComparer<C, E> {
    #[inline]
    fn equals(&self, x: &C, y: &C, _cx: &mut EqualityContext) -> bool {
        self.raw.bytes((self.view)(x)) == self.raw.bytes((self.view)(y))
    }

    fn hash(&self, x: &C, _cx: &mut EqualityContext) -> u64 {
        let bytes = self.raw.bytes((self.view)(x));
        hash_memory(bytes, fold(SEED, self.width as u64))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixed() -> FixedLayoutArrayComparer<Vec<u32>, u32> {
        FixedLayoutArrayComparer::new(Vec::as_slice, RawView::of())
    }

    #[test]
    fn fixed_layout_compares_bytes() {
        let cmp = fixed();
        let mut cx = EqualityContext::new();
        assert!(cmp.equals(&vec![1, 2, 3], &vec![1, 2, 3], &mut cx));
        assert!(!cmp.equals(&vec![1, 2, 3], &vec![1, 2, 4], &mut cx));
        assert!(!cmp.equals(&vec![1, 2], &vec![1, 2, 0], &mut cx));
    }

    #[test]
    fn fixed_layout_hash_distinguishes_trailing_zeros() {
        let cmp = fixed();
        let mut cx = EqualityContext::new();
        assert_ne!(cmp.hash(&vec![], &mut cx), cmp.hash(&vec![0], &mut cx));
        assert_eq!(
            cmp.hash(&vec![7, 8, 9], &mut cx),
            cmp.hash(&vec![7, 8, 9], &mut cx)
        );
    }

    #[test]
    fn equatable_array_uses_element_contract() {
        let cmp = EquatableArrayComparer::<Vec<String>, String>::new(
            Vec::as_slice,
            EquatableOps::of(),
        );
        let mut cx = EqualityContext::new();
        let a = vec!["x".to_owned(), "y".to_owned()];
        let b = vec!["y".to_owned(), "x".to_owned()];
        assert!(cmp.equals(&a, &a.clone(), &mut cx));
        assert!(!cmp.equals(&a, &b, &mut cx));
        assert_ne!(cmp.hash(&a, &mut cx), cmp.hash(&b, &mut cx));
    }

    #[test]
    fn enum_array_width_feeds_hash() {
        let narrow = EnumArrayComparer::<Vec<u8>, u8>::new(Vec::as_slice, RawView::of(), 1);
        let wide = EnumArrayComparer::<Vec<u8>, u8>::new(Vec::as_slice, RawView::of(), 2);
        let mut cx = EqualityContext::new();
        assert!(narrow.equals(&vec![1, 2], &vec![1, 2], &mut cx));
        assert!(!narrow.equals(&vec![1, 2], &vec![2, 1], &mut cx));
        assert_ne!(
            narrow.hash(&vec![1, 2], &mut cx),
            wide.hash(&vec![1, 2], &mut cx)
        );
    }
}
