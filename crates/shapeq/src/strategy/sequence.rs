//! Element-wise sequence comparers.
//!
//! Both comparers short-circuit on differing counts before touching any
//! element, then walk the elements in groups of four with a scalar tail.
//! Hashing uses the same grouping and folds the count after the elements.

use std::collections::{BTreeSet, LinkedList, VecDeque};
use std::marker::PhantomData;

use crate::context::EqualityContext;
use crate::hash::{fold, SEED};
use crate::registry::ComparerHandle;

use super::EqualityStrategy;

/// Compare two slices element by element, four at a time.
pub fn equals_slices<E, S>(element: &S, x: &[E], y: &[E], cx: &mut EqualityContext) -> bool
where
    S: EqualityStrategy<E> + ?Sized,
{
    if x.len() != y.len() {
        return false;
    }

    let mut left = x.chunks_exact(4);
    let mut right = y.chunks_exact(4);
    for (l, r) in (&mut left).zip(&mut right) {
        if !(element.equals(&l[0], &r[0], cx)
            && element.equals(&l[1], &r[1], cx)
            && element.equals(&l[2], &r[2], cx)
            && element.equals(&l[3], &r[3], cx))
        {
            return false;
        }
    }

    left.remainder()
        .iter()
        .zip(right.remainder())
        .all(|(l, r)| element.equals(l, r, cx))
}

/// Hash a slice element by element, four at a time, then fold its length.
pub fn hash_slice<E, S>(element: &S, x: &[E], cx: &mut EqualityContext) -> u64
where
    S: EqualityStrategy<E> + ?Sized,
{
    let mut hash = SEED;

    let mut chunks = x.chunks_exact(4);
    for chunk in &mut chunks {
        hash = element.fold_into(hash, &chunk[0], cx);
        hash = element.fold_into(hash, &chunk[1], cx);
        hash = element.fold_into(hash, &chunk[2], cx);
        hash = element.fold_into(hash, &chunk[3], cx);
    }
    for item in chunks.remainder() {
        hash = element.fold_into(hash, item, cx);
    }

    fold(hash, x.len() as u64)
}

/// Arrays, lists and boxed slices: anything viewable as `&[E]`.
pub struct SliceComparer<C: 'static, E: 'static, S = ComparerHandle<E>> {
    view: fn(&C) -> &[E],
    element: S,
    _marker: PhantomData<fn(&C)>,
}

impl<C: 'static, E: 'static, S: EqualityStrategy<E>> SliceComparer<C, E, S> {
    pub fn new(view: fn(&C) -> &[E], element: S) -> Self {
        Self {
            view,
            element,
            _marker: PhantomData,
        }
    }
}

impl<C: 'static, E: 'static, S: EqualityStrategy<E>> EqualityStrategy<C>
    for SliceComparer<C, E, S>
{
    #[inline]
    fn equals(&self, x: &C, y: &C, cx: &mut EqualityContext) -> bool {
        equals_slices(&self.element, (self.view)(x), (self.view)(y), cx)
    }

    #[inline]
    fn hash(&self, x: &C, cx: &mut EqualityContext) -> u64 {
        hash_slice(&self.element, (self.view)(x), cx)
    }
}

/// Read access to a non-contiguous sequence, in iteration order.
pub trait SequenceAccess: 'static {
    type Element: 'static;

    fn count(&self) -> usize;

    fn elements(&self) -> impl Iterator<Item = &Self::Element>;
}

impl<T: 'static> SequenceAccess for VecDeque<T> {
    type Element = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn elements(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: 'static> SequenceAccess for LinkedList<T> {
    type Element = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn elements(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: 'static> SequenceAccess for BTreeSet<T> {
    type Element = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn elements(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

/// Generic sequences walked through their iterator.
pub struct IterComparer<Q: SequenceAccess, S = ComparerHandle<<Q as SequenceAccess>::Element>> {
    element: S,
    _marker: PhantomData<fn(&Q)>,
}

impl<Q: SequenceAccess, S: EqualityStrategy<Q::Element>> IterComparer<Q, S> {
    pub fn new(element: S) -> Self {
        Self {
            element,
            _marker: PhantomData,
        }
    }
}

impl<Q: SequenceAccess, S: EqualityStrategy<Q::Element>> EqualityStrategy<Q>
    for IterComparer<Q, S>
{
    fn equals(&self, x: &Q, y: &Q, cx: &mut EqualityContext) -> bool {
        if x.count() != y.count() {
            return false;
        }

        let element = &self.element;
        let mut pairs = x.elements().zip(y.elements());
        loop {
            let Some((l0, r0)) = pairs.next() else {
                return true;
            };
            let Some((l1, r1)) = pairs.next() else {
                return element.equals(l0, r0, cx);
            };
            let Some((l2, r2)) = pairs.next() else {
                return element.equals(l0, r0, cx) && element.equals(l1, r1, cx);
            };
            let Some((l3, r3)) = pairs.next() else {
                return element.equals(l0, r0, cx)
                    && element.equals(l1, r1, cx)
                    && element.equals(l2, r2, cx);
            };
            if !(element.equals(l0, r0, cx)
                && element.equals(l1, r1, cx)
                && element.equals(l2, r2, cx)
                && element.equals(l3, r3, cx))
            {
                return false;
            }
        }
    }

    fn hash(&self, x: &Q, cx: &mut EqualityContext) -> u64 {
        let mut hash = SEED;
        let mut items = x.elements();
        'walk: loop {
            for _ in 0..4 {
                let Some(item) = items.next() else {
                    break 'walk;
                };
                hash = self.element.fold_into(hash, item, cx);
            }
        }
        fold(hash, x.count() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests panic on unexpected state")]
mod tests;
