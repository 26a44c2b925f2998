//! Pointer and wrapper comparers.
//!
//! Shared pointers are the only way to build a cyclic graph, so they are the
//! only comparers that consult the [`EqualityContext`]. Equality marks each
//! pointer pair in progress; hashing counts nested references and stops at
//! [`MAX_HASH_DEPTH`](crate::context::MAX_HASH_DEPTH). Every pointer and
//! `Box` descent runs under `ensure_sufficient_stack`, so long chains grow
//! the stack instead of overflowing it.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use shapeq_stack::ensure_sufficient_stack;

use crate::context::EqualityContext;
use crate::hash::{avalanche, fold, fold_null, CYCLE_SENTINEL, SEED};
use crate::registry::ComparerHandle;

use super::EqualityStrategy;

/// Identity-bearing pointer whose target is compared structurally.
pub trait SharedPointer: 'static {
    type Target: 'static;

    /// Address of the pointee, used as its identity.
    fn address(this: &Self) -> usize;

    fn target(this: &Self) -> &Self::Target;
}

impl<T: 'static> SharedPointer for Rc<T> {
    type Target = T;

    #[inline]
    fn address(this: &Self) -> usize {
        Rc::as_ptr(this) as usize
    }

    #[inline]
    fn target(this: &Self) -> &T {
        this
    }
}

impl<T: 'static> SharedPointer for Arc<T> {
    type Target = T;

    #[inline]
    fn address(this: &Self) -> usize {
        Arc::as_ptr(this) as usize
    }

    #[inline]
    fn target(this: &Self) -> &T {
        this
    }
}

fn equals_shared<P, S>(target: &S, x: &P, y: &P, cx: &mut EqualityContext) -> bool
where
    P: SharedPointer,
    S: EqualityStrategy<P::Target>,
{
    let (left, right) = (P::address(x), P::address(y));
    if left == right {
        return true;
    }
    if !cx.enter(left, right) {
        tracing::trace!(left, right, "cycle reached; pair treated as equal");
        return true;
    }
    let equal = ensure_sufficient_stack(|| target.equals(P::target(x), P::target(y), cx));
    cx.exit(left, right);
    equal
}

fn hash_shared<P, S>(target: &S, x: &P, cx: &mut EqualityContext) -> u64
where
    P: SharedPointer,
    S: EqualityStrategy<P::Target>,
{
    if !cx.enter_hash() {
        return CYCLE_SENTINEL;
    }
    let hash = ensure_sufficient_stack(|| target.hash(P::target(x), cx));
    cx.exit_hash();
    hash
}

/// `Rc`/`Arc` comparer with identity short-circuit and cycle detection.
pub struct ReferenceComparer<P: SharedPointer, S = ComparerHandle<<P as SharedPointer>::Target>> {
    target: S,
    _marker: PhantomData<fn(&P)>,
}

impl<P: SharedPointer, S: EqualityStrategy<P::Target>> ReferenceComparer<P, S> {
    pub fn new(target: S) -> Self {
        Self {
            target,
            _marker: PhantomData,
        }
    }
}

impl<P: SharedPointer, S: EqualityStrategy<P::Target>> EqualityStrategy<P>
    for ReferenceComparer<P, S>
{
    fn equals(&self, x: &P, y: &P, cx: &mut EqualityContext) -> bool {
        equals_shared(&self.target, x, y, cx)
    }

    fn hash(&self, x: &P, cx: &mut EqualityContext) -> u64 {
        hash_shared(&self.target, x, cx)
    }
}

/// `rc::Weak` comparer. A dangling pointer behaves like `None`.
pub struct WeakComparer<T: 'static, S = ComparerHandle<T>> {
    target: S,
    _marker: PhantomData<fn(&T)>,
}

impl<T: 'static, S: EqualityStrategy<T>> WeakComparer<T, S> {
    pub fn new(target: S) -> Self {
        Self {
            target,
            _marker: PhantomData,
        }
    }
}

impl<T: 'static, S: EqualityStrategy<T>> EqualityStrategy<Weak<T>> for WeakComparer<T, S> {
    fn equals(&self, x: &Weak<T>, y: &Weak<T>, cx: &mut EqualityContext) -> bool {
        match (x.upgrade(), y.upgrade()) {
            (Some(x), Some(y)) => equals_shared(&self.target, &x, &y, cx),
            (None, None) => true,
            _ => false,
        }
    }

    fn hash(&self, x: &Weak<T>, cx: &mut EqualityContext) -> u64 {
        match x.upgrade() {
            Some(x) => hash_shared(&self.target, &x, cx),
            None => fold_null(SEED),
        }
    }

    fn fold_into(&self, hash: u64, x: &Weak<T>, cx: &mut EqualityContext) -> u64 {
        match x.upgrade() {
            Some(x) => fold(hash, avalanche(hash_shared(&self.target, &x, cx))),
            None => fold_null(hash),
        }
    }
}

/// `Box` comparer: compares the contents.
///
/// Owned chains such as `Option<Box<Self>>` can be arbitrarily deep, so each
/// descent runs under `ensure_sufficient_stack`.
pub struct BoxComparer<T: 'static, S = ComparerHandle<T>> {
    inner: S,
    _marker: PhantomData<fn(&T)>,
}

impl<T: 'static, S: EqualityStrategy<T>> BoxComparer<T, S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T: 'static, S: EqualityStrategy<T>> EqualityStrategy<Box<T>> for BoxComparer<T, S> {
    fn equals(&self, x: &Box<T>, y: &Box<T>, cx: &mut EqualityContext) -> bool {
        ensure_sufficient_stack(|| self.inner.equals(x, y, cx))
    }

    fn hash(&self, x: &Box<T>, cx: &mut EqualityContext) -> u64 {
        ensure_sufficient_stack(|| self.inner.hash(x, cx))
    }

    fn fold_into(&self, hash: u64, x: &Box<T>, cx: &mut EqualityContext) -> u64 {
        ensure_sufficient_stack(|| self.inner.fold_into(hash, x, cx))
    }
}

/// `RefCell` comparer: compares the contents under shared borrows.
///
/// A cell that is mutably borrowed while being compared compares unequal to
/// everything and hashes to the null sentinel.
pub struct RefCellComparer<T: 'static, S = ComparerHandle<T>> {
    inner: S,
    _marker: PhantomData<fn(&T)>,
}

impl<T: 'static, S: EqualityStrategy<T>> RefCellComparer<T, S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T: 'static, S: EqualityStrategy<T>> EqualityStrategy<RefCell<T>> for RefCellComparer<T, S> {
    fn equals(&self, x: &RefCell<T>, y: &RefCell<T>, cx: &mut EqualityContext) -> bool {
        if let (Ok(x), Ok(y)) = (x.try_borrow(), y.try_borrow()) {
            self.inner.equals(&x, &y, cx)
        } else {
            tracing::debug!("RefCell mutably borrowed during structural comparison");
            false
        }
    }

    fn hash(&self, x: &RefCell<T>, cx: &mut EqualityContext) -> u64 {
        match x.try_borrow() {
            Ok(x) => self.inner.hash(&x, cx),
            Err(_) => fold_null(SEED),
        }
    }

    fn fold_into(&self, hash: u64, x: &RefCell<T>, cx: &mut EqualityContext) -> u64 {
        match x.try_borrow() {
            Ok(x) => self.inner.fold_into(hash, &x, cx),
            Err(_) => fold_null(hash),
        }
    }
}
