//! `Option` comparer.

use std::marker::PhantomData;

use crate::context::EqualityContext;
use crate::hash::{fold_null, SEED};
use crate::registry::ComparerHandle;

use super::EqualityStrategy;

/// `None` equals only `None`. In a running hash `None` contributes the null
/// sentinel, so a composite whose fields are all `None` does not hash to the
/// seed.
pub struct OptionComparer<T: 'static, S = ComparerHandle<T>> {
    inner: S,
    _marker: PhantomData<fn(&T)>,
}

impl<T: 'static, S: EqualityStrategy<T>> OptionComparer<T, S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T: 'static, S: EqualityStrategy<T>> EqualityStrategy<Option<T>> for OptionComparer<T, S> {
    #[inline]
    fn equals(&self, x: &Option<T>, y: &Option<T>, cx: &mut EqualityContext) -> bool {
        match (x, y) {
            (Some(x), Some(y)) => self.inner.equals(x, y, cx),
            (None, None) => true,
            _ => false,
        }
    }

    #[inline]
    fn hash(&self, x: &Option<T>, cx: &mut EqualityContext) -> u64 {
        match x {
            Some(x) => self.inner.hash(x, cx),
            None => fold_null(SEED),
        }
    }

    #[inline]
    fn fold_into(&self, hash: u64, x: &Option<T>, cx: &mut EqualityContext) -> u64 {
        match x {
            Some(x) => self.inner.fold_into(hash, x, cx),
            None => fold_null(hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::fold;
    use crate::strategy::ScalarComparer;

    fn comparer() -> OptionComparer<i32, ScalarComparer<i32>> {
        OptionComparer::new(ScalarComparer::new())
    }

    #[test]
    fn none_equals_only_none() {
        let cmp = comparer();
        let mut cx = EqualityContext::new();
        assert!(cmp.equals(&None, &None, &mut cx));
        assert!(!cmp.equals(&None, &Some(0), &mut cx));
        assert!(!cmp.equals(&Some(0), &None, &mut cx));
        assert!(cmp.equals(&Some(3), &Some(3), &mut cx));
    }

    #[test]
    fn none_folds_to_null_sentinel() {
        let cmp = comparer();
        let mut cx = EqualityContext::new();
        let running = fold(SEED, 17);
        assert_eq!(cmp.fold_into(running, &None, &mut cx), fold_null(running));
        assert_ne!(
            cmp.fold_into(running, &None, &mut cx),
            cmp.fold_into(running, &Some(0), &mut cx)
        );
    }
}
