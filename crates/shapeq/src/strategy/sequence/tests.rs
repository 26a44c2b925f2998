use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;
use crate::hash::{fold_null, hash_scalar};
use crate::strategy::{OptionComparer, ScalarComparer};

/// Element-by-element reference for `equals_slices`.
fn naive_equals(x: &[i32], y: &[i32]) -> bool {
    x.len() == y.len() && x.iter().zip(y).all(|(l, r)| l == r)
}

/// Element-by-element reference for `hash_slice`.
fn naive_hash(x: &[i32]) -> u64 {
    let hash = x.iter().fold(SEED, |hash, item| fold(hash, hash_scalar(item)));
    fold(hash, x.len() as u64)
}

fn list() -> SliceComparer<Vec<i32>, i32, ScalarComparer<i32>> {
    SliceComparer::new(Vec::as_slice, ScalarComparer::new())
}

/// Element strategy that counts how often it is asked to compare.
#[derive(Default)]
struct Counting {
    calls: AtomicUsize,
}

impl EqualityStrategy<i32> for Counting {
    fn equals(&self, x: &i32, y: &i32, _cx: &mut EqualityContext) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        x == y
    }

    fn hash(&self, x: &i32, _cx: &mut EqualityContext) -> u64 {
        hash_scalar(x)
    }
}

#[test]
fn unrolled_matches_naive_for_every_length_up_to_33() {
    let mut cx = EqualityContext::new();
    for len in 0..=33 {
        let base: Vec<i32> = (0..len).collect();
        assert_eq!(
            equals_slices(&ScalarComparer::new(), &base, &base, &mut cx),
            naive_equals(&base, &base),
            "len {len}"
        );
        assert_eq!(
            hash_slice(&ScalarComparer::new(), &base, &mut cx),
            naive_hash(&base),
            "len {len}"
        );

        // A difference at every position, including the scalar tail.
        for at in 0..base.len() {
            let mut changed = base.clone();
            changed[at] = -1;
            assert!(
                !equals_slices(&ScalarComparer::new(), &base, &changed, &mut cx),
                "len {len}, changed at {at}"
            );
        }
    }
}

#[test]
fn length_mismatch_skips_element_walk() {
    let counting = Counting::default();
    let mut cx = EqualityContext::new();
    assert!(!equals_slices(&counting, &[1, 2, 3], &[1, 2, 3, 4], &mut cx));
    assert_eq!(counting.calls.load(Ordering::Relaxed), 0);

    assert!(equals_slices(&counting, &[1, 2, 3, 4, 5], &[1, 2, 3, 4, 5], &mut cx));
    assert_eq!(counting.calls.load(Ordering::Relaxed), 5);
}

#[test]
fn first_difference_stops_the_walk() {
    let counting = Counting::default();
    let mut cx = EqualityContext::new();
    let left: Vec<i32> = (0..12).collect();
    let mut right = left.clone();
    right[1] = 99;
    assert!(!equals_slices(&counting, &left, &right, &mut cx));
    assert!(counting.calls.load(Ordering::Relaxed) <= 4);
}

#[test]
fn order_matters() {
    let cmp = list();
    let mut cx = EqualityContext::new();
    assert!(!cmp.equals(&vec![1, 2, 3], &vec![3, 2, 1], &mut cx));
    assert_ne!(
        cmp.hash(&vec![1, 2, 3], &mut cx),
        cmp.hash(&vec![3, 2, 1], &mut cx)
    );
}

#[test]
fn nullable_elements_fold_null_sentinel() {
    let cmp = SliceComparer::<Vec<Option<i32>>, Option<i32>, _>::new(
        Vec::as_slice,
        OptionComparer::new(ScalarComparer::<i32>::new()),
    );
    let mut cx = EqualityContext::new();
    let expected = fold(fold_null(fold(SEED, hash_scalar(&1_i32))), 2);
    assert_eq!(cmp.hash(&vec![Some(1), None], &mut cx), expected);
    assert_ne!(
        cmp.hash(&vec![None, None], &mut cx),
        cmp.hash(&vec![None], &mut cx)
    );
}

#[test]
fn iterator_walk_agrees_with_slice_walk() {
    let cmp = IterComparer::<VecDeque<i32>, _>::new(ScalarComparer::new());
    let mut cx = EqualityContext::new();
    for len in 0..=17 {
        let items: Vec<i32> = (0..len).map(|i| i * 7 - 3).collect();
        let deque: VecDeque<i32> = items.iter().copied().collect();

        assert!(cmp.equals(&deque, &deque.clone(), &mut cx), "len {len}");
        assert_eq!(cmp.hash(&deque, &mut cx), naive_hash(&items), "len {len}");

        if let Some(last) = items.len().checked_sub(1) {
            let mut changed = deque.clone();
            changed[last] += 1;
            assert!(!cmp.equals(&deque, &changed, &mut cx), "len {len}");
        }
    }
}

#[test]
fn sorted_sets_compare_in_iteration_order() {
    let cmp = IterComparer::<BTreeSet<i32>, _>::new(ScalarComparer::new());
    let mut cx = EqualityContext::new();
    let a: BTreeSet<i32> = [3, 1, 2].into_iter().collect();
    let b: BTreeSet<i32> = [1, 2, 3].into_iter().collect();
    let c: BTreeSet<i32> = [1, 2].into_iter().collect();
    assert!(cmp.equals(&a, &b, &mut cx));
    assert!(!cmp.equals(&a, &c, &mut cx));
}

#[test]
fn linked_lists_short_circuit_on_count() {
    let cmp = IterComparer::<LinkedList<i32>, _>::new(Counting::default());
    let mut cx = EqualityContext::new();
    let a: LinkedList<i32> = (0..5).collect();
    let b: LinkedList<i32> = (0..6).collect();
    assert!(!cmp.equals(&a, &b, &mut cx));
    assert_eq!(cmp.element.calls.load(Ordering::Relaxed), 0);
}

mod proptest_unrolled {
    use super::{hash_slice, naive_equals, naive_hash, EqualityContext, VecDeque};
    use crate::strategy::{equals_slices, EqualityStrategy, IterComparer, ScalarComparer};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn slice_equality_matches_naive(
            x in proptest::collection::vec(-3_i32..3, 0..40),
            y in proptest::collection::vec(-3_i32..3, 0..40),
        ) {
            let mut cx = EqualityContext::new();
            prop_assert_eq!(
                equals_slices(&ScalarComparer::new(), &x, &y, &mut cx),
                naive_equals(&x, &y)
            );
        }

        #[test]
        fn slice_hash_matches_naive(x in proptest::collection::vec(any::<i32>(), 0..64)) {
            let mut cx = EqualityContext::new();
            prop_assert_eq!(hash_slice(&ScalarComparer::new(), &x, &mut cx), naive_hash(&x));
        }

        #[test]
        fn iterator_equality_matches_naive(
            x in proptest::collection::vec(-2_i32..2, 0..24),
            y in proptest::collection::vec(-2_i32..2, 0..24),
        ) {
            let cmp = IterComparer::<VecDeque<i32>, _>::new(ScalarComparer::new());
            let mut cx = EqualityContext::new();
            let (left, right): (VecDeque<i32>, VecDeque<i32>) =
                (x.iter().copied().collect(), y.iter().copied().collect());
            prop_assert_eq!(cmp.equals(&left, &right, &mut cx), naive_equals(&x, &y));
        }
    }
}
