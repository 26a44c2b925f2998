use pretty_assertions::assert_eq;

use super::*;
use crate::hash::hash_scalar;
use crate::strategy::{FnStrategy, ScalarComparer};

type Scores = HashMap<String, i32>;

fn scores() -> MapComparer<Scores> {
    MapComparer::with_strategies(ScalarComparer::new(), ScalarComparer::new())
}

fn map(entries: &[(&str, i32)]) -> Scores {
    entries
        .iter()
        .map(|&(key, value)| (key.to_owned(), value))
        .collect()
}

#[test]
fn insertion_order_is_irrelevant() {
    let cmp = scores();
    let mut cx = EqualityContext::new();

    let mut forward = Scores::default();
    forward.insert("a".into(), 1);
    forward.insert("b".into(), 2);
    let mut backward = Scores::default();
    backward.insert("b".into(), 2);
    backward.insert("a".into(), 1);

    assert!(cmp.equals(&forward, &backward, &mut cx));
    assert_eq!(cmp.hash(&forward, &mut cx), cmp.hash(&backward, &mut cx));
}

#[test]
fn values_and_keys_both_matter() {
    let cmp = scores();
    let mut cx = EqualityContext::new();
    let base = map(&[("a", 1), ("b", 2)]);
    assert!(!cmp.equals(&base, &map(&[("a", 1), ("b", 3)]), &mut cx));
    assert!(!cmp.equals(&base, &map(&[("a", 1), ("c", 2)]), &mut cx));
    assert!(!cmp.equals(&base, &map(&[("a", 1)]), &mut cx));
    assert!(cmp.equals(&Scores::default(), &Scores::default(), &mut cx));
}

#[test]
fn swapped_values_hash_differently() {
    let cmp = scores();
    let mut cx = EqualityContext::new();
    assert_ne!(
        cmp.hash(&map(&[("a", 1), ("b", 2)]), &mut cx),
        cmp.hash(&map(&[("a", 2), ("b", 1)]), &mut cx)
    );
}

#[test]
fn keys_match_structurally_not_by_map_lookup() {
    // Keys compare case-insensitively, which the maps' own hashing ignores.
    let cmp = MapComparer::<Scores>::with_strategies(
        FnStrategy::new(
            |x: &String, y: &String| x.eq_ignore_ascii_case(y),
            |x: &String| hash_scalar(&x.to_ascii_lowercase()),
        ),
        ScalarComparer::new(),
    );
    let mut cx = EqualityContext::new();
    let upper = map(&[("A", 1), ("B", 2)]);
    let lower = map(&[("b", 2), ("a", 1)]);
    assert!(cmp.equals(&upper, &lower, &mut cx));
    assert_eq!(cmp.hash(&upper, &mut cx), cmp.hash(&lower, &mut cx));
}

#[test]
fn each_right_entry_matches_once() {
    // Every key collapses into one bucket; a matched right entry is consumed.
    let cmp = MapComparer::<Scores>::with_strategies(
        FnStrategy::new(|_: &String, _: &String| true, |_: &String| 0),
        ScalarComparer::new(),
    );
    let mut cx = EqualityContext::new();
    assert!(!cmp.equals(
        &map(&[("a", 1), ("b", 1)]),
        &map(&[("c", 1), ("d", 2)]),
        &mut cx
    ));
}

#[test]
fn btree_and_hash_maps_hash_alike() {
    let hashed = scores();
    let sorted = MapComparer::<BTreeMap<String, i32>>::with_strategies(
        ScalarComparer::new(),
        ScalarComparer::new(),
    );
    let mut cx = EqualityContext::new();
    let entries = [("x", 10), ("y", 20), ("z", 30)];
    let tree: BTreeMap<String, i32> = entries
        .iter()
        .map(|&(key, value)| (key.to_owned(), value))
        .collect();
    assert_eq!(
        hashed.hash(&map(&entries), &mut cx),
        sorted.hash(&tree, &mut cx)
    );
}

mod proptest_maps {
    use super::{scores, EqualityContext, EqualityStrategy, Scores};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn permuted_insertion_is_equal(
            entries in proptest::collection::hash_map("[a-d]{1,2}", any::<i32>(), 0..12),
        ) {
            let cmp = scores();
            let mut cx = EqualityContext::new();
            let mut pairs: Vec<(String, i32)> = entries.into_iter().collect();
            let forward: Scores = pairs.iter().cloned().collect();
            pairs.reverse();
            let backward: Scores = pairs.into_iter().collect();

            prop_assert!(cmp.equals(&forward, &backward, &mut cx));
            prop_assert_eq!(cmp.hash(&forward, &mut cx), cmp.hash(&backward, &mut cx));
        }
    }
}
