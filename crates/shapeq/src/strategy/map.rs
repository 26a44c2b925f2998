//! Order-independent key-value map comparer.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::context::EqualityContext;
use crate::hash::{accumulate_unordered, combine, fold, SEED};
use crate::registry::ComparerHandle;

use super::{EqualityStrategy, Strategy};

/// Read access to a key-value map.
pub trait MapAccess: 'static {
    type Key: 'static;
    type Value: 'static;

    fn count(&self) -> usize;

    fn entries(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;
}

impl<K: 'static, V: 'static, S: BuildHasher + 'static> MapAccess for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl<K: 'static, V: 'static> MapAccess for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

/// Right-hand entries sharing one key hash.
type Bucket<'a, K, V> = SmallVec<[(&'a K, &'a V); 1]>;

/// Compares maps by content, ignoring iteration order.
///
/// Keys are matched structurally, not through the map's own lookup, so two
/// maps whose keys are equal only under the key strategy still match.
pub struct MapComparer<M: MapAccess> {
    key: Strategy<M::Key>,
    value: Strategy<M::Value>,
}

impl<M: MapAccess> MapComparer<M> {
    /// Comparer over the registry's key and value comparers.
    pub fn new(key: ComparerHandle<M::Key>, value: ComparerHandle<M::Value>) -> Self {
        Self::with_strategies(key, value)
    }

    /// Comparer with caller-supplied key and value strategies.
    pub fn with_strategies(
        key: impl EqualityStrategy<M::Key> + 'static,
        value: impl EqualityStrategy<M::Value> + 'static,
    ) -> Self {
        Self {
            key: Box::new(key),
            value: Box::new(value),
        }
    }
}

impl<M: MapAccess> EqualityStrategy<M> for MapComparer<M> {
    fn equals(&self, x: &M, y: &M, cx: &mut EqualityContext) -> bool {
        if x.count() != y.count() {
            return false;
        }

        let mut buckets: FxHashMap<u64, Bucket<'_, M::Key, M::Value>> =
            FxHashMap::with_capacity_and_hasher(y.count(), Default::default());
        for (key, value) in y.entries() {
            buckets
                .entry(self.key.hash(key, cx))
                .or_default()
                .push((key, value));
        }

        for (key, value) in x.entries() {
            let Some(bucket) = buckets.get_mut(&self.key.hash(key, cx)) else {
                return false;
            };
            let Some(at) = bucket
                .iter()
                .position(|&(other, _)| self.key.equals(key, other, cx))
            else {
                return false;
            };
            let (_, other) = bucket.swap_remove(at);
            if !self.value.equals(value, other, cx) {
                return false;
            }
        }
        true
    }

    fn hash(&self, x: &M, cx: &mut EqualityContext) -> u64 {
        let mut acc = 0_u64;
        for (key, value) in x.entries() {
            let key_hash = self.key.hash(key, cx);
            acc = accumulate_unordered(acc, self.value.fold_into(key_hash, value, cx));
        }
        fold(combine(SEED, acc), x.count() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests panic on unexpected state")]
mod tests;
