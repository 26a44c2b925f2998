//! Structural wrapper for use as a hash map key.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::registry::CompiledComparer;
use crate::{comparer, Structural, StructuralError};

/// A value whose `Hash` and `Eq` are its structural hash and equality.
///
/// The structural hash is computed once, at construction. The value must not
/// be mutated through interior mutability while the key is in a map.
pub struct StructuralKey<T: 'static> {
    value: T,
    hash: u64,
    comparer: &'static CompiledComparer<T>,
}

impl<T: Structural> StructuralKey<T> {
    pub fn new(value: T) -> Result<Self, StructuralError> {
        let comparer = comparer::<T>()?;
        Ok(Self {
            hash: comparer.hash(&value),
            value,
            comparer,
        })
    }
}

impl<T: 'static> StructuralKey<T> {
    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    /// The cached structural hash.
    pub fn structural_hash(&self) -> u64 {
        self.hash
    }
}

impl<T: 'static> PartialEq for StructuralKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.comparer.equals(&self.value, &other.value)
    }
}

impl<T: 'static> Eq for StructuralKey<T> {}

impl<T: 'static> Hash for StructuralKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<T: Clone + 'static> Clone for StructuralKey<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            hash: self.hash,
            comparer: self.comparer,
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for StructuralKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuralKey")
            .field("value", &self.value)
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish()
    }
}
