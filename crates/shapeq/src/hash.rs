//! Hash seed, combine function and block-wise memory hashing.
//!
//! Every strategy folds its contributions through [`fold`], so hashes are
//! order-sensitive and reproducible across runs and processes. The only
//! order-independent combinator is [`accumulate_unordered`], used by maps.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::StructuralError;

/// Starting value of every running hash.
pub const SEED: u64 = 0x2d35_8dcc_aa6c_78a5;

/// Odd multiplier applied to the running hash before each contribution.
pub const PRIME: u64 = 397;

/// Rotation used by [`combine`].
pub const ROTATE: u32 = 5;

/// Contribution of a shared reference below the hash depth limit.
pub const CYCLE_SENTINEL: u64 = 0x9e37_79b9_7f4a_7c15;

/// Bytes per memory word in [`hash_memory`].
const WORD: usize = 4;

/// Words folded per block iteration in [`hash_memory`].
const BLOCK_WORDS: usize = 8;

const BLOCK: usize = WORD * BLOCK_WORDS;

/// XOR-rotate mixing of a running hash with one contribution.
#[inline]
pub fn combine(hash: u64, value: u64) -> u64 {
    hash.rotate_left(ROTATE) ^ value
}

/// Left-to-right fold step: `combine(hash * PRIME, value)`.
#[inline]
pub fn fold(hash: u64, value: u64) -> u64 {
    combine(hash.wrapping_mul(PRIME), value)
}

/// Fold step for an absent value.
///
/// Bit-inverts the scaled running hash, so a run of nulls never collapses
/// back to [`SEED`].
#[inline]
pub fn fold_null(hash: u64) -> u64 {
    !hash.wrapping_mul(PRIME)
}

/// Final avalanche (murmur3 `fmix64`).
#[inline]
pub fn avalanche(mut value: u64) -> u64 {
    value ^= value >> 33;
    value = value.wrapping_mul(0xff51_afd7_ed55_8ccd);
    value ^= value >> 33;
    value = value.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    value ^= value >> 33;
    value
}

/// Commutative accumulation of one map entry hash.
///
/// Entries are avalanched before the wrapping sum so that structurally
/// related entries do not cancel each other.
#[inline]
pub fn accumulate_unordered(acc: u64, entry: u64) -> u64 {
    acc.wrapping_add(avalanche(entry))
}

/// Hash a value through its own `Hash` impl with the deterministic `FxHasher`.
#[inline]
pub fn hash_scalar<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

#[inline]
fn read_word(bytes: &[u8], at: usize) -> u64 {
    u64::from(u32::from_le_bytes([
        bytes[at],
        bytes[at + 1],
        bytes[at + 2],
        bytes[at + 3],
    ]))
}

/// Block-wise hash of raw memory.
///
/// Folds 32-byte blocks (8 words) per iteration, then single 4-byte words,
/// then the trailing bytes, and finally the byte length.
pub fn hash_memory(bytes: &[u8], seed: u64) -> u64 {
    let mut hash = seed;

    let mut blocks = bytes.chunks_exact(BLOCK);
    for block in &mut blocks {
        hash = fold(hash, read_word(block, 0));
        hash = fold(hash, read_word(block, 4));
        hash = fold(hash, read_word(block, 8));
        hash = fold(hash, read_word(block, 12));
        hash = fold(hash, read_word(block, 16));
        hash = fold(hash, read_word(block, 20));
        hash = fold(hash, read_word(block, 24));
        hash = fold(hash, read_word(block, 28));
    }

    let mut words = blocks.remainder().chunks_exact(WORD);
    for word in &mut words {
        hash = fold(hash, read_word(word, 0));
    }
    for &byte in words.remainder() {
        hash = fold(hash, u64::from(byte));
    }

    fold(hash, bytes.len() as u64)
}

/// A bounds-checked window into a byte buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryRegion<'a> {
    bytes: &'a [u8],
}

impl<'a> MemoryRegion<'a> {
    /// Window of `len` bytes starting at `offset`.
    ///
    /// Fails with `InvalidArgument` when the window does not fit in `bytes`.
    pub fn new(bytes: &'a [u8], offset: usize, len: usize) -> Result<Self, StructuralError> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= bytes.len())
            .ok_or_else(|| {
                StructuralError::invalid_argument(
                    "memory region",
                    format!(
                        "offset {offset} + length {len} exceeds buffer of {} bytes",
                        bytes.len()
                    ),
                )
            })?;
        Ok(Self {
            bytes: &bytes[offset..end],
        })
    }

    /// Window covering all of `bytes`.
    pub fn whole(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte-for-byte equality with another region.
    pub fn same_contents(&self, other: &MemoryRegion<'_>) -> bool {
        self.bytes == other.bytes
    }

    pub fn hash(&self, seed: u64) -> u64 {
        hash_memory(self.bytes, seed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests panic on unexpected state")]
mod tests;
