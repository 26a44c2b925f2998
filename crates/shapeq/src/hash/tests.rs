use pretty_assertions::assert_eq;

use super::*;

/// Word-at-a-time reference for `hash_memory`, without block grouping.
fn naive_hash_memory(bytes: &[u8], seed: u64) -> u64 {
    let mut hash = seed;
    let mut words = bytes.chunks_exact(4);
    for word in &mut words {
        hash = fold(hash, read_word(word, 0));
    }
    for &byte in words.remainder() {
        hash = fold(hash, u64::from(byte));
    }
    fold(hash, bytes.len() as u64)
}

#[test]
fn fold_is_order_sensitive() {
    let forward = fold(fold(SEED, 1), 2);
    let backward = fold(fold(SEED, 2), 1);
    assert_ne!(forward, backward);
}

#[test]
fn null_runs_do_not_collapse_to_seed() {
    let mut hash = SEED;
    let mut seen = vec![hash];
    for _ in 0..8 {
        hash = fold_null(hash);
        assert!(!seen.contains(&hash), "null run revisited an earlier hash");
        seen.push(hash);
    }
}

#[test]
fn null_differs_from_zero_contribution() {
    assert_ne!(fold_null(SEED), fold(SEED, 0));
}

#[test]
fn unordered_accumulation_commutes() {
    let a = accumulate_unordered(accumulate_unordered(0, 11), 42);
    let b = accumulate_unordered(accumulate_unordered(0, 42), 11);
    assert_eq!(a, b);
}

#[test]
fn scalar_hash_is_deterministic() {
    assert_eq!(hash_scalar(&42_i32), hash_scalar(&42_i32));
    assert_eq!(hash_scalar("abc"), hash_scalar(&String::from("abc")));
    assert_ne!(hash_scalar(&1_u64), hash_scalar(&2_u64));
}

#[test]
fn block_hash_matches_word_reference_for_all_tails() {
    let bytes: Vec<u8> = (0..=200_u8).collect();
    for len in 0..bytes.len() {
        assert_eq!(
            hash_memory(&bytes[..len], SEED),
            naive_hash_memory(&bytes[..len], SEED),
            "length {len}"
        );
    }
}

#[test]
fn block_hash_depends_on_length() {
    assert_ne!(hash_memory(&[0, 0, 0], SEED), hash_memory(&[0, 0, 0, 0], SEED));
}

#[test]
fn region_rejects_out_of_bounds() {
    let buffer = [1_u8, 2, 3, 4];

    let err = MemoryRegion::new(&buffer, 2, 3).unwrap_err();
    assert!(matches!(err, StructuralError::InvalidArgument { .. }));

    let err = MemoryRegion::new(&buffer, usize::MAX, 2).unwrap_err();
    assert!(matches!(err, StructuralError::InvalidArgument { .. }));
}

#[test]
fn region_windows_compare_contents() {
    let buffer = [7_u8, 1, 2, 7, 1, 2];
    let first = MemoryRegion::new(&buffer, 1, 2).unwrap();
    let second = MemoryRegion::new(&buffer, 4, 2).unwrap();

    assert_eq!(first.as_bytes(), &[1, 2]);
    assert!(first.same_contents(&second));
    assert_eq!(first.hash(SEED), second.hash(SEED));
    assert_eq!(MemoryRegion::whole(&buffer).len(), 6);
    assert!(MemoryRegion::new(&buffer, 6, 0).unwrap().is_empty());
}
