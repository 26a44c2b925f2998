use pretty_assertions::assert_eq;

use super::*;

#[test]
fn pair_reentry_reports_cycle() {
    let mut cx = EqualityContext::new();
    assert!(cx.enter(1, 2));
    assert!(!cx.enter(1, 2));
    // Direction matters: (2, 1) is a different comparison.
    assert!(cx.enter(2, 1));
    cx.exit(1, 2);
    cx.exit(2, 1);
    assert!(cx.is_idle());
}

#[test]
fn hash_depth_stops_at_limit() {
    let mut cx = EqualityContext::new();
    for _ in 0..MAX_HASH_DEPTH {
        assert!(cx.enter_hash());
    }
    assert!(!cx.enter_hash());
    assert_eq!(cx.hash_depth(), MAX_HASH_DEPTH);

    cx.exit_hash();
    assert!(cx.enter_hash());
    for _ in 0..MAX_HASH_DEPTH {
        cx.exit_hash();
    }
    assert!(cx.is_idle());
}

#[test]
fn reset_clears_everything() {
    let mut cx = EqualityContext::new();
    cx.enter(1, 2);
    cx.enter_hash();
    assert!(!cx.is_idle());
    cx.reset();
    assert!(cx.is_idle());
}

#[test]
fn zero_retention_is_rejected() {
    let err = ContextPool::new(0).unwrap_err();
    assert!(matches!(
        err,
        StructuralError::InvalidArgument {
            what: "max_retained",
            ..
        }
    ));
}

#[test]
fn pool_returns_reset_contexts() {
    let pool = ContextPool::new(2).unwrap();
    let mut cx = pool.rent();
    cx.enter(5, 6);
    pool.give_back(cx);
    assert_eq!(pool.retained(), 1);

    let cx = pool.rent();
    assert!(cx.is_idle());
    assert_eq!(pool.retained(), 0);
}

#[test]
fn pool_retains_at_most_configured() {
    let pool = ContextPool::new(2).unwrap();
    for _ in 0..5 {
        pool.give_back(EqualityContext::new());
    }
    assert_eq!(pool.retained(), 2);
}

#[test]
fn scoped_returns_context_to_pool() {
    let pool = ContextPool::new(4).unwrap();
    let entered = pool.scoped(|cx| cx.enter(7, 8));
    assert!(entered);
    assert_eq!(pool.retained(), 1);
    pool.scoped(|cx| assert!(cx.is_idle()));
}

#[test]
fn global_pool_uses_default_retention() {
    assert_eq!(ContextPool::global().max_retained(), DEFAULT_RETAINED_CONTEXTS);
}
