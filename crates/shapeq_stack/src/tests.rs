use super::*;

struct Link {
    next: Option<Box<Link>>,
}

fn chain(len: usize) -> Link {
    let mut head = Link { next: None };
    for _ in 1..len {
        head = Link {
            next: Some(Box::new(head)),
        };
    }
    head
}

fn depth(link: &Link) -> usize {
    ensure_sufficient_stack(|| match &link.next {
        Some(next) => depth(next) + 1,
        None => 1,
    })
}

fn drop_iteratively(mut link: Link) {
    while let Some(next) = link.next.take() {
        link = *next;
    }
}

#[test]
fn shallow_chain_depth() {
    let list = chain(10);
    assert_eq!(depth(&list), 10);
    drop_iteratively(list);
}

#[test]
fn deep_chain_depth() {
    // Deep enough to overflow an 8 MiB stack without growth.
    let list = chain(200_000);
    assert_eq!(depth(&list), 200_000);
    drop_iteratively(list);
}

#[test]
#[cfg(not(target_arch = "wasm32"))]
fn red_zone_above_remaining_moves_to_new_segment() {
    let before = remaining_stack().unwrap_or(0);
    let budget = StackBudget {
        red_zone: before + 1,
        segment: 4 * 1024 * 1024,
    };
    let inside = budget.run(|| remaining_stack().unwrap_or(0));
    assert!(inside > 3 * 1024 * 1024, "remaining {inside} after growth");
}

#[test]
fn passes_through_closure_result() {
    assert_eq!(ensure_sufficient_stack(|| 42), 42);
    let result: Result<u64, &str> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(result, Ok(7));
}
