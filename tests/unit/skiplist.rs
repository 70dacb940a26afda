//! Ordered multiset tests against the documented container contract.

use std::cmp::Ordering;

use blockmat::collection::{Duplicates, Insert, SkipList, Visit};

fn list(duplicates: Duplicates) -> SkipList<i32, fn(&i32, &i32) -> Ordering> {
    SkipList::with_rng_seed(i32::cmp, duplicates, 99)
}

#[test]
fn test_count_matches_distinct_payloads() {
    let mut multiset = list(Duplicates::Reject);
    for v in [5, 1, 3, 5, 1, 1] {
        let _ = multiset.insert(v);
    }
    assert_eq!(multiset.len(), 3);
}

#[test]
fn test_drain_in_order() {
    let mut multiset = list(Duplicates::Reject);
    for v in [5, 1, 3] {
        assert_eq!(multiset.insert(v), Insert::Inserted);
    }
    assert_eq!(multiset.nth(0), Some(&1));

    let mut drained = Vec::new();
    multiset.for_each(|&v| {
        drained.push(v);
        Visit::DELETE
    });
    assert_eq!(drained, vec![1, 3, 5]);
    assert!(multiset.is_empty());
}

#[test]
fn test_delete_only_element_then_search_misses() {
    let mut multiset = list(Duplicates::Reject);
    let _ = multiset.insert(10);
    let _ = multiset.insert(20);
    assert_eq!(multiset.remove(&10), Some(10));
    assert_eq!(multiset.search(&10), None);
    assert_eq!(multiset.search(&20), Some(&20));
}

#[test]
fn test_large_ordered_traversal() {
    let mut multiset = list(Duplicates::Reject);
    // Insert in a scrambled order.
    for v in (0..500).map(|i| (i * 263) % 500) {
        assert_eq!(multiset.insert(v), Insert::Inserted);
    }
    assert_eq!(multiset.len(), 500);
    let mut prev = -1;
    multiset.for_each(|&v| {
        assert!(v > prev, "{v} after {prev}");
        prev = v;
        Visit::CONTINUE
    });
    assert_eq!(prev, 499);
}

#[test]
fn test_duplicates_all_retained_when_allowed() {
    let mut multiset = list(Duplicates::Allow);
    for v in [7, 7, 7, 1] {
        assert_eq!(multiset.insert(v), Insert::Inserted);
    }
    assert_eq!(multiset.len(), 4);
    // Removing one equal payload leaves the rest.
    assert_eq!(multiset.remove(&7), Some(7));
    assert_eq!(multiset.len(), 3);
    assert_eq!(multiset.search(&7), Some(&7));
}

#[test]
fn test_delete_during_traversal_keeps_structure() {
    let mut multiset = list(Duplicates::Reject);
    for v in 0..100 {
        let _ = multiset.insert(v);
    }
    // Delete a band in the middle mid-walk, then stop early.
    multiset.for_each(|&v| match v {
        30..=59 => Visit::DELETE,
        80 => Visit::STOP,
        _ => Visit::CONTINUE,
    });
    assert_eq!(multiset.len(), 70);
    assert_eq!(multiset.search(&45), None);
    assert_eq!(multiset.search(&60), Some(&60));
    // Structure still sound for ordered drain and reinsertion.
    let _ = multiset.insert(45);
    let mut drained = Vec::new();
    multiset.for_each(|&v| {
        drained.push(v);
        Visit::DELETE
    });
    assert_eq!(drained.len(), 71);
    assert!(drained.windows(2).all(|w| w[0] < w[1]));
}
