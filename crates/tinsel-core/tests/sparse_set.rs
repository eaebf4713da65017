//! SparseSet generational handle tests.
//!
//! Widget handles are `IndexSlot`s, so these cover the properties the widget
//! tree relies on: stale handles never resolve, slots are reused, and
//! iteration only yields live values.

use tinsel_core::alloc::{IndexSlot, SparseSet};

#[test]
fn test_push_and_get() {
    let mut set = SparseSet::new();

    let idx = set.push(42);
    let idx2 = set.push(100);

    assert_eq!(*set.get(idx), 42);
    assert_eq!(*set.get(idx2), 100);
    assert_eq!(set.len(), 2);
}

#[test]
fn test_get_mut() {
    let mut set = SparseSet::new();

    let idx = set.push(42);
    *set.get_mut(idx) = 100;

    assert_eq!(*set.get(idx), 100);
}

#[test]
fn test_try_get_out_of_range_returns_none() {
    let set = SparseSet::<i32>::new();
    assert_eq!(set.try_get(IndexSlot::new(0, 999)), None);
}

#[test]
fn test_stale_handle_after_reuse() {
    let mut set = SparseSet::new();

    let old = set.push("first");
    set.remove(old);
    let new = set.push("second");

    assert_eq!(old.index(), new.index());
    assert!(!set.contains(old));
    assert_eq!(set.try_get(old), None);
    assert_eq!(set.try_get_mut(old), None);
    assert_eq!(set.try_get(new), Some(&"second"));
}

#[test]
#[should_panic(expected = "use after free")]
fn test_use_after_free_panics() {
    let mut set = SparseSet::new();
    let idx = set.push(1u32);
    set.remove(idx);
    let _ = set.get(idx);
}

#[test]
fn test_remove_twice_returns_none() {
    let mut set = SparseSet::new();
    let idx = set.push(7);
    assert_eq!(set.remove(idx), Some(7));
    assert_eq!(set.remove(idx), None);
    assert!(set.is_empty());
}

#[test]
fn test_iteration_yields_live_handles() {
    let mut set = SparseSet::new();
    let a = set.push(10);
    let b = set.push(20);
    let c = set.push(30);
    set.remove(b);

    let live: Vec<_> = set.iter().collect();
    assert_eq!(live, vec![(a, &10), (c, &30)]);
}

#[test]
fn test_stress_removals_and_reuses() {
    let mut set = SparseSet::new();
    let mut handles: Vec<_> = (0..1000).map(|i| set.push(i)).collect();

    for handle in handles.iter().step_by(2) {
        set.remove(*handle);
    }
    assert_eq!(set.len(), 500);

    for (i, handle) in handles.iter_mut().enumerate().step_by(2) {
        *handle = set.push(i + 10_000);
    }
    assert_eq!(set.len(), 1000);
    for (i, handle) in handles.iter().enumerate() {
        let expected = if i % 2 == 0 { i + 10_000 } else { i };
        assert_eq!(*set.get(*handle), expected);
    }
}
