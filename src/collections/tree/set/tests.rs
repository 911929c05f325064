#![cfg(test)]

use super::*;

#[test]
fn test_insert_remove_contains() {
    let mut set = TreeSet::new();
    for item in [1, 3, 4, 5, 8] {
        assert!(set.insert(item));
    }
    assert!(!set.insert(5), "Duplicates should be rejected, not doubled.");
    assert_eq!(set.len(), 5);

    assert!(set.contains(&4));
    assert!(!set.contains(&2));
    assert_eq!(set.get(&8), Some(&8));
    assert_eq!(set.get(&9), None);

    assert_eq!(set.remove(&4), Some(4));
    assert_eq!(set.remove(&4), None);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 5, 8]);
}

#[test]
fn test_first_last() {
    let mut set = TreeSet::from([10, 5, 20, 15, 25]);
    assert_eq!(set.first(), Some(&5));
    assert_eq!(set.last(), Some(&25));

    assert_eq!(set.take_first(), Some(5));
    assert_eq!(set.take_last(), Some(25));
    assert_eq!(set.len(), 3);

    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.first(), None, "Min of an empty set should be absent.");
    assert_eq!(set.last(), None, "Max of an empty set should be absent.");
}

#[test]
fn test_range_view() {
    let set = TreeSet::from([1, 3, 4, 5, 8]);

    let view: Vec<i32> = set.range(&2, &5).expect("bounds are ordered").copied().collect();
    assert_eq!(view, [3, 4, 5], "Bounds should be inclusive and clamp to present items.");

    assert!(set.range(&5, &2).is_err(), "An inverted range should be rejected.");
}

#[test]
fn test_set_algebra() {
    let a = TreeSet::from([1, 2, 3, 4]);
    let b = TreeSet::from([3, 4, 5, 6]);

    assert_eq!(
        a.union(&b).copied().collect::<Vec<_>>(),
        [1, 2, 3, 4, 5, 6],
        "Union should merge without duplicating the overlap."
    );
    assert_eq!(a.intersection(&b).copied().collect::<Vec<_>>(), [3, 4]);
    assert_eq!(a.difference(&b).copied().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(
        a.symmetric_difference(&b).copied().collect::<Vec<_>>(),
        [1, 2, 5, 6]
    );

    let empty = TreeSet::new();
    assert_eq!(a.union(&empty).copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
    assert_eq!(a.intersection(&empty).count(), 0);
    assert_eq!(empty.difference(&a).count(), 0);
}

#[test]
fn test_set_operators() {
    let a = TreeSet::from([1, 2, 3, 4]);
    let b = TreeSet::from([3, 4, 5, 6]);

    assert_eq!((&a | &b).iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
    assert_eq!((&a & &b).iter().copied().collect::<Vec<_>>(), [3, 4]);
    assert_eq!((&a ^ &b).iter().copied().collect::<Vec<_>>(), [1, 2, 5, 6]);
    assert_eq!((&a - &b).iter().copied().collect::<Vec<_>>(), [1, 2]);

    let mut or = TreeSet::from([1, 2]);
    or |= TreeSet::from([2, 3]);
    assert_eq!(or.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);

    let mut and = TreeSet::from([1, 2, 3]);
    and &= TreeSet::from([2, 3, 4]);
    assert_eq!(and.iter().copied().collect::<Vec<_>>(), [2, 3]);

    let mut xor = TreeSet::from([1, 2, 3]);
    xor ^= TreeSet::from([2, 3, 4]);
    assert_eq!(xor.iter().copied().collect::<Vec<_>>(), [1, 4]);

    let mut sub = TreeSet::from([1, 2, 3]);
    sub -= TreeSet::from([2]);
    assert_eq!(sub.iter().copied().collect::<Vec<_>>(), [1, 3]);
}

#[test]
fn test_subset_superset() {
    let small = TreeSet::from([2, 3]);
    let large = TreeSet::from([1, 2, 3, 4]);

    assert!(small.is_subset(&large));
    assert!(large.is_superset(&small));
    assert!(!large.is_subset(&small));

    let disjoint = TreeSet::from([9]);
    assert!(!disjoint.is_subset(&large));
}

#[test]
fn test_custom_comparator_set_algebra() {
    let reverse = |a: &u32, b: &u32| b.cmp(a);
    let mut a = TreeSet::with_comparator(reverse);
    let mut b = TreeSet::with_comparator(reverse);
    a.extend([1, 2, 3]);
    b.extend([3, 4]);

    assert_eq!(
        a.union(&b).copied().collect::<Vec<_>>(),
        [4, 3, 2, 1],
        "The merge walk should follow the injected order, not Ord."
    );
    assert_eq!(a.intersection(&b).copied().collect::<Vec<_>>(), [3]);
}

#[test]
fn test_owned_iteration() {
    let set = TreeSet::from([3, 1, 2]);
    assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 2, 3]);

    let set = TreeSet::from([3, 1, 2]);
    assert_eq!(set.into_iter().rev().collect::<Vec<_>>(), [3, 2, 1]);
}

#[test]
fn test_display() {
    let set = TreeSet::from([2, 1, 3]);
    assert_eq!(format!("{set}"), "{1, 2, 3}");

    let empty: TreeSet<u32> = TreeSet::new();
    assert_eq!(format!("{empty}"), "{}");
}
