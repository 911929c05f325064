#![cfg(test)]

use std::fmt::Debug;

use super::*;
use crate::collections::tree::cmp::Comparator;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

/// Walks the whole tree checking every structural rule: colour invariants, uniform black-height,
/// parent links mirroring child links, the tracked length, and strict key ordering.
fn check_invariants<K: Ord + Debug, V: Debug, C: Comparator<K>>(map: &TreeMap<K, V, C>) {
    if let Some(root) = map.root {
        assert!(root.colour().is_black(), "Root must be Black.");
    }

    let (_, count) = check_subtree(map.root, None);
    assert_eq!(
        count,
        map.len(),
        "Tracked length should match the number of reachable nodes."
    );

    let mut prev: Option<&K> = None;
    for (key, _) in map.iter() {
        if let Some(prev) = prev {
            assert!(prev < key, "In-order traversal should be strictly ascending.");
        }
        prev = Some(key);
    }
}

/// Returns (black-height, node count) for the subtree, panicking on any violation.
fn check_subtree<K: Debug, V: Debug>(link: Link<K, V>, parent: Link<K, V>) -> (usize, usize) {
    match link {
        Some(node) => {
            assert_eq!(node.parent(), parent, "Parent links should mirror child links.");
            if node.colour().is_red() {
                assert!(
                    colour_of(node.left()).is_black() && colour_of(node.right()).is_black(),
                    "A Red node must not have a Red child."
                );
            }

            let (left_height, left_count) = check_subtree(node.left(), link);
            let (right_height, right_count) = check_subtree(node.right(), link);
            assert_eq!(left_height, right_height, "Black-height must be uniform across paths.");

            (
                left_height + usize::from(node.colour().is_black()),
                left_count + right_count + 1,
            )
        },
        None => (1, 0),
    }
}

fn height<K, V>(link: Link<K, V>) -> usize {
    match link {
        Some(node) => 1 + height(node.left()).max(height(node.right())),
        None => 0,
    }
}

/// A minimal LCG, so the permutation tests don't need an RNG dependency.
fn pseudo_random(seed: u64) -> impl Iterator<Item = u64> {
    let mut state = seed;
    std::iter::repeat_with(move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        state >> 33
    })
}

#[test]
fn test_insert_in_order() {
    let mut map = TreeMap::new();
    for key in [10, 5, 20, 15, 25] {
        assert!(map.insert(key, key * 10), "Inserting a fresh key should succeed.");
        check_invariants(&map);
    }

    assert_eq!(map.len(), 5);
    assert_eq!(map.first_entry(), Some((&5, &50)), "Min should be the smallest key.");
    assert_eq!(map.last_entry(), Some((&25, &250)), "Max should be the largest key.");
    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        [5, 10, 15, 20, 25],
        "In-order traversal should be sorted regardless of insertion order."
    );
}

#[test]
fn test_duplicate_insert_is_a_no_op() {
    let mut map = TreeMap::new();
    assert!(map.insert(15, "first"));
    assert!(!map.insert(15, "second"), "Inserting a present key should report failure.");
    assert_eq!(map.len(), 1, "A rejected insert should not change the length.");
    assert_eq!(map.get(&15), Some(&"first"), "A rejected insert should not replace the value.");
    check_invariants(&map);
}

#[test]
fn test_set_upserts() {
    let mut map = TreeMap::new();
    assert_eq!(map.set(1, "one"), None, "Setting an absent key should insert.");
    assert_eq!(map.set(1, "uno"), Some("one"), "Setting a present key should replace in place.");
    assert_eq!(map.len(), 1);
    assert_eq!(map[&1], "uno");
    check_invariants(&map);
}

#[test]
fn test_lookups() {
    let mut map = TreeMap::from([(10, "ten"), (5, "five"), (20, "twenty")]);

    assert!(map.contains_key(&5));
    assert!(!map.contains_key(&99));
    assert_eq!(map.get(&20), Some(&"twenty"));
    assert_eq!(map.get(&99), None);
    assert_eq!(map.get_entry(&10), Some((&10, &"ten")));
    assert_eq!(map[&10], "ten");

    *map.get_mut(&5).expect("key is present") = "cinq";
    assert_eq!(map[&5], "cinq");

    assert!(map.contains_value(&"cinq"));
    assert!(!map.contains_value(&"five"));
}

#[test]
fn test_index_missing_key_panics() {
    let map = TreeMap::from([(1, "one")]);
    assert_panics!(
        {
            let _ = &map[&99];
        },
        "Indexing with an absent key should panic."
    );
}

#[test]
fn test_empty_map() {
    let map: TreeMap<u32, &str> = TreeMap::new();
    assert!(map.is_empty());
    assert_eq!(map.first_entry(), None, "Min of an empty map should be absent.");
    assert_eq!(map.last_entry(), None, "Max of an empty map should be absent.");
    assert_eq!(map.iter().next(), None);
    check_invariants(&map);
}

#[test]
fn test_remove_node_with_two_children() {
    let mut map = TreeMap::from([(5, ()), (10, ()), (15, ()), (20, ()), (25, ())]);

    assert_eq!(map.remove_entry(&10), Some((10, ())));
    assert_eq!(map.len(), 4, "Removal should decrement the length.");
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [5, 15, 20, 25]);
    check_invariants(&map);

    assert_eq!(map.remove_entry(&10), None, "Removing an absent key should change nothing.");
    assert_eq!(map.len(), 4);
    check_invariants(&map);
}

#[test]
fn test_insert_remove_all_permutations() {
    // A fixed handful of orders over the same keys; the resulting sequence must not depend on
    // insertion order.
    let orders: [&[u32]; 4] = [
        &[1, 2, 3, 4, 5, 6, 7],
        &[7, 6, 5, 4, 3, 2, 1],
        &[4, 2, 6, 1, 3, 5, 7],
        &[1, 7, 2, 6, 3, 5, 4],
    ];

    for order in orders {
        let mut map = TreeMap::new();
        for &key in order {
            map.insert(key, ());
            check_invariants(&map);
        }
        assert_eq!(
            map.keys().copied().collect::<Vec<_>>(),
            [1, 2, 3, 4, 5, 6, 7],
            "Enumeration should be identical for every insertion order."
        );

        for &key in orders[0] {
            assert_eq!(map.remove(&key), Some(()));
            check_invariants(&map);
        }
        assert_eq!(map.len(), 0);
        assert!(map.root.is_none(), "Removing every key should empty the tree.");
    }
}

#[test]
fn test_randomized_insert_remove() {
    let mut map = TreeMap::new();
    let mut inserted = 0;

    let keys: Vec<u64> = pseudo_random(42).map(|n| n % 1000).take(300).collect();
    for &key in &keys {
        if map.insert(key, key) {
            inserted += 1;
        }
        assert_eq!(map.len(), inserted);
        check_invariants(&map);
    }

    // Remove in a different order than insertion.
    for &key in keys.iter().rev() {
        if let Some(value) = map.remove(&key) {
            assert_eq!(value, key);
            inserted -= 1;
        }
        assert_eq!(map.len(), inserted);
        check_invariants(&map);
    }

    assert!(map.is_empty());
    assert!(map.root.is_none());
}

#[test]
fn test_height_bound() {
    let mut map = TreeMap::new();
    for key in 0..1024_u32 {
        map.insert(key, ());
    }
    check_invariants(&map);

    // Red-black guarantee: height <= 2 * log2(n + 1). For n = 1024 that's just over 20.
    assert!(
        height(map.root) <= 20,
        "Sorted insertion must not degrade the tree into a list."
    );
}

#[test]
fn test_range_view() {
    let map = TreeMap::from([(1, 'a'), (3, 'b'), (4, 'c'), (5, 'd'), (8, 'e')]);

    let keys: Vec<i32> = map.range(&2, &5).expect("bounds are ordered").map(|(k, _)| *k).collect();
    assert_eq!(keys, [3, 4, 5], "Bounds should be inclusive and pruning should not skip matches.");

    let all: Vec<i32> = map.range(&0, &100).expect("bounds are ordered").map(|(k, _)| *k).collect();
    assert_eq!(all, [1, 3, 4, 5, 8]);

    assert_eq!(
        map.range(&6, &7).expect("bounds are ordered").count(),
        0,
        "A gap between keys should produce an empty view."
    );

    assert!(map.range(&5, &2).is_err(), "An inverted range should be rejected.");
}

#[test]
fn test_iteration() {
    let map = TreeMap::from([(2, "b"), (1, "a"), (3, "c")]);

    assert_eq!(map.iter().len(), 3, "The iterator should know its exact length.");
    assert_eq!(
        map.iter().collect::<Vec<_>>(),
        [(&1, &"a"), (&2, &"b"), (&3, &"c")]
    );
    assert_eq!(
        map.iter().rev().map(|e| *e.0).collect::<Vec<_>>(),
        [3, 2, 1],
        "Reversed iteration should yield descending keys."
    );

    let mut iter = map.iter();
    assert_eq!(iter.next().map(|e| *e.0), Some(1));
    assert_eq!(iter.next_back().map(|e| *e.0), Some(3));
    assert_eq!(iter.next().map(|e| *e.0), Some(2));
    assert_eq!(iter.next(), None, "The ends should meet without overlapping.");
    assert_eq!(iter.next_back(), None);

    // A second call must start a fresh traversal.
    assert_eq!(map.iter().count(), 3, "Iteration should be restartable.");
}

#[test]
fn test_mutable_iteration() {
    let mut map = TreeMap::from([(1, 10), (2, 20), (3, 30)]);

    for (_, value) in map.iter_mut() {
        *value += 1;
    }
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [11, 21, 31]);

    for value in map.values_mut() {
        *value *= 2;
    }
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [22, 42, 62]);
}

#[test]
fn test_owned_iteration() {
    let map = TreeMap::from([(2, "b"), (1, "a"), (3, "c")]);
    assert_eq!(
        map.into_iter().collect::<Vec<_>>(),
        [(1, "a"), (2, "b"), (3, "c")],
        "Consuming iteration should drain in ascending order."
    );

    let map = TreeMap::from([(2, "b"), (1, "a"), (3, "c")]);
    assert_eq!(map.into_keys().collect::<Vec<_>>(), [1, 2, 3]);

    let map = TreeMap::from([(2, "b"), (1, "a"), (3, "c")]);
    assert_eq!(map.into_values().collect::<Vec<_>>(), ["a", "b", "c"]);

    let map = TreeMap::from([(2, "b"), (1, "a"), (3, "c")]);
    assert_eq!(
        map.into_iter().rev().collect::<Vec<_>>(),
        [(3, "c"), (2, "b"), (1, "a")]
    );
}

#[test]
fn test_take_first_and_last() {
    let mut map = TreeMap::from([(2, "b"), (1, "a"), (3, "c")]);
    assert_eq!(map.take_first_entry(), Some((1, "a")));
    assert_eq!(map.take_last_entry(), Some((3, "c")));
    assert_eq!(map.len(), 1);
    check_invariants(&map);

    assert_eq!(map.take_first_entry(), Some((2, "b")));
    assert_eq!(map.take_first_entry(), None);
    assert_eq!(map.take_last_entry(), None);
}

#[test]
fn test_custom_comparator() {
    let mut map = TreeMap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    for key in [10, 5, 20, 15, 25] {
        map.insert(key, ());
    }

    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        [25, 20, 15, 10, 5],
        "The injected order should replace the natural one entirely."
    );
    assert_eq!(map.first_entry(), Some((&25, &())), "Min is relative to the comparator.");
    assert!(map.contains_key(&15), "Lookups should descend by the same comparator.");
    assert_eq!(map.remove(&20), Some(()));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [25, 15, 10, 5]);
}

#[test]
fn test_clear_and_drop_free_every_node() {
    let counter = CountedDrop::new();

    let mut map = TreeMap::new();
    for key in 0..10 {
        map.insert(key, counter.clone());
    }
    map.clear();
    assert_eq!(counter.count(), 10, "Clearing should drop every stored value.");
    assert!(map.is_empty());
    assert!(map.root.is_none());
    check_invariants(&map);

    for key in 0..7 {
        map.insert(key, counter.clone());
    }
    drop(map);
    assert_eq!(counter.count(), 17, "Dropping the map should drop every stored value.");
}

#[test]
fn test_extend_and_collect() {
    let mut map: TreeMap<u32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    map.extend([(2, "deux"), (3, "three")]);

    assert_eq!(map.len(), 3);
    assert_eq!(map[&2], "deux", "Extend should upsert rather than silently drop duplicates.");
    check_invariants(&map);
}
