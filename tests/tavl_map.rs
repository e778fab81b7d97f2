use std::collections::BTreeMap;
use std::ops::ControlFlow;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tavl_tree::{Error, FnOrder, NodeRef, Rank, TavlMap};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 1_500;

/// Generates keys in a range small enough to force collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    RemoveKey(i64),
    Get(i64),
    ContainsKey(i64),
    FindLe(i64),
    RankOf(i64),
    GetByRank(usize),
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::RemoveKey),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        2 => key_strategy().prop_map(MapOp::FindLe),
        1 => key_strategy().prop_map(MapOp::RankOf),
        2 => any::<usize>().prop_map(MapOp::GetByRank),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Replays a random op sequence on both TavlMap and BTreeMap and
    /// asserts identical observable results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut tavl: TavlMap<i64, i64> = TavlMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    let outcome = tavl.insert(*k, *v);
                    if model.contains_key(k) {
                        prop_assert_eq!(outcome, Err(Error::AlreadyExists), "insert({}, {})", k, v);
                    } else {
                        let node = outcome.expect("insert of a fresh key succeeds");
                        prop_assert_eq!(tavl.get_at(node), Some((k, v)));
                        model.insert(*k, *v);
                    }
                }
                MapOp::RemoveKey(k) => {
                    prop_assert_eq!(tavl.remove_key(k), model.remove_entry(k), "remove_key({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(tavl.get(k), model.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(tavl.contains_key(k), model.contains_key(k), "contains_key({})", k);
                }
                MapOp::FindLe(k) => {
                    let tavl_le = tavl.find_le(k).map(|node| *tavl.key_at(node).expect("live node"));
                    let model_le = model.range(..=*k).next_back().map(|(&key, _)| key);
                    prop_assert_eq!(tavl_le, model_le, "find_le({})", k);
                }
                MapOp::RankOf(k) => {
                    let expected = model.keys().position(|key| key == k);
                    prop_assert_eq!(tavl.rank_of(k), expected, "rank_of({})", k);
                }
                MapOp::GetByRank(raw_rank) => {
                    let rank = raw_rank % (model.len() + 1);
                    let expected = model.iter().nth(rank).map(|(&k, &v)| (k, v));
                    let actual = tavl.get_by_rank(rank).map(|(&k, &v)| (k, v));
                    prop_assert_eq!(actual, expected, "get_by_rank({})", rank);
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(tavl.pop_first(), model.pop_first(), "pop_first");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(tavl.pop_last(), model.pop_last(), "pop_last");
                }
            }
            prop_assert_eq!(tavl.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(tavl.is_empty(), model.is_empty());
        }
    }

    /// Iteration in both directions matches BTreeMap after random inserts.
    #[test]
    fn iter_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut tavl: TavlMap<i64, i64> = TavlMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for (k, v) in &entries {
            if model.insert(*k, *v).is_none() {
                tavl.insert(*k, *v).expect("fresh key");
            }
        }

        let tavl_items: Vec<_> = tavl.iter().map(|(&k, &v)| (k, v)).collect();
        let model_items: Vec<_> = model.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&tavl_items, &model_items, "iter() mismatch");

        let tavl_rev: Vec<_> = tavl.iter().rev().map(|(&k, &v)| (k, v)).collect();
        let model_rev: Vec<_> = model.iter().rev().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&tavl_rev, &model_rev, "iter().rev() mismatch");

        let tavl_keys: Vec<_> = tavl.keys().copied().collect();
        let model_keys: Vec<_> = model.keys().copied().collect();
        prop_assert_eq!(&tavl_keys, &model_keys, "keys() mismatch");

        let tavl_values: Vec<_> = tavl.values().copied().collect();
        let model_values: Vec<_> = model.values().copied().collect();
        prop_assert_eq!(&tavl_values, &model_values, "values() mismatch");

        let tavl_into: Vec<_> = tavl.clone().into_iter().collect();
        let model_into: Vec<_> = model.clone().into_iter().collect();
        prop_assert_eq!(&tavl_into, &model_into, "into_iter() mismatch");

        // Stepping node references covers the same sequence.
        let mut stepped = Vec::new();
        let mut current = tavl.first();
        while let Some(node) = current {
            stepped.push(*tavl.key_at(node).expect("live node"));
            current = tavl.next(node);
        }
        prop_assert_eq!(&stepped, &model_keys, "next() walk mismatch");

        let mut stepped_back = Vec::new();
        let mut current = tavl.last();
        while let Some(node) = current {
            stepped_back.push(*tavl.key_at(node).expect("live node"));
            current = tavl.prev(node);
        }
        stepped_back.reverse();
        prop_assert_eq!(&stepped_back, &model_keys, "prev() walk mismatch");
    }

    /// Inserting N distinct keys and removing all of them through their
    /// node references, in insertion order, empties the map.
    #[test]
    fn handle_round_trip(keys in proptest::collection::hash_set(key_strategy(), 0..400)) {
        let mut tavl: TavlMap<i64, i64> = TavlMap::new();
        let mut handles: Vec<(i64, NodeRef)> = Vec::new();

        for &k in &keys {
            handles.push((k, tavl.insert(k, k * 3).expect("distinct keys")));
        }
        prop_assert_eq!(tavl.len(), keys.len());

        for &(k, node) in &handles {
            // The reference may have been retargeted by a neighbor swap
            // during an earlier removal, so remove whatever it names now.
            if let Some(&live) = tavl.key_at(node) {
                prop_assert_eq!(tavl.remove(node), Ok((live, live * 3)), "remove via handle for {}", k);
            } else {
                // Stale: its payload was already removed through another
                // reference. The key must be reachable by search instead.
                prop_assert_eq!(tavl.remove(node), Err(Error::NotFound));
            }
        }
        // Handle-based removal plus search-based cleanup drains the map.
        let leftovers: Vec<i64> = tavl.keys().copied().collect();
        for k in leftovers {
            tavl.remove_key(&k).expect("leftover key present");
        }
        prop_assert_eq!(tavl.len(), 0);
        prop_assert!(tavl.is_empty());
    }
}

// ─── End-to-end scenarios ────────────────────────────────────────────────────

#[test]
fn integer_insert_rank_and_remove() {
    let mut map = TavlMap::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        map.insert(key, key).unwrap();
    }

    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, [1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(map.get_by_rank(0), Some((&1, &1)));
    assert_eq!(map.get_by_rank(6), Some((&9, &9)));

    let five = map.find(&5).unwrap();
    assert_eq!(map.remove(five), Ok((5, 5)));

    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, [1, 3, 4, 7, 8, 9]);
    assert_eq!(map.len(), 6);
}

#[test]
fn string_keys_and_floor_lookup() {
    let mut map: TavlMap<&str, &str> = TavlMap::new();
    map.insert("b", "B").unwrap();
    map.insert("a", "A").unwrap();
    map.insert("c", "C").unwrap();

    let first = map.first().unwrap();
    assert_eq!(map.value_at(first), Some(&"A"));

    let second = map.next(first).unwrap();
    assert_eq!(map.value_at(second), Some(&"B"));

    let floor = map.find_le("bb").unwrap();
    assert_eq!(map.key_at(floor), Some(&"b"));
}

#[test]
fn rejected_duplicate_leaves_traversal_identical() {
    let mut map = TavlMap::new();
    for key in [20, 10, 30, 5, 15] {
        map.insert(key, key * 100).unwrap();
    }

    let before: Vec<(i32, i32)> = map.iter().map(|(&k, &v)| (k, v)).collect();
    assert_eq!(map.insert(15, -1), Err(Error::AlreadyExists));
    let after: Vec<(i32, i32)> = map.iter().map(|(&k, &v)| (k, v)).collect();

    assert_eq!(before, after);
    assert_eq!(map.len(), 5);
}

// ─── Handles and staleness ───────────────────────────────────────────────────

#[test]
fn stale_references_never_resolve() {
    let mut map = TavlMap::new();
    let node = map.insert(1, "one").unwrap();

    assert_eq!(map.remove(node), Ok((1, "one")));
    assert_eq!(map.remove(node), Err(Error::NotFound));
    assert_eq!(map.key_at(node), None);
    assert_eq!(map.get_at(node), None);
    assert_eq!(map.next(node), None);
    assert_eq!(map.prev(node), None);

    // The freed slot is recycled by the next insert; the old reference
    // must still miss.
    let fresh = map.insert(2, "two").unwrap();
    assert_eq!(map.remove(node), Err(Error::NotFound));
    assert_eq!(map.key_at(fresh), Some(&2));
}

#[test]
fn clear_invalidates_all_references() {
    let mut map = TavlMap::new();
    let a = map.insert(1, 1).unwrap();
    let b = map.insert(2, 2).unwrap();

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.key_at(a), None);
    assert_eq!(map.remove(b), Err(Error::NotFound));

    // The map stays fully usable after a clear.
    map.insert(3, 3).unwrap();
    assert_eq!(map.len(), 1);
}

#[test]
fn removing_an_inner_node_relocates_a_neighbor() {
    let mut map = TavlMap::new();
    let mut nodes = Vec::new();
    for key in [4, 2, 6, 1, 3, 5, 7] {
        nodes.push((key, map.insert(key, key * 10).unwrap()));
    }

    // The root has two children; removal must still return its payload.
    let (_, root_node) = nodes[0];
    assert_eq!(map.remove(root_node), Ok((4, 40)));
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, [1, 2, 3, 5, 6, 7]);

    // Exactly one surviving reference went stale: the neighbor whose
    // payload moved into the removed node's slot.
    let stale = nodes[1..].iter().filter(|&&(_, node)| map.key_at(node).is_none()).count();
    assert_eq!(stale, 1);
}

// ─── Ordering configuration ──────────────────────────────────────────────────

#[test]
fn closure_comparator_reverses_the_order() {
    let mut map = TavlMap::with_comparator(FnOrder(|a: &i64, b: &i64| b.cmp(a)));
    for key in [1, 5, 3, 4, 2] {
        map.insert(key, ()).unwrap();
    }

    let keys: Vec<i64> = map.keys().copied().collect();
    assert_eq!(keys, [5, 4, 3, 2, 1]);

    // find_le floors in comparator order, so an exact match still wins.
    let floor = map.find_le(&3).unwrap();
    assert_eq!(map.key_at(floor), Some(&3));
    assert_eq!(map.rank_of(&5), Some(0));
}

// ─── Iteration and the early-exit channel ────────────────────────────────────

#[test]
fn try_for_each_short_circuits() {
    let map: TavlMap<i32, i32> = (1..=10).map(|k| (k, k * k)).collect();

    let mut visited = Vec::new();
    let outcome = map.try_for_each(|&key, &value| {
        visited.push(key);
        if value > 9 { ControlFlow::Break((key, value)) } else { ControlFlow::Continue(()) }
    });

    assert_eq!(outcome, ControlFlow::Break((4, 16)));
    assert_eq!(visited, [1, 2, 3, 4]);

    let full: ControlFlow<()> = map.try_for_each(|_, _| ControlFlow::Continue(()));
    assert_eq!(full, ControlFlow::Continue(()));
}

#[test]
fn double_ended_iteration_meets_in_the_middle() {
    let map: TavlMap<i32, i32> = (0..5).map(|k| (k, k)).collect();
    let mut iter = map.iter();

    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some((&0, &0)));
    assert_eq!(iter.next_back(), Some((&4, &4)));
    assert_eq!(iter.next(), Some((&1, &1)));
    assert_eq!(iter.next_back(), Some((&3, &3)));
    assert_eq!(iter.next(), Some((&2, &2)));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

// ─── Entry API ───────────────────────────────────────────────────────────────

#[test]
fn entry_inserts_and_updates() {
    let mut map: TavlMap<&str, u32> = TavlMap::new();

    *map.entry("a").or_insert(1) += 10;
    assert_eq!(map.get(&"a"), Some(&11));

    map.entry("a").and_modify(|v| *v *= 2).or_insert(0);
    assert_eq!(map.get(&"a"), Some(&22));

    map.entry("b").or_insert_with_key(|key| key.len() as u32);
    assert_eq!(map.get(&"b"), Some(&1));

    match map.entry("a") {
        tavl_tree::tavl_map::Entry::Occupied(occupied) => {
            assert_eq!(occupied.remove_entry(), ("a", 22));
        }
        tavl_tree::tavl_map::Entry::Vacant(_) => panic!("entry must be occupied"),
    }
    assert_eq!(map.len(), 1);
}

// ─── Payload access and teardown ─────────────────────────────────────────────

#[test]
fn value_mutation_through_references_and_ranks() {
    let mut map: TavlMap<i32, i32> = (0..8).map(|k| (k, 0)).collect();

    let node = map.find(&3).unwrap();
    *map.value_at_mut(node).unwrap() = 33;
    assert_eq!(map.get(&3), Some(&33));

    map[Rank(0)] = -1;
    assert_eq!(map.get(&0), Some(&-1));
    assert_eq!(map[Rank(3)], 33);
}

#[test]
fn destroy_hands_every_payload_to_the_callback() {
    let map: TavlMap<i32, String> = (0..50).map(|k| (k, k.to_string())).collect();

    let mut freed = Vec::new();
    map.destroy(|key, value| freed.push((key, value)));

    // Teardown order is unspecified; compare as a sorted multiset.
    freed.sort();
    let expected: Vec<(i32, String)> = (0..50).map(|k| (k, k.to_string())).collect();
    assert_eq!(freed, expected);
}

#[test]
fn into_iterators_drain_in_order() {
    let map: TavlMap<i32, i32> = [(2, 20), (1, 10), (3, 30)].into_iter().collect();
    let keys: Vec<i32> = map.clone().into_keys().collect();
    assert_eq!(keys, [1, 2, 3]);

    let values: Vec<i32> = map.clone().into_values().collect();
    assert_eq!(values, [10, 20, 30]);

    let pairs: Vec<(i32, i32)> = map.into_iter().collect();
    assert_eq!(pairs, [(1, 10), (2, 20), (3, 30)]);
}

// ─── Edge cases ──────────────────────────────────────────────────────────────

#[test]
fn empty_map_operations_are_well_formed() {
    let mut map: TavlMap<i32, i32> = TavlMap::new();

    assert_eq!(map.len(), 0);
    assert!(map.first().is_none());
    assert!(map.last().is_none());
    assert!(map.find(&1).is_none());
    assert!(map.find_le(&1).is_none());
    assert!(map.get_by_rank(0).is_none());
    assert!(map.rank_of(&1).is_none());
    assert!(map.pop_first().is_none());
    assert!(map.pop_last().is_none());
    assert_eq!(map.iter().size_hint(), (0, Some(0)));

    let none: ControlFlow<i32> = map.try_for_each(|_, &v| ControlFlow::Break(v));
    assert_eq!(none, ControlFlow::Continue(()));
}

#[test]
fn single_entry_map_boundaries() {
    let mut map = TavlMap::new();
    let node = map.insert(42, "answer").unwrap();

    assert_eq!(map.first(), Some(node));
    assert_eq!(map.last(), Some(node));
    assert_eq!(map.next(node), None);
    assert_eq!(map.prev(node), None);
    assert_eq!(map.find_le(&41), None);
    assert_eq!(map.find_le(&43), Some(node));
}

#[test]
fn pop_drains_in_both_directions() {
    let mut ascending: TavlMap<i32, i32> = (0..100).map(|k| (k, k)).collect();
    for expected in 0..100 {
        assert_eq!(ascending.pop_first(), Some((expected, expected)));
    }
    assert!(ascending.is_empty());

    let mut descending: TavlMap<i32, i32> = (0..100).map(|k| (k, k)).collect();
    for expected in (0..100).rev() {
        assert_eq!(descending.pop_last(), Some((expected, expected)));
    }
    assert!(descending.is_empty());
}

#[test]
fn clone_and_equality_are_structural() {
    let map: TavlMap<i32, i32> = (0..20).map(|k| (k, -k)).collect();
    let copy = map.clone();
    assert_eq!(map, copy);

    let mut shrunk = copy;
    shrunk.remove_key(&7).unwrap();
    assert_ne!(map, shrunk);
    assert_eq!(map.len(), 20);
    assert_eq!(map.get(&7), Some(&-7));
}
