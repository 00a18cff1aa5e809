use std::collections::{BTreeMap, VecDeque};

use boxed_collections::{Array, Deque, Error, Map, RbTree, SList, Set};
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Small key range so inserts collide and removes hit.
fn key_strategy() -> impl Strategy<Value = i32> {
    -300i32..300i32
}

// ─── Operations enums for driving randomized tests ───────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i32, i64),
    Remove(i32),
    Take(i32),
    Find(i32),
    Exists(i32),
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), any::<i64>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        1 => key_strategy().prop_map(MapOp::Take),
        2 => key_strategy().prop_map(MapOp::Find),
        1 => key_strategy().prop_map(MapOp::Exists),
    ]
}

#[derive(Debug, Clone)]
enum SeqOp {
    PushBack(u16),
    PushFront(u16),
    PopBack,
    PopFront,
    Insert(usize, u16),
    Remove(usize),
}

fn seq_op_strategy() -> impl Strategy<Value = SeqOp> {
    prop_oneof![
        4 => any::<u16>().prop_map(SeqOp::PushBack),
        3 => any::<u16>().prop_map(SeqOp::PushFront),
        2 => Just(SeqOp::PopBack),
        2 => Just(SeqOp::PopFront),
        2 => (0usize..64, any::<u16>()).prop_map(|(i, v)| SeqOp::Insert(i, v)),
        2 => (0usize..64).prop_map(SeqOp::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random operations on both Map and BTreeMap; duplicates must be
    /// refused where BTreeMap would overwrite.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut ours: Map<i32, i64> = Map::natural();
        let mut model: BTreeMap<i32, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    let expected = if model.contains_key(k) {
                        Err(Error::KeyDuplicate)
                    } else {
                        model.insert(*k, *v);
                        Ok(())
                    };
                    prop_assert_eq!(ours.insert(*k, *v), expected, "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    let expected = model.remove(k).map(|_| ()).ok_or(Error::KeyNotFound);
                    prop_assert_eq!(ours.remove(k), expected, "remove({})", k);
                }
                MapOp::Take(k) => {
                    let expected = model.remove_entry(k).ok_or(Error::KeyNotFound);
                    prop_assert_eq!(ours.take(k), expected, "take({})", k);
                }
                MapOp::Find(k) => {
                    prop_assert_eq!(ours.find(k), model.get(k), "find({})", k);
                }
                MapOp::Exists(k) => {
                    prop_assert_eq!(ours.exists(k), model.contains_key(k), "exists({})", k);
                }
            }
            prop_assert_eq!(ours.len(), model.len());
        }

        let pairs: Vec<_> = ours.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<_> = model.into_iter().collect();
        prop_assert_eq!(pairs, expected);
    }

    /// Every insert/remove keeps the red-black invariants.
    #[test]
    fn tree_invariants_hold_under_churn(ops in proptest::collection::vec(map_op_strategy(), 500)) {
        let mut tree: RbTree<i32, i64> = RbTree::natural();
        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    let _ = tree.insert(*k, *v);
                }
                MapOp::Remove(k) | MapOp::Take(k) => {
                    let _ = tree.remove(k);
                }
                MapOp::Find(_) | MapOp::Exists(_) => {}
            }
            prop_assert!(tree.check_invariants().is_ok());
        }
    }

    /// Set iteration is sorted and duplicate-free whatever the insertion order.
    #[test]
    fn set_iter_sorted_unique(keys in proptest::collection::vec(key_strategy(), 0..TEST_SIZE)) {
        let mut set: Set<i32> = Set::natural();
        for k in &keys {
            let _ = set.insert(*k);
        }
        let mut expected = keys.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(set.iter().copied().collect::<Vec<_>>(), expected);
    }

    /// Deque behaves like VecDeque at both ends, across wrap-around and growth.
    #[test]
    fn deque_ops_match_vecdeque(
        cap in 1usize..6,
        ops in proptest::collection::vec(seq_op_strategy(), TEST_SIZE),
    ) {
        let mut ours: Deque<u16> = Deque::with_capacity(cap);
        let mut model: VecDeque<u16> = VecDeque::new();

        for op in &ops {
            match op {
                SeqOp::PushBack(v) | SeqOp::Insert(_, v) => {
                    ours.push_back(*v).unwrap();
                    model.push_back(*v);
                }
                SeqOp::PushFront(v) => {
                    ours.push_front(*v).unwrap();
                    model.push_front(*v);
                }
                SeqOp::PopBack | SeqOp::Remove(_) => {
                    prop_assert_eq!(ours.pop_back().ok(), model.pop_back());
                }
                SeqOp::PopFront => {
                    prop_assert_eq!(ours.pop_front().ok(), model.pop_front());
                }
            }
            prop_assert_eq!(ours.len(), model.len());
            prop_assert_eq!(ours.front().ok(), model.front());
            prop_assert_eq!(ours.back().ok(), model.back());
        }
        prop_assert!(ours.iter().eq(model.iter()));
    }

    /// Array and SList positional edits behave like Vec.
    #[test]
    fn positional_ops_match_vec(ops in proptest::collection::vec(seq_op_strategy(), 400)) {
        let mut array: Array<u16> = Array::with_capacity(1);
        let mut list: SList<u16> = SList::natural();
        let mut model: Vec<u16> = Vec::new();

        for op in &ops {
            match op {
                SeqOp::PushBack(v) => {
                    array.push_back(*v).unwrap();
                    list.push_back(*v);
                    model.push(*v);
                }
                SeqOp::PushFront(v) => {
                    array.insert_at(0, *v).unwrap();
                    list.push_front(*v);
                    model.insert(0, *v);
                }
                SeqOp::Insert(i, v) => {
                    if *i <= model.len() {
                        array.insert_at(*i, *v).unwrap();
                        list.insert(*i, *v).unwrap();
                        model.insert(*i, *v);
                    } else {
                        prop_assert!(array.insert_at(*i, *v).is_err());
                        prop_assert!(list.insert(*i, *v).is_err());
                    }
                }
                SeqOp::Remove(i) => {
                    if *i < model.len() {
                        let expected = model.remove(*i);
                        prop_assert_eq!(array.take_at(*i), Ok(expected));
                        prop_assert_eq!(list.take(*i), Ok(expected));
                    } else {
                        prop_assert!(array.remove_from(*i).is_err());
                        prop_assert!(list.remove(*i).is_err());
                    }
                }
                SeqOp::PopBack | SeqOp::PopFront => {}
            }
            prop_assert!(array.capacity() >= array.len());
        }
        prop_assert!(array.iter().eq(model.iter()));
        prop_assert!(list.iter().eq(model.iter()));
    }
}
