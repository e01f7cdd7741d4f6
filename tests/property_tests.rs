//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify
//! that the heap invariants are always maintained.

use mergeable_heaps::binomial::BinomialHeap;
use mergeable_heaps::fibonacci::{FibonacciHandle, FibonacciHeap};
use mergeable_heaps::{CompletePQ, HeapError, MeldablePQ, PriorityQueue};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    DeleteMin,
    DecreaseKey(usize, i32),
    Delete(usize),
    Meld(Vec<i32>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-1000i32..1000).prop_map(Op::Insert),
        2 => Just(Op::DeleteMin),
        2 => (any::<usize>(), -1000i32..1000).prop_map(|(i, k)| Op::DecreaseKey(i, k)),
        1 => any::<usize>().prop_map(Op::Delete),
        1 => prop::collection::vec(-1000i32..1000, 0..8).prop_map(Op::Meld),
    ]
}

/// Test that push and pop maintain heap property
fn test_insert_delete_min_invariant<H: MeldablePQ<i32>>(
    ops: Vec<(bool, i32)>,
    verify: fn(&H) -> bool,
) -> Result<(), TestCaseError> {
    let mut heap = H::new();
    let mut model: Vec<i32> = Vec::new();

    for (should_pop, value) in ops {
        if should_pop {
            let expected = model.iter().copied().min();
            match expected {
                Some(min) => {
                    prop_assert_eq!(heap.delete_min(), Ok(min));
                    let pos = model.iter().position(|&k| k == min).unwrap();
                    model.swap_remove(pos);
                }
                None => prop_assert_eq!(heap.delete_min(), Err(HeapError::EmptyHeap)),
            }
        } else {
            heap.insert(value);
            model.push(value);
        }

        prop_assert_eq!(heap.len(), model.len());
        prop_assert_eq!(heap.min().ok().copied(), model.iter().copied().min());
        prop_assert!(verify(&heap));
    }
    Ok(())
}

/// Test that meld keeps every element of both heaps
fn test_meld_invariant<H: MeldablePQ<i32>>(
    left: Vec<i32>,
    right: Vec<i32>,
    verify: fn(&H) -> bool,
) -> Result<(), TestCaseError> {
    let mut a = H::new();
    let mut b = H::new();
    for &k in &left {
        a.insert(k);
    }
    for &k in &right {
        b.insert(k);
    }

    prop_assert_eq!(a.meld(&mut b), Ok(()));
    prop_assert!(b.is_empty());
    prop_assert!(verify(&a));
    prop_assert!(verify(&b));

    let mut expected: Vec<i32> = left.into_iter().chain(right).collect();
    expected.sort_unstable();
    let drained: Vec<i32> = std::iter::from_fn(|| a.delete_min().ok()).collect();
    prop_assert_eq!(drained, expected);
    Ok(())
}

/// Runs a mixed operation sequence against a Fibonacci heap
///
/// The model keeps every live handle with its current key.
fn test_fibonacci_operation_sequence(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut heap = FibonacciHeap::new();
    let mut live: BTreeMap<usize, (FibonacciHandle, i32)> = BTreeMap::new();
    let mut next_id = 0usize;

    let pick = |live: &BTreeMap<usize, (FibonacciHandle, i32)>, i: usize| {
        (!live.is_empty()).then(|| *live.keys().nth(i % live.len()).unwrap())
    };

    for op in ops {
        match op {
            Op::Insert(k) => {
                live.insert(next_id, (heap.insert(k), k));
                next_id += 1;
            }
            Op::DeleteMin => {
                let expected = live.values().map(|&(_, k)| k).min();
                match expected {
                    Some(min) => {
                        prop_assert_eq!(heap.delete_min(), Ok(min));
                        let before = live.len();
                        live.retain(|_, (h, _)| heap.contains(h));
                        prop_assert_eq!(live.len(), before - 1);
                    }
                    None => prop_assert_eq!(heap.delete_min(), Err(HeapError::EmptyHeap)),
                }
            }
            Op::DecreaseKey(i, k) => {
                if let Some(id) = pick(&live, i) {
                    let (handle, current) = live[&id];
                    let result = heap.decrease_key(&handle, k);
                    if k > current {
                        prop_assert_eq!(result, Err(HeapError::KeyIncreaseRejected));
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        live.insert(id, (handle, k));
                    }
                }
            }
            Op::Delete(i) => {
                if let Some(id) = pick(&live, i) {
                    let (handle, key) = live.remove(&id).unwrap();
                    prop_assert_eq!(heap.delete(&handle), Ok(key));
                    prop_assert!(!heap.contains(&handle));
                }
            }
            Op::Meld(keys) => {
                let mut other = FibonacciHeap::new();
                let added: Vec<_> = keys.into_iter().map(|k| (other.insert(k), k)).collect();
                prop_assert_eq!(heap.meld(&mut other), Ok(()));
                prop_assert!(other.is_empty());

                for (h, k) in added {
                    prop_assert_eq!(heap.get(&h), Ok(&k));
                    prop_assert!(!other.contains(&h));
                    live.insert(next_id, (h, k));
                    next_id += 1;
                }
            }
        }

        prop_assert_eq!(heap.len(), live.len());
        prop_assert_eq!(heap.min().ok().copied(), live.values().map(|&(_, k)| k).min());
        prop_assert!(heap.verify_structure());
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_binomial_insert_delete_min_invariant(
        ops in prop::collection::vec((prop::bool::weighted(0.4), -100i32..100), 0..200)
    ) {
        test_insert_delete_min_invariant::<BinomialHeap<i32>>(ops, BinomialHeap::verify_structure)?;
    }

    #[test]
    fn test_fibonacci_insert_delete_min_invariant(
        ops in prop::collection::vec((prop::bool::weighted(0.4), -100i32..100), 0..200)
    ) {
        test_insert_delete_min_invariant::<FibonacciHeap<i32>>(ops, FibonacciHeap::verify_structure)?;
    }

    #[test]
    fn test_binomial_meld_invariant(
        left in prop::collection::vec(-100i32..100, 0..50),
        right in prop::collection::vec(-100i32..100, 0..50)
    ) {
        test_meld_invariant::<BinomialHeap<i32>>(left, right, BinomialHeap::verify_structure)?;
    }

    #[test]
    fn test_fibonacci_meld_invariant(
        left in prop::collection::vec(-100i32..100, 0..50),
        right in prop::collection::vec(-100i32..100, 0..50)
    ) {
        test_meld_invariant::<FibonacciHeap<i32>>(left, right, FibonacciHeap::verify_structure)?;
    }

    #[test]
    fn test_fibonacci_mixed_operations(ops in prop::collection::vec(op_strategy(), 0..150)) {
        test_fibonacci_operation_sequence(ops)?;
    }

    #[test]
    fn test_fibonacci_cut_count_bound(
        keys in prop::collection::vec(0i32..10_000, 2..200),
        targets in prop::collection::vec((any::<usize>(), 1i32..500), 0..100)
    ) {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = keys.iter().map(|&k| heap.insert(k)).collect();
        heap.delete_min().unwrap();

        let mut calls = 0;
        for (i, by) in targets {
            let handle = &handles[i % handles.len()];
            if let Ok(&current) = heap.get(handle) {
                heap.decrease_key(handle, current - by).unwrap();
                calls += 1;
            }
        }
        prop_assert!(heap.cut_count() <= 2 * calls);
        prop_assert!(heap.verify_structure());
    }
}
