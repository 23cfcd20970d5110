//! Stress tests that push the heap to its limits
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load. Several of them
//! build degenerate trees (long sibling chains, deep child chains) to make
//! sure clone, iteration and drop never recurse on tree depth.

use rust_pairing_heap::{FifoQueue, Less, MergeMode, PairingHeap, TwoPass};

type Heap<T, M> = PairingHeap<T, Less, M>;

/// Test massive numbers of inserts and pops
fn test_massive_operations<M: MergeMode>() {
    let mut heap = Heap::<i32, M>::default();

    for i in 0..10_000 {
        heap.insert(i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.pop(), Some(i));
    }
    assert!(heap.is_empty());
}

/// Test many decrease_key operations
fn test_many_decrease_keys<M: MergeMode>() {
    let mut heap = Heap::<(i32, i32), M>::default();
    let mut handles = Vec::new();

    for i in 0..500 {
        handles.push(heap.insert((10_000 + i, i)));
    }
    // Give the tree some depth before decreasing
    heap.insert((-1, -1));
    assert_eq!(heap.pop(), Some((-1, -1)));

    for (i, handle) in handles.iter().enumerate() {
        assert!(heap.update(*handle, |e| e.0 = i as i32).is_ok());
    }

    for i in 0..500 {
        assert_eq!(heap.pop(), Some((i, i)));
    }
}

/// Test alternating insert and pop
fn test_alternating_ops<M: MergeMode>() {
    let mut heap = Heap::<i32, M>::default();

    for i in 0..2_000 {
        heap.insert(i * 2);
        heap.insert(i * 2 + 1);
        assert!(heap.pop().is_some());
    }
    assert_eq!(heap.len(), 2_000);

    let mut last = i32::MIN;
    while let Some(value) = heap.pop() {
        assert!(value >= last);
        last = value;
    }
}

/// Test meld with large heaps
fn test_large_meld<M: MergeMode>() {
    let mut heap1 = Heap::<i32, M>::default();
    let mut heap2 = Heap::<i32, M>::default();

    for i in 0..5_000 {
        heap1.insert(i * 2);
        heap2.insert(i * 2 + 1);
    }
    heap1.pop();
    heap2.pop();

    heap1.meld(heap2);
    assert_eq!(heap1.len(), 9_998);

    let sorted = heap1.into_sorted_vec();
    assert_eq!(sorted.len(), 9_998);
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(sorted[0], 2);
}

/// Descending inserts make every new element the root, producing a child
/// chain as deep as the heap is large
fn test_deep_chain<M: MergeMode>() {
    let mut heap = Heap::<u32, M>::default();
    for i in (0..100_000).rev() {
        heap.insert(i);
    }

    let copy = heap.clone();
    assert_eq!(copy.len(), 100_000);
    assert_eq!(copy.iter().count(), 100_000);
    assert_eq!(copy.iter().next(), Some(&0));
    drop(copy);

    assert_eq!(heap.handles().count(), 100_000);
    drop(heap);
}

/// Ascending inserts hang everything off the root as one long sibling list
fn test_wide_root<M: MergeMode>() {
    let mut heap = Heap::<u32, M>::default();
    for i in 0..100_000 {
        heap.insert(i);
    }
    let copy = heap.clone();

    assert_eq!(heap.pop(), Some(0));
    assert_eq!(heap.pop(), Some(1));
    assert_eq!(copy.len(), 100_000);
    assert_eq!(heap.len(), 99_998);
}

/// Test mixed erase, decrease_key and pop across many rounds
fn test_mixed_handle_ops<M: MergeMode>() {
    let mut heap = Heap::<i64, M>::default();
    let mut live = Vec::new();

    for round in 0..50i64 {
        for i in 0..100i64 {
            let value = 1_000_000 + ((round * 100 + i) * 7_919) % 100_003;
            live.push(heap.insert(value));
        }
        heap.pop();

        // Erase every fifth live handle, lower every seventh
        live.retain(|h| heap.contains(*h));
        let mut idx = 0;
        live.retain(|h| {
            idx += 1;
            idx % 5 != 0 || heap.erase(*h).is_err()
        });
        for h in live.iter().step_by(7) {
            heap.update(*h, |v| *v -= 500_000).unwrap();
        }
        assert_eq!(heap.len(), live.len());
    }

    let sorted = heap.into_sorted_vec();
    assert_eq!(sorted.len(), live.len());
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
}

/// Test with extreme values
fn test_large_priorities<M: MergeMode>() {
    let mut heap = Heap::<i64, M>::default();

    heap.insert(i64::MAX);
    heap.insert(i64::MIN);
    heap.insert(0);
    heap.insert(i64::MAX - 1);
    heap.insert(i64::MIN + 1);

    assert_eq!(
        heap.into_sorted_vec(),
        vec![i64::MIN, i64::MIN + 1, 0, i64::MAX - 1, i64::MAX]
    );
}

macro_rules! stress_test {
    ($name:ident, $mode:ty, $func:ident) => {
        #[test]
        fn $name() {
            $func::<$mode>();
        }
    };
}

stress_test!(test_two_pass_massive, TwoPass, test_massive_operations);
stress_test!(test_two_pass_many_decrease_keys, TwoPass, test_many_decrease_keys);
stress_test!(test_two_pass_alternating, TwoPass, test_alternating_ops);
stress_test!(test_two_pass_large_meld, TwoPass, test_large_meld);
stress_test!(test_two_pass_deep_chain, TwoPass, test_deep_chain);
stress_test!(test_two_pass_wide_root, TwoPass, test_wide_root);
stress_test!(test_two_pass_mixed_handle_ops, TwoPass, test_mixed_handle_ops);
stress_test!(test_two_pass_large_priorities, TwoPass, test_large_priorities);

stress_test!(test_fifo_massive, FifoQueue, test_massive_operations);
stress_test!(test_fifo_many_decrease_keys, FifoQueue, test_many_decrease_keys);
stress_test!(test_fifo_alternating, FifoQueue, test_alternating_ops);
stress_test!(test_fifo_large_meld, FifoQueue, test_large_meld);
stress_test!(test_fifo_deep_chain, FifoQueue, test_deep_chain);
stress_test!(test_fifo_wide_root, FifoQueue, test_wide_root);
stress_test!(test_fifo_mixed_handle_ops, FifoQueue, test_mixed_handle_ops);
stress_test!(test_fifo_large_priorities, FifoQueue, test_large_priorities);
