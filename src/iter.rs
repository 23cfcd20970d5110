//! Iterators over a pairing heap
//!
//! [`Iter`] and [`Handles`] walk the heap in pre-order over the multiway tree:
//! the root first, then each child subtree in sibling-list order. This is
//! *not* priority order; only "every node comes before its descendants" is
//! guaranteed. Use [`PairingHeap::drain_sorted`] or
//! [`PairingHeap::into_sorted_vec`] for priority order.
//!
//! The walk is iterative and climbs `prev` links to backtrack, so it needs
//! no auxiliary stack regardless of tree depth.

use crate::merge::MergeMode;
use crate::pairing::PairingHeap;
use crate::storage::{Handle, Node, NodeArena, NodeKey};
use crate::traits::Compare;
use std::iter::FusedIterator;

/// Returns the pre-order successor of `key`, or `None` past the last node
pub(crate) fn preorder_next<T>(arena: &NodeArena<T>, key: NodeKey) -> Option<NodeKey> {
    if let Some(child) = arena.child(key) {
        return Some(child);
    }

    let mut node = key;
    loop {
        if let Some(sibling) = arena.sibling(node) {
            return Some(sibling);
        }
        // Climb to the multiway parent: preceding siblings are already done,
        // so keep going until the step up came through a `child` link.
        loop {
            let prev = arena.prev(node)?;
            let via_child = arena.child(prev) == Some(node);
            node = prev;
            if via_child {
                break;
            }
        }
    }
}

/// Pre-order cursor shared by [`Iter`] and [`Handles`]
struct Preorder<'a, T> {
    arena: &'a NodeArena<T>,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Preorder<'a, T> {
    fn new(arena: &'a NodeArena<T>, root: Option<NodeKey>) -> Self {
        Preorder {
            arena,
            next: root,
            remaining: arena.len(),
        }
    }

    #[inline]
    fn advance(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        self.next = preorder_next(self.arena, current);
        self.remaining -= 1;
        Some(current)
    }
}

impl<T> Clone for Preorder<'_, T> {
    fn clone(&self) -> Self {
        Preorder {
            arena: self.arena,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

/// Borrowing iterator over the values of a heap, in pre-order
///
/// Created by [`PairingHeap::iter`].
pub struct Iter<'a, T> {
    walk: Preorder<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(arena: &'a NodeArena<T>, root: Option<NodeKey>) -> Self {
        Iter {
            walk: Preorder::new(arena, root),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            walk: self.walk.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let arena = self.walk.arena;
        self.walk.advance().map(|key| arena.value(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over the handles of every element, in pre-order
///
/// Created by [`PairingHeap::handles`]. Collect the handles before mutating
/// the heap; they stay valid until their element is removed.
pub struct Handles<'a, T> {
    walk: Preorder<'a, T>,
}

impl<'a, T> Handles<'a, T> {
    pub(crate) fn new(arena: &'a NodeArena<T>, root: Option<NodeKey>) -> Self {
        Handles {
            walk: Preorder::new(arena, root),
        }
    }
}

impl<T> Iterator for Handles<'_, T> {
    type Item = Handle;

    #[inline]
    fn next(&mut self) -> Option<Handle> {
        let arena = self.walk.arena;
        self.walk.advance().map(|key| arena.handle(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl<T> ExactSizeIterator for Handles<'_, T> {}
impl<T> FusedIterator for Handles<'_, T> {}

/// Owning iterator over the values of a heap, in arbitrary order
///
/// Created by `PairingHeap::into_iter`.
pub struct IntoIter<T> {
    pub(crate) nodes: slotmap::basic::IntoIter<NodeKey, Node<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.nodes.next().map(|(_, node)| node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

/// Draining iterator yielding elements in priority order
///
/// Created by [`PairingHeap::drain_sorted`]. Elements not consumed are
/// dropped together with the iterator, leaving the heap empty.
pub struct DrainSorted<'a, T, C: Compare<T>, M: MergeMode> {
    pub(crate) heap: &'a mut PairingHeap<T, C, M>,
}

impl<T, C: Compare<T>, M: MergeMode> Iterator for DrainSorted<'_, T, C, M> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T, C: Compare<T>, M: MergeMode> ExactSizeIterator for DrainSorted<'_, T, C, M> {}
impl<T, C: Compare<T>, M: MergeMode> FusedIterator for DrainSorted<'_, T, C, M> {}

impl<T, C: Compare<T>, M: MergeMode> Drop for DrainSorted<'_, T, C, M> {
    fn drop(&mut self) {
        if !self.heap.is_empty() {
            log::trace!("drain_sorted dropped with {} elements left", self.heap.len());
            self.heap.clear();
        }
    }
}

impl<'a, T, C: Compare<T>, M: MergeMode> IntoIterator for &'a PairingHeap<T, C, M> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C: Compare<T>, M: MergeMode> IntoIterator for PairingHeap<T, C, M> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        self.into_iter_unordered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::TwoPass;
    use crate::traits::Less;

    #[test]
    fn test_preorder_on_hand_built_tree() {
        // 0 -> [1 -> [3, 4], 2 -> [5]]
        let mut arena = NodeArena::default();
        let k: Vec<_> = (0..6).map(|v| arena.alloc(v)).collect();
        let link_children = |arena: &mut NodeArena<i32>, parent: NodeKey, kids: &[NodeKey]| {
            arena.set_child(parent, Some(kids[0]));
            arena.set_prev(kids[0], Some(parent));
            for w in kids.windows(2) {
                arena.set_sibling(w[0], Some(w[1]));
                arena.set_prev(w[1], Some(w[0]));
            }
        };
        link_children(&mut arena, k[0], &[k[1], k[2]]);
        link_children(&mut arena, k[1], &[k[3], k[4]]);
        link_children(&mut arena, k[2], &[k[5]]);

        let values: Vec<_> = Iter::new(&arena, Some(k[0])).copied().collect();
        assert_eq!(values, vec![0, 1, 3, 4, 2, 5]);
    }

    #[test]
    fn test_empty_iterators() {
        let heap: PairingHeap<i32> = PairingHeap::new();
        assert_eq!(heap.iter().next(), None);
        assert_eq!(heap.handles().next(), None);
        assert_eq!(heap.iter().len(), 0);
    }

    #[test]
    fn test_iter_starts_at_root_and_visits_all() {
        let mut heap = PairingHeap::<i32, Less, TwoPass>::default();
        for v in [8, 3, 9, 1, 7, 4] {
            heap.insert(v);
        }
        heap.pop();

        let mut iter = heap.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&3));

        let mut seen: Vec<_> = heap.iter().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![3, 4, 7, 8, 9]);
    }

    #[test]
    fn test_handles_resolve_to_iter_values() {
        let mut heap = PairingHeap::new();
        for v in [5, 2, 6, 0, 3] {
            heap.insert(v);
        }
        let via_handles: Vec<_> = heap.handles().map(|h| *heap.get(h).unwrap()).collect();
        let via_iter: Vec<_> = heap.iter().copied().collect();
        assert_eq!(via_handles, via_iter);
    }

    #[test]
    fn test_drain_sorted_drop_empties_heap() {
        let mut heap = PairingHeap::new();
        heap.extend([4, 1, 3, 2]);
        {
            let mut drain = heap.drain_sorted();
            assert_eq!(drain.next(), Some(1));
            assert_eq!(drain.len(), 3);
        }
        assert!(heap.is_empty());
    }
}
