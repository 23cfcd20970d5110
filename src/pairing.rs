//! Pairing Heap implementation
//!
//! A pairing heap is a self-adjusting heap-ordered multiway tree with:
//! - O(1) insert and meld
//! - O(log n) amortized delete_min
//! - o(log n) amortized decrease_key
//!
//! Every structural change is expressed through one primitive, `pair`, which
//! links two trees so that the higher-priority root wins. After the root is
//! removed, its children are reduced back to one tree by the heap's
//! [`MergeMode`].
//!
//! # Type parameters
//!
//! - `T`: the element type
//! - `C`: the ordering policy, see [`Compare`]; defaults to [`Less`] (min-heap)
//! - `M`: the forest reduction strategy; defaults to [`TwoPass`]
//!
//! # Handles
//!
//! [`insert`](PairingHeap::insert) returns a [`Handle`] that stays valid while
//! its element is in the heap, no matter how the tree is restructured. Handles
//! are checked on every use: one whose element has been removed, or that was
//! issued by a different heap, yields [`HeapError::InvalidHandle`] instead of
//! touching another element.

use crate::iter::{DrainSorted, Handles, IntoIter, Iter};
use crate::merge::{pair, MergeMode, TwoPass};
use crate::storage::{Handle, Node, NodeArena, NodeKey};
use crate::traits::{Compare, HeapError, LeftWins, Less};
use slotmap::SecondaryMap;
use std::fmt;
use std::marker::PhantomData;
use std::mem;

/// Pairing Heap
///
/// # Example
///
/// ```rust
/// use rust_pairing_heap::PairingHeap;
///
/// let mut heap = PairingHeap::new();
/// heap.insert(5);
/// let handle = heap.insert(8);
/// heap.insert(3);
///
/// // Improve an element in place, then restore heap order
/// *heap.get_mut(handle).unwrap() = 1;
/// heap.decrease_key(handle).unwrap();
///
/// assert_eq!(heap.find_min(), Ok(&1));
/// assert_eq!(heap.into_sorted_vec(), vec![1, 3, 5]);
/// ```
pub struct PairingHeap<T, C = Less, M = TwoPass> {
    arena: NodeArena<T>,
    root: Option<NodeKey>,
    cmp: C,
    _mode: PhantomData<M>,
}

impl<T: Ord> PairingHeap<T> {
    /// Creates an empty min-heap using the default two-pass strategy
    pub fn new() -> Self {
        Self::with_policy(Less)
    }

    /// Creates an empty min-heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_policy(capacity, Less)
    }
}

impl<T, C: Compare<T>> PairingHeap<T, C> {
    /// Creates an empty heap ordered by `cmp`, using the two-pass strategy
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_policy(cmp)
    }

    /// Creates an empty heap ordered by `cmp` with room for `capacity` elements
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self::with_capacity_and_policy(capacity, cmp)
    }
}

impl<T, C: Compare<T>, M: MergeMode> PairingHeap<T, C, M> {
    /// Creates an empty heap ordered by `cmp` for any merge strategy
    ///
    /// ```rust
    /// use rust_pairing_heap::{FifoQueue, Greater, PairingHeap};
    ///
    /// let mut heap = PairingHeap::<_, _, FifoQueue>::with_policy(Greater);
    /// heap.extend([2, 9, 4]);
    /// assert_eq!(heap.pop(), Some(9));
    /// ```
    pub fn with_policy(cmp: C) -> Self {
        PairingHeap {
            arena: NodeArena::default(),
            root: None,
            cmp,
            _mode: PhantomData,
        }
    }

    /// Creates an empty heap ordered by `cmp` with room for `capacity` elements
    pub fn with_capacity_and_policy(capacity: usize, cmp: C) -> Self {
        PairingHeap {
            arena: NodeArena::with_capacity(capacity),
            root: None,
            cmp,
            _mode: PhantomData,
        }
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns the number of elements in the heap as a signed integer
    #[inline]
    pub fn ssize(&self) -> isize {
        isize::try_from(self.len()).unwrap_or(isize::MAX)
    }

    /// Returns the number of elements the heap can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Reserves room for at least `additional` more elements
    pub fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional);
    }

    /// Returns the ordering policy of this heap
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Inserts an element, returning a handle to it
    ///
    /// Existing handles are never invalidated by an insertion.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, value: T) -> Handle {
        // Allocate before relinking so a failed allocation leaves the heap untouched
        let node = self.arena.alloc(value);
        self.root = Some(match self.root {
            Some(root) => pair(&mut self.arena, &self.cmp, root, node),
            None => node,
        });
        self.arena.handle(node)
    }

    /// Inserts an element; alias of [`insert`](Self::insert)
    #[inline]
    pub fn push(&mut self, value: T) -> Handle {
        self.insert(value)
    }

    /// Returns the element with the highest priority
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap has no elements.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn find_min(&self) -> Result<&T, HeapError> {
        self.peek().ok_or(HeapError::EmptyHeap)
    }

    /// Returns the element with the highest priority, or `None` if empty
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.root.map(|root| self.arena.value(root))
    }

    /// Returns the handle of the element with the highest priority
    pub fn handle_of_min(&self) -> Option<Handle> {
        self.root.map(|root| self.arena.handle(root))
    }

    /// Removes and returns the element with the highest priority
    ///
    /// The children of the removed root are reduced to a new root by the
    /// heap's merge strategy.
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap has no elements.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete_min(&mut self) -> Result<T, HeapError> {
        let root = self.root.ok_or(HeapError::EmptyHeap)?;

        self.root = match self.arena.child(root) {
            Some(first) => {
                self.arena.set_child(root, None);
                self.arena.set_prev(first, None);
                Some(M::reduce(&mut self.arena, &self.cmp, first))
            }
            None => None,
        };

        self.arena.free(root).ok_or(HeapError::EmptyHeap)
    }

    /// Removes and returns the element with the highest priority, or `None` if empty
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.delete_min().ok()
    }

    /// Returns the element behind `handle`, or `None` if it is not live in this heap
    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.arena.resolve(handle).and_then(|key| self.arena.get(key))
    }

    /// Returns the element behind `handle` mutably, or `None` if it is not live in this heap
    ///
    /// Changing the element's priority through this reference is only allowed
    /// when the priority improves, and must be followed by
    /// [`decrease_key`](Self::decrease_key). Making it worse breaks heap order.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let key = self.arena.resolve(handle)?;
        self.arena.get_mut(key)
    }

    /// Returns true if `handle` refers to an element still in this heap
    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.arena.resolve(handle).is_some()
    }

    /// Restores heap order after the element behind `handle` was improved
    ///
    /// The caller must already have raised the element's priority (for the
    /// default min-heap: made it smaller) through [`get_mut`](Self::get_mut).
    /// Calling this after making the priority worse leaves the heap unordered.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the element was removed or the
    /// handle was issued by another heap.
    ///
    /// # Time Complexity
    /// O(1) restructuring; o(log n) amortized including future delete_min cost
    pub fn decrease_key(&mut self, handle: Handle) -> Result<(), HeapError> {
        let (root, key) = self.live_root(handle)?;
        self.root = Some(Self::promote(&mut self.arena, &self.cmp, root, key));
        Ok(())
    }

    /// Applies `f` to the element behind `handle`, then runs [`decrease_key`](Self::decrease_key)
    ///
    /// `f` must not lower the element's priority.
    ///
    /// ```rust
    /// use rust_pairing_heap::PairingHeap;
    ///
    /// let mut heap = PairingHeap::new();
    /// heap.insert((2, "b"));
    /// let a = heap.insert((7, "a"));
    /// heap.update(a, |entry| entry.0 = 1).unwrap();
    /// assert_eq!(heap.find_min(), Ok(&(1, "a")));
    /// ```
    pub fn update<F>(&mut self, handle: Handle, f: F) -> Result<(), HeapError>
    where
        F: FnOnce(&mut T),
    {
        let value = self.get_mut(handle).ok_or(HeapError::InvalidHandle)?;
        f(value);
        self.decrease_key(handle)
    }

    /// Removes the element behind `handle` and returns it
    ///
    /// The node is forced to the root regardless of its priority, then
    /// removed the same way as by [`delete_min`](Self::delete_min). All other
    /// handles stay valid.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the element was already removed or
    /// the handle was issued by another heap.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn erase(&mut self, handle: Handle) -> Result<T, HeapError> {
        let (root, key) = self.live_root(handle)?;
        self.root = Some(Self::promote(&mut self.arena, &LeftWins, root, key));
        self.delete_min()
    }

    /// Melds `other` into this heap, consuming it
    ///
    /// Handles issued by `self` stay valid. If `self` is empty it takes over
    /// `other`'s storage, so `other`'s handles stay valid too. Otherwise
    /// `other`'s nodes are moved into this heap's storage under new keys, and
    /// handles issued by `other` are reported as [`HeapError::InvalidHandle`]
    /// from then on.
    ///
    /// # Time Complexity
    /// O(1) if either heap is empty, O(|other|) otherwise
    pub fn meld(&mut self, mut other: Self) -> &mut Self {
        let Some(other_root) = other.root.take() else {
            return self;
        };
        let Some(root) = self.root else {
            // Stale handles of `self` carry the old arena id and stay rejected
            mem::swap(&mut self.arena, &mut other.arena);
            self.root = Some(other_root);
            return self;
        };

        let moved = self.transplant(mem::take(&mut other.arena), other_root);
        self.root = Some(pair(&mut self.arena, &self.cmp, root, moved));
        self
    }

    /// Swaps the contents of two heaps in O(1)
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Removes every element, leaving the heap empty
    ///
    /// All handles are invalidated. Capacity is kept.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            log::trace!("clearing pairing heap of {} elements", self.len());
        }
        self.arena.clear();
        self.root = None;
    }

    /// Returns an iterator over all elements in pre-order (not sorted)
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.root)
    }

    /// Returns an iterator over the handles of all elements in pre-order
    pub fn handles(&self) -> Handles<'_, T> {
        Handles::new(&self.arena, self.root)
    }

    /// Removes elements in priority order through an iterator
    ///
    /// Elements left when the iterator is dropped are discarded.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, C, M> {
        DrainSorted { heap: self }
    }

    /// Consumes the heap, returning its elements in priority order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(value) = self.delete_min() {
            sorted.push(value);
        }
        sorted
    }

    /// Consumes the heap, returning its elements in arbitrary order
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter_unordered().collect()
    }

    pub(crate) fn into_iter_unordered(self) -> IntoIter<T> {
        IntoIter {
            nodes: self.arena.into_nodes(),
        }
    }

    /// Root of the heap and the node behind `handle`, provided it is live here
    fn live_root(&self, handle: Handle) -> Result<(NodeKey, NodeKey), HeapError> {
        let key = self.arena.resolve(handle).ok_or(HeapError::InvalidHandle)?;
        let root = self.root.ok_or(HeapError::InvalidHandle)?;
        Ok((root, key))
    }

    /// Cuts `key` out of the tree and pairs it with the root under `cmp`
    fn promote<K>(arena: &mut NodeArena<T>, cmp: &K, root: NodeKey, key: NodeKey) -> NodeKey
    where
        K: Compare<T> + ?Sized,
    {
        if key == root {
            return root;
        }
        arena.cut(key);
        pair(arena, cmp, key, root)
    }

    /// Moves every node of `source` into this heap's arena, keeping the shape
    ///
    /// Returns the new key of `source_root`.
    fn transplant(&mut self, source: NodeArena<T>, source_root: NodeKey) -> NodeKey {
        let count = source.len();
        log::trace!("meld: moving {} nodes into a heap of {}", count, self.len());

        let mut remap: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::with_capacity(count);
        let mut links = Vec::with_capacity(count);
        self.arena.reserve(count);

        for (old, node) in source.into_nodes() {
            let Node {
                value,
                prev,
                child,
                sibling,
            } = node;
            let new = self.arena.alloc(value);
            remap.insert(old, new);
            links.push((new, prev, child, sibling));
        }

        for (new, prev, child, sibling) in links {
            self.arena.set_prev(new, prev.map(|k| remap[k]));
            self.arena.set_child(new, child.map(|k| remap[k]));
            self.arena.set_sibling(new, sibling.map(|k| remap[k]));
        }

        remap[source_root]
    }
}

/// Melds two heaps into a new one
///
/// Both operands are consumed; clone them first to keep the originals. The
/// smaller operand is moved into the larger one, whose handles stay valid;
/// handles of the smaller one are rejected by the result.
///
/// ```rust
/// use rust_pairing_heap::{meld, PairingHeap};
///
/// let a: PairingHeap<_> = vec![4, 8].into();
/// let b: PairingHeap<_> = vec![6, 2, 9].into();
/// let both = meld(a.clone(), b);
/// assert_eq!(both.len(), 5);
/// assert_eq!(both.find_min(), Ok(&2));
/// assert_eq!(a.len(), 2);
/// ```
pub fn meld<T, C, M>(lhs: PairingHeap<T, C, M>, rhs: PairingHeap<T, C, M>) -> PairingHeap<T, C, M>
where
    C: Compare<T>,
    M: MergeMode,
{
    let (mut into, from) = if rhs.len() > lhs.len() {
        (rhs, lhs)
    } else {
        (lhs, rhs)
    };
    into.meld(from);
    into
}

impl<T, C: Compare<T> + Default, M: MergeMode> Default for PairingHeap<T, C, M> {
    fn default() -> Self {
        Self::with_policy(C::default())
    }
}

impl<T: Clone, C: Compare<T> + Clone, M: MergeMode> Clone for PairingHeap<T, C, M> {
    /// Deep copy with the same tree shape
    ///
    /// The copy has its own compact storage; handles of `self` are rejected
    /// by the copy with [`HeapError::InvalidHandle`].
    fn clone(&self) -> Self {
        let mut arena = NodeArena::with_capacity(self.len());
        let root = self.root.map(|root| deep_copy(&self.arena, &mut arena, root));
        log::trace!("cloned pairing heap of {} elements", arena.len());
        PairingHeap {
            arena,
            root,
            cmp: self.cmp.clone(),
            _mode: PhantomData,
        }
    }
}

/// Copies the tree under `src_root` into `dst`, returning the new root
///
/// Walks source and copy in lockstep: descend to an uncopied child, else move
/// to an uncopied sibling, else step back along `prev`. Each node is copied
/// exactly once and no stack is needed.
fn deep_copy<T: Clone>(src: &NodeArena<T>, dst: &mut NodeArena<T>, src_root: NodeKey) -> NodeKey {
    let dst_root = dst.alloc(src.value(src_root).clone());
    let (mut s, mut d) = (src_root, dst_root);

    loop {
        if let (Some(sc), None) = (src.child(s), dst.child(d)) {
            let dc = dst.alloc(src.value(sc).clone());
            dst.set_child(d, Some(dc));
            dst.set_prev(dc, Some(d));
            (s, d) = (sc, dc);
        } else if let (Some(ss), None) = (src.sibling(s), dst.sibling(d)) {
            let ds = dst.alloc(src.value(ss).clone());
            dst.set_sibling(d, Some(ds));
            dst.set_prev(ds, Some(d));
            (s, d) = (ss, ds);
        } else {
            match (src.prev(s), dst.prev(d)) {
                (Some(sp), Some(dp)) => (s, d) = (sp, dp),
                _ => break,
            }
        }
    }

    dst_root
}

impl<T: fmt::Debug, C, M> fmt::Debug for PairingHeap<T, C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elements = Iter::new(&self.arena, self.root);
        f.debug_struct("PairingHeap")
            .field("len", &self.arena.len())
            .field("elements", &DebugList(elements))
            .finish()
    }
}

struct DebugList<'a, T>(Iter<'a, T>);

impl<T: fmt::Debug> fmt::Debug for DebugList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

impl<T, C: Compare<T>, M: MergeMode> Extend<T> for PairingHeap<T, C, M> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C: Compare<T> + Default, M: MergeMode> FromIterator<T> for PairingHeap<T, C, M> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}

impl<T, C: Compare<T> + Default, M: MergeMode> From<Vec<T>> for PairingHeap<T, C, M> {
    fn from(values: Vec<T>) -> Self {
        let mut heap = Self::with_capacity_and_policy(values.len(), C::default());
        heap.extend(values);
        heap
    }
}
