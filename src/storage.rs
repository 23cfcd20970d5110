//! Arena-backed node storage for the pairing heap
//!
//! Nodes live in a [`SlotMap`] owned by the heap. Structural links are
//! generational keys rather than pointers, so a key that outlives its node is
//! detected instead of dangling.
//!
//! # Encoding
//!
//! The multiway tree is stored in left-child/right-sibling form:
//!
//! - `child` is the first child of a node
//! - `sibling` is the next node in the parent's child list
//! - `prev` is the back-link of the binary form: the parent for a first
//!   child, the preceding sibling for every later child, `None` for a root
//!
//! Keeping `prev` makes unlinking a node from its sibling list O(1).
//!
//! # Ownership of keys
//!
//! Every arena carries a process-unique `ArenaId`, and handles record the
//! id of the arena that issued them. Keys of two arenas can coincide, so a
//! handle is only resolved when its id matches.

use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    /// Arena key of a heap node
    pub struct NodeKey;
}

/// Identity of one node arena
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct ArenaId(u64);

impl ArenaId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ArenaId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to an element in a [`PairingHeap`](crate::pairing::PairingHeap)
///
/// Handles are returned by `insert` and accepted by `decrease_key`, `erase`,
/// `get` and `get_mut`. They are plain `Copy` values. A handle whose element
/// has been removed, or whose element lives in another heap's storage, is
/// reported as [`HeapError::InvalidHandle`](crate::HeapError::InvalidHandle).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Handle {
    pub(crate) arena: ArenaId,
    pub(crate) key: NodeKey,
}

/// A heap element together with its structural links
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<NodeKey>,
    pub(crate) child: Option<NodeKey>,
    pub(crate) sibling: Option<NodeKey>,
}

impl<T> Node<T> {
    #[inline]
    fn singleton(value: T) -> Self {
        Node {
            value,
            prev: None,
            child: None,
            sibling: None,
        }
    }
}

/// Flat node storage with link accessors
///
/// All accessors take keys that the heap knows to be live; looking up a
/// dead key here is a logic error inside the crate and panics through
/// `SlotMap` indexing. Handle validity coming from callers is checked by the
/// heap with [`NodeArena::resolve`] before any link is touched.
pub struct NodeArena<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    id: ArenaId,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        NodeArena {
            nodes: SlotMap::with_key(),
            id: ArenaId::fresh(),
        }
    }
}

impl<T> NodeArena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: SlotMap::with_capacity_and_key(capacity),
            id: ArenaId::fresh(),
        }
    }

    /// Allocates an isolated singleton node
    #[inline]
    pub(crate) fn alloc(&mut self, value: T) -> NodeKey {
        self.nodes.insert(Node::singleton(value))
    }

    /// Wraps a key of this arena into a handle
    #[inline]
    pub(crate) fn handle(&self, key: NodeKey) -> Handle {
        Handle { arena: self.id, key }
    }

    /// Returns the key behind `handle` if it was issued here and is still live
    #[inline]
    pub(crate) fn resolve(&self, handle: Handle) -> Option<NodeKey> {
        (handle.arena == self.id && self.nodes.contains_key(handle.key)).then_some(handle.key)
    }

    /// Frees a node and returns its value
    ///
    /// The node must already be unlinked from every other node.
    #[inline]
    pub(crate) fn free(&mut self, key: NodeKey) -> Option<T> {
        self.nodes.remove(key).map(|node| node.value)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline]
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    #[inline]
    pub(crate) fn value(&self, key: NodeKey) -> &T {
        &self.nodes[key].value
    }

    #[inline]
    pub(crate) fn get(&self, key: NodeKey) -> Option<&T> {
        self.nodes.get(key).map(|node| &node.value)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        self.nodes.get_mut(key).map(|node| &mut node.value)
    }

    #[inline]
    pub(crate) fn prev(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes[key].prev
    }

    #[inline]
    pub(crate) fn child(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes[key].child
    }

    #[inline]
    pub(crate) fn sibling(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes[key].sibling
    }

    #[inline]
    pub(crate) fn set_prev(&mut self, key: NodeKey, prev: Option<NodeKey>) {
        self.nodes[key].prev = prev;
    }

    #[inline]
    pub(crate) fn set_child(&mut self, key: NodeKey, child: Option<NodeKey>) {
        self.nodes[key].child = child;
    }

    #[inline]
    pub(crate) fn set_sibling(&mut self, key: NodeKey, sibling: Option<NodeKey>) {
        self.nodes[key].sibling = sibling;
    }

    /// Detaches the head of a sibling list, returning the rest of the list
    ///
    /// The detached node keeps its own subtree (`child`) but loses its
    /// `prev` and `sibling` links. The new head of the remainder gets its
    /// `prev` cleared so it can be detached in turn.
    #[inline]
    pub(crate) fn detach_head(&mut self, key: NodeKey) -> Option<NodeKey> {
        let rest = self.nodes[key].sibling.take();
        self.nodes[key].prev = None;
        if let Some(next) = rest {
            self.nodes[next].prev = None;
        }
        rest
    }

    /// Unlinks a non-root node (with its subtree) from its sibling list
    ///
    /// Afterwards the node is the root of a detached tree.
    pub(crate) fn cut(&mut self, key: NodeKey) {
        let Some(prev) = self.nodes[key].prev.take() else {
            return;
        };
        let next = self.nodes[key].sibling.take();

        if self.nodes[prev].child == Some(key) {
            self.nodes[prev].child = next;
        } else {
            debug_assert_eq!(self.nodes[prev].sibling, Some(key));
            self.nodes[prev].sibling = next;
        }
        if let Some(next) = next {
            self.nodes[next].prev = Some(prev);
        }
    }

    /// Consumes the arena, yielding every stored node in slot order
    pub(crate) fn into_nodes(self) -> slotmap::basic::IntoIter<NodeKey, Node<T>> {
        self.nodes.into_iter()
    }
}
