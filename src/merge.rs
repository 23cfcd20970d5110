//! Pairing primitive and forest reduction strategies
//!
//! After the root of a pairing heap is removed, its children form a forest:
//! a sibling-linked list of heap-ordered trees. A [`MergeMode`] reduces that
//! forest back to a single tree using only [`pair`].
//!
//! Two strategies are provided:
//!
//! - [`TwoPass`]: pair adjacent trees left to right, then fold the winners
//!   right to left. This is the classic pairing heap reduction and the default.
//! - [`FifoQueue`]: queue every tree, then repeatedly pair the two oldest trees
//!   and enqueue the result until one tree remains.
//!
//! Both are deterministic: the same forest always reduces to the same shape.
//! Scratch state lives in a temporary stack or queue; structural links are
//! only ever used for the tree itself.

use crate::storage::{NodeArena, NodeKey};
use crate::traits::Compare;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;

/// Links two detached roots, returning the root of the combined tree
///
/// The winner is `a` if `cmp.compare(a, b)`, otherwise `b`. The loser becomes
/// the winner's first child.
#[inline]
pub(crate) fn pair<T, C>(arena: &mut NodeArena<T>, cmp: &C, a: NodeKey, b: NodeKey) -> NodeKey
where
    C: Compare<T> + ?Sized,
{
    debug_assert!(arena.prev(a).is_none() && arena.sibling(a).is_none());
    debug_assert!(arena.prev(b).is_none() && arena.sibling(b).is_none());

    let (winner, loser) = if cmp.compare(arena.value(a), arena.value(b)) {
        (a, b)
    } else {
        (b, a)
    };

    let old_child = arena.child(winner);
    arena.set_sibling(loser, old_child);
    if let Some(old_child) = old_child {
        arena.set_prev(old_child, Some(loser));
    }
    arena.set_child(winner, Some(loser));
    arena.set_prev(loser, Some(winner));
    winner
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::TwoPass {}
    impl Sealed for super::FifoQueue {}
}

/// Strategy for reducing a forest of heap-ordered trees to a single tree
///
/// This trait is sealed; the heap selects a strategy through its `M` type
/// parameter and dispatches statically.
pub trait MergeMode: sealed::Sealed {
    /// Human-readable strategy name
    const NAME: &'static str;

    /// Reduces the sibling list starting at `first` to one tree and returns its root
    ///
    /// `first` must have no `prev` link.
    #[doc(hidden)]
    fn reduce<T, C>(arena: &mut NodeArena<T>, cmp: &C, first: NodeKey) -> NodeKey
    where
        C: Compare<T> + ?Sized;
}

/// Classic two-pass reduction (default)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TwoPass;

/// FIFO queue reduction
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FifoQueue;

impl fmt::Display for TwoPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAME)
    }
}

impl fmt::Display for FifoQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAME)
    }
}

impl MergeMode for TwoPass {
    const NAME: &'static str = "two-pass";

    fn reduce<T, C>(arena: &mut NodeArena<T>, cmp: &C, first: NodeKey) -> NodeKey
    where
        C: Compare<T> + ?Sized,
    {
        debug_assert!(arena.prev(first).is_none());

        // First pass: left to right, pair adjacent trees
        let mut winners: SmallVec<[NodeKey; 32]> = SmallVec::new();
        let mut next = Some(first);
        while let Some(a) = next {
            match arena.detach_head(a) {
                Some(b) => {
                    next = arena.detach_head(b);
                    winners.push(pair(arena, cmp, a, b));
                }
                None => {
                    next = None;
                    winners.push(a);
                }
            }
        }

        // Second pass: right to left, fold into the last winner
        let Some(mut root) = winners.pop() else {
            return first;
        };
        while let Some(tree) = winners.pop() {
            root = pair(arena, cmp, root, tree);
        }
        root
    }
}

impl MergeMode for FifoQueue {
    const NAME: &'static str = "fifo-queue";

    fn reduce<T, C>(arena: &mut NodeArena<T>, cmp: &C, first: NodeKey) -> NodeKey
    where
        C: Compare<T> + ?Sized,
    {
        debug_assert!(arena.prev(first).is_none());

        let mut queue = VecDeque::new();
        let mut next = Some(first);
        while let Some(tree) = next {
            next = arena.detach_head(tree);
            queue.push_back(tree);
        }

        loop {
            let Some(a) = queue.pop_front() else {
                return first;
            };
            let Some(b) = queue.pop_front() else {
                return a;
            };
            queue.push_back(pair(arena, cmp, a, b));
        }
    }
}
