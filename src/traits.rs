//! Common traits and error types for the pairing heap
//!
//! - [`Compare`]: the ordering policy deciding which of two elements has priority
//! - [`HeapError`]: errors reported by fallible heap operations
//!
//! A comparator answers `compare(a, b) == true` when `a` must be closer to the
//! root than `b`. [`Less`] therefore gives a min-heap and [`Greater`] a max-heap.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap has no elements
    EmptyHeap,
    /// The handle is no longer valid (element was removed)
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Strict weak ordering used to arrange elements in the heap
///
/// `compare(a, b)` returns true if `a` has strictly higher priority than `b`.
/// Equivalent elements must compare false in both directions.
///
/// Any `Fn(&T, &T) -> bool` closure is a comparator:
///
/// ```rust
/// use rust_pairing_heap::PairingHeap;
///
/// let mut heap = PairingHeap::with_comparator(|a: &i32, b: &i32| a.abs() < b.abs());
/// heap.insert(-7);
/// heap.insert(2);
/// heap.insert(-1);
/// assert_eq!(heap.find_min(), Ok(&-1));
/// ```
pub trait Compare<T: ?Sized> {
    /// Returns true if `a` has strictly higher priority than `b`
    fn compare(&self, a: &T, b: &T) -> bool;
}

/// Natural ascending order; the root holds the smallest element
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Less;

impl<T: Ord + ?Sized> Compare<T> for Less {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Natural descending order; the root holds the largest element
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Greater;

impl<T: Ord + ?Sized> Compare<T> for Greater {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

/// Ascending order of a key extracted from each element
///
/// ```rust
/// use rust_pairing_heap::{ByKey, PairingHeap};
///
/// let mut heap = PairingHeap::with_comparator(ByKey(|task: &(u32, &str)| task.0));
/// heap.insert((3, "write"));
/// heap.insert((1, "read"));
/// assert_eq!(heap.pop(), Some((1, "read")));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ByKey<F>(pub F);

impl<T, K, F> Compare<T> for ByKey<F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> bool {
        (self.0)(a) < (self.0)(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Comparator in which the left operand always wins
///
/// Used by erase to force a node to the root regardless of its value.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LeftWins;

impl<T: ?Sized> Compare<T> for LeftWins {
    #[inline]
    fn compare(&self, _a: &T, _b: &T) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_less_and_greater() {
        assert!(Less.compare(&1, &2));
        assert!(!Less.compare(&2, &2));
        assert!(Greater.compare(&3, &2));
        assert!(!Greater.compare(&2, &2));
    }

    #[test]
    fn test_by_key() {
        let by_len = ByKey(|s: &&str| s.len());
        assert!(by_len.compare(&"ab", &"abc"));
        assert!(!by_len.compare(&"abc", &"xyz"));
    }

    #[test]
    fn test_closure_comparator() {
        let reversed = |a: &i32, b: &i32| a > b;
        assert!(Compare::compare(&reversed, &5, &4));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(HeapError::EmptyHeap.to_string(), "heap is empty");
        assert_eq!(
            HeapError::InvalidHandle.to_string(),
            "handle is no longer valid (element was removed)"
        );
    }
}
