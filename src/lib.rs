//! Addressable Pairing Heap for Rust
//!
//! This crate provides a pairing heap whose ordering and merge behavior are
//! chosen at compile time, with stable handles to stored elements.
//!
//! # Features
//!
//! - **O(1) insert and meld**, O(log n) amortized delete-min, o(log n) amortized decrease-key
//! - **Handles**: `insert` returns a [`Handle`] usable with `get`, `get_mut`,
//!   `decrease_key` and `erase`; a handle whose element was removed, or that
//!   belongs to another heap (including one consumed by `meld`), is reported
//!   as [`HeapError::InvalidHandle`]
//! - **Pluggable ordering**: [`Less`] (min-heap, default), [`Greater`],
//!   [`ByKey`] or any `Fn(&T, &T) -> bool`
//! - **Pluggable merge strategy**: [`TwoPass`] (default) or [`FifoQueue`]
//! - **No recursion**: clone, drop and iteration never grow the call stack
//!   with tree depth
//!
//! # Example
//!
//! ```rust
//! use rust_pairing_heap::{PairingHeap, HeapError};
//!
//! let mut heap = PairingHeap::new();
//! let five = heap.insert(5);
//! heap.insert(3);
//! heap.insert(8);
//!
//! heap.update(five, |v| *v = 1).unwrap();
//! assert_eq!(heap.find_min(), Ok(&1));
//!
//! assert_eq!(heap.delete_min(), Ok(1));
//! assert_eq!(heap.erase(five), Err(HeapError::InvalidHandle));
//! assert_eq!(heap.into_sorted_vec(), vec![3, 8]);
//! ```

pub mod iter;
pub mod merge;
pub mod pairing;
mod storage;
pub mod traits;

// Re-export the main types for convenience
pub use iter::{DrainSorted, Handles, IntoIter, Iter};
pub use merge::{FifoQueue, MergeMode, TwoPass};
pub use pairing::{meld, PairingHeap};
pub use storage::Handle;
pub use traits::{ByKey, Compare, Greater, HeapError, Less};
