//! Mergeable Heap Data Structures for Rust
//!
//! This crate provides two classical mergeable priority queues built on one
//! node representation: circular doubly-linked rings of siblings stored in a
//! slotmap arena.
//!
//! # Features
//!
//! - **Binomial Heap**: O(1) insert and meld; O(log n) amortized delete-min
//! - **Fibonacci Heap**: O(1) insert and meld; O(1) amortized decrease_key;
//!   O(log n) amortized delete-min and delete
//! - **AnyHeap**: either variant behind one type, with runtime checks for
//!   cross-variant misuse
//! - **StdHeap**: a `BinaryHeap`-shaped wrapper over any of the above
//!
//! Capabilities are layered as [`PriorityQueue`] ⊂ [`MeldablePQ`] ⊂
//! [`CompletePQ`]; every fallible operation returns a [`HeapError`].
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::fibonacci::FibonacciHeap;
//! use mergeable_heaps::{CompletePQ, MeldablePQ, PriorityQueue};
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5);
//! heap.insert(3);
//!
//! let mut other = FibonacciHeap::new();
//! other.insert(4);
//! heap.meld(&mut other).unwrap();
//!
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.min(), Ok(&1));
//! assert_eq!(heap.len(), 3);
//! ```

pub mod any;
pub mod binomial;
pub mod fibonacci;
pub mod node;
pub mod stdlib_compat;
pub mod storage;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{CompletePQ, Handle, HeapError, MeldablePQ, PriorityQueue};
