//! Common traits for mergeable priority queues
//!
//! This module provides a three-tier capability hierarchy:
//!
//! - [`PriorityQueue`]: insert, min, delete-min
//! - [`MeldablePQ`]: adds destructive `meld` of two queues of the same kind
//! - [`CompletePQ`]: adds `delete` and `decrease_key` through handles
//!
//! [`BinomialHeap`](crate::binomial::BinomialHeap) is meldable but has no
//! efficient decrease-key; [`FibonacciHeap`](crate::fibonacci::FibonacciHeap)
//! implements the complete hierarchy.

use std::fmt;
use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum HeapError {
    /// The operation needs at least one element
    #[error("heap is empty")]
    EmptyHeap,
    /// A heap or handle of the wrong kind, or a handle that no longer denotes
    /// an element of this heap
    #[error("heap or handle is incompatible with this heap")]
    IncompatibleType,
    /// `decrease_key` was given a key larger than the current one
    #[error("new key is greater than the current key")]
    KeyIncreaseRejected,
}

/// A handle to an element in a heap
///
/// Handles are opaque identity tokens: two handles are equal iff they denote
/// the same element. They never own the element, and a handle that outlived
/// its element is rejected by the heap with [`HeapError::IncompatibleType`].
pub trait Handle: Copy + Eq + fmt::Debug {}

/// Base trait for priority queues
///
/// A min-queue over keys of any totally ordered type.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{HeapError, PriorityQueue};
/// use mergeable_heaps::binomial::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// for key in [5, 2, 4, 3, 1] {
///     heap.insert(key);
/// }
/// assert_eq!(heap.min(), Ok(&1));
/// assert_eq!(heap.delete_min(), Ok(1));
/// assert_eq!(heap.delete_min(), Ok(2));
/// assert_eq!(BinomialHeap::<i32>::new().min(), Err(HeapError::EmptyHeap));
/// ```
pub trait PriorityQueue<K: Ord> {
    /// Identity token returned by [`insert`](Self::insert)
    type Handle: Handle;

    /// Creates a new empty queue
    fn new() -> Self;

    /// Returns true if the queue holds no elements
    fn is_empty(&self) -> bool;

    /// Returns the number of elements
    fn len(&self) -> usize;

    /// Inserts a key, returning a handle to it
    ///
    /// # Time Complexity
    /// O(1) for both heaps: insert never merges trees.
    fn insert(&mut self, key: K) -> Self::Handle;

    /// Returns the minimum key
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if the queue is empty.
    fn min(&self) -> Result<&K, HeapError>;

    /// Removes and returns the minimum key
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if the queue is empty.
    ///
    /// # Time Complexity
    /// O(log n) amortized.
    fn delete_min(&mut self) -> Result<K, HeapError>;

    /// Returns the current key of the element behind `handle`
    ///
    /// # Errors
    /// [`HeapError::IncompatibleType`] if the handle does not denote an
    /// element of this queue.
    fn get(&self, handle: &Self::Handle) -> Result<&K, HeapError>;
}

/// Priority queue that can absorb another queue of the same kind
pub trait MeldablePQ<K: Ord>: PriorityQueue<K> {
    /// Moves every element of `other` into `self`, leaving `other` empty
    ///
    /// Handles issued by `other` keep denoting their elements, now in `self`.
    ///
    /// # Errors
    /// [`HeapError::IncompatibleType`] if the two queues are of different
    /// kinds. Only the runtime-dispatched [`AnyHeap`](crate::any::AnyHeap)
    /// can hit this; for concrete heap types the mismatch cannot compile.
    fn meld(&mut self, other: &mut Self) -> Result<(), HeapError>;
}

/// Meldable priority queue with handle-based `delete` and `decrease_key`
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{CompletePQ, PriorityQueue};
/// use mergeable_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let a = heap.insert(10);
/// let b = heap.insert(20);
/// heap.decrease_key(&b, 5).unwrap();
/// assert_eq!(heap.min(), Ok(&5));
/// assert_eq!(heap.delete(&a), Ok(10));
/// assert_eq!(heap.len(), 1);
/// ```
pub trait CompletePQ<K: Ord>: MeldablePQ<K> {
    /// Removes the element behind `handle` and returns its key
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if the queue is empty, otherwise
    /// [`HeapError::IncompatibleType`] for a stale or foreign handle.
    ///
    /// # Time Complexity
    /// O(log n) amortized.
    fn delete(&mut self, handle: &Self::Handle) -> Result<K, HeapError>;

    /// Lowers the key of the element behind `handle`
    ///
    /// Setting the same key again is allowed.
    ///
    /// # Errors
    /// [`HeapError::IncompatibleType`] for a stale or foreign handle,
    /// [`HeapError::KeyIncreaseRejected`] if `new_key` is larger than the
    /// current key.
    ///
    /// # Time Complexity
    /// O(1) amortized.
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError>;
}
