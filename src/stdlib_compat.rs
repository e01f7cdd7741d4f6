//! Standard library compatibility layer
//!
//! Provides a `std::collections::BinaryHeap`-shaped wrapper over any
//! [`PriorityQueue`].
//!
//! # Differences from BinaryHeap
//!
//! - **Min-heap vs Max-heap**: This is a min-heap, while `BinaryHeap` is a max-heap.
//!   Use `std::cmp::Reverse<T>` to get max-heap behavior.
//! - **Handles are dropped**: `push` discards the handle returned by the
//!   underlying heap. Use the heap directly for decrease-key or delete.
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::stdlib_compat::StdHeap;
//! use mergeable_heaps::fibonacci::FibonacciHeap;
//!
//! // Use like std::collections::BinaryHeap
//! let mut heap: StdHeap<i32, FibonacciHeap<i32>> = StdHeap::new();
//! heap.push(5);
//! heap.push(3);
//! heap.push(7);
//! assert_eq!(heap.peek(), Some(&3)); // min-heap, unlike BinaryHeap's max-heap
//! assert_eq!(heap.pop(), Some(3));
//! ```

use crate::traits::PriorityQueue;
use std::marker::PhantomData;

/// A `BinaryHeap`-like wrapper around a mergeable heap
///
/// # Type Parameters
/// - `K`: The key type, must implement `Ord`
/// - `H`: The underlying heap implementation (e.g., `BinomialHeap<K>`)
#[derive(Debug)]
pub struct StdHeap<K: Ord, H: PriorityQueue<K>> {
    heap: H,
    _phantom: PhantomData<K>,
}

impl<K: Ord, H: PriorityQueue<K>> StdHeap<K, H> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            heap: H::new(),
            _phantom: PhantomData,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pushes a key onto the heap
    pub fn push(&mut self, key: K) {
        self.heap.insert(key);
    }

    /// Returns a reference to the smallest key without removing it
    ///
    /// This is equivalent to `BinaryHeap::peek`, but returns the minimum (not maximum).
    pub fn peek(&self) -> Option<&K> {
        self.heap.min().ok()
    }

    /// Removes and returns the smallest key
    ///
    /// This is equivalent to `BinaryHeap::pop`, but returns the minimum (not maximum).
    pub fn pop(&mut self) -> Option<K> {
        self.heap.delete_min().ok()
    }

    /// Consumes the heap and returns its keys in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<K> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(key) = self.pop() {
            sorted.push(key);
        }
        sorted
    }

    /// Consumes the wrapper and returns the underlying heap
    pub fn into_inner(self) -> H {
        self.heap
    }
}

impl<K: Ord, H: PriorityQueue<K>> Default for StdHeap<K, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, H: PriorityQueue<K>> Extend<K> for StdHeap<K, H> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.push(key);
        }
    }
}

impl<K: Ord, H: PriorityQueue<K>> FromIterator<K> for StdHeap<K, H> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binomial::BinomialHeap;
    use crate::fibonacci::FibonacciHeap;
    use std::cmp::Reverse;

    #[test]
    fn test_push_pop_min_order() {
        let mut heap: StdHeap<i32, BinomialHeap<i32>> = StdHeap::new();
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.pop(), None);

        heap.extend([5, 2, 4, 3, 1]);
        assert_eq!(heap.len(), 5);
        assert_eq!(heap.peek(), Some(&1));
        assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reverse_gives_max_heap() {
        let heap: StdHeap<Reverse<i32>, FibonacciHeap<Reverse<i32>>> =
            [3, 9, 1].into_iter().map(Reverse).collect();
        let sorted: Vec<_> = heap.into_sorted_vec().into_iter().map(|r| r.0).collect();
        assert_eq!(sorted, vec![9, 3, 1]);
    }

    #[test]
    fn test_into_inner_keeps_elements() {
        let heap: StdHeap<i32, FibonacciHeap<i32>> = (0..10).collect();
        let inner = heap.into_inner();
        assert_eq!(inner.len(), 10);
        assert!(inner.verify_structure());
    }
}
