//! Runtime-tagged heap
//!
//! [`AnyHeap`] holds either heap variant behind one type, for callers that pick
//! the structure at runtime or keep heaps of both kinds in one collection.
//! Operations that only make sense for matching variants (meld, handle use,
//! and decrease-key/delete on a binomial heap) report
//! [`HeapError::IncompatibleType`] instead of failing to compile.
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::any::{AnyHeap, HeapKind};
//! use mergeable_heaps::{HeapError, MeldablePQ, PriorityQueue};
//!
//! let mut fib = AnyHeap::fibonacci();
//! let mut bin = AnyHeap::binomial();
//! fib.insert(3);
//! bin.insert(1);
//!
//! assert_eq!(fib.kind(), HeapKind::Fibonacci);
//! assert_eq!(fib.meld(&mut bin), Err(HeapError::IncompatibleType));
//! assert_eq!(bin.len(), 1);
//! ```

use crate::binomial::{BinomialHandle, BinomialHeap};
use crate::fibonacci::{FibonacciHandle, FibonacciHeap};
use crate::traits::{CompletePQ, Handle, HeapError, MeldablePQ, PriorityQueue};

/// Which structure an [`AnyHeap`] or [`AnyHandle`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapKind {
    Binomial,
    Fibonacci,
}

/// Handle into an [`AnyHeap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyHandle {
    Binomial(BinomialHandle),
    Fibonacci(FibonacciHandle),
}

impl Handle for AnyHandle {}

impl AnyHandle {
    pub fn kind(&self) -> HeapKind {
        match self {
            AnyHandle::Binomial(_) => HeapKind::Binomial,
            AnyHandle::Fibonacci(_) => HeapKind::Fibonacci,
        }
    }
}

impl From<BinomialHandle> for AnyHandle {
    fn from(handle: BinomialHandle) -> Self {
        AnyHandle::Binomial(handle)
    }
}

impl From<FibonacciHandle> for AnyHandle {
    fn from(handle: FibonacciHandle) -> Self {
        AnyHandle::Fibonacci(handle)
    }
}

/// Either a binomial or a Fibonacci heap
#[derive(Debug)]
pub enum AnyHeap<K> {
    Binomial(BinomialHeap<K>),
    Fibonacci(FibonacciHeap<K>),
}

impl<K: Ord> AnyHeap<K> {
    /// Creates an empty binomial heap
    pub fn binomial() -> Self {
        AnyHeap::Binomial(BinomialHeap::new())
    }

    /// Creates an empty Fibonacci heap
    pub fn fibonacci() -> Self {
        AnyHeap::Fibonacci(FibonacciHeap::new())
    }

    pub fn with_kind(kind: HeapKind) -> Self {
        match kind {
            HeapKind::Binomial => Self::binomial(),
            HeapKind::Fibonacci => Self::fibonacci(),
        }
    }

    pub fn kind(&self) -> HeapKind {
        match self {
            AnyHeap::Binomial(_) => HeapKind::Binomial,
            AnyHeap::Fibonacci(_) => HeapKind::Fibonacci,
        }
    }

    /// Returns true if `handle` denotes an element of this heap
    pub fn contains(&self, handle: &AnyHandle) -> bool {
        match (self, handle) {
            (AnyHeap::Binomial(heap), AnyHandle::Binomial(h)) => heap.contains(h),
            (AnyHeap::Fibonacci(heap), AnyHandle::Fibonacci(h)) => heap.contains(h),
            _ => false,
        }
    }

    pub fn verify_structure(&self) -> bool {
        match self {
            AnyHeap::Binomial(heap) => heap.verify_structure(),
            AnyHeap::Fibonacci(heap) => heap.verify_structure(),
        }
    }
}

impl<K: Ord> Default for AnyHeap<K> {
    fn default() -> Self {
        Self::fibonacci()
    }
}

impl<K: Ord> From<BinomialHeap<K>> for AnyHeap<K> {
    fn from(heap: BinomialHeap<K>) -> Self {
        AnyHeap::Binomial(heap)
    }
}

impl<K: Ord> From<FibonacciHeap<K>> for AnyHeap<K> {
    fn from(heap: FibonacciHeap<K>) -> Self {
        AnyHeap::Fibonacci(heap)
    }
}

impl<K: Ord> PriorityQueue<K> for AnyHeap<K> {
    type Handle = AnyHandle;

    /// Creates an empty Fibonacci heap
    fn new() -> Self {
        Self::fibonacci()
    }

    fn is_empty(&self) -> bool {
        match self {
            AnyHeap::Binomial(heap) => heap.is_empty(),
            AnyHeap::Fibonacci(heap) => heap.is_empty(),
        }
    }

    fn len(&self) -> usize {
        match self {
            AnyHeap::Binomial(heap) => heap.len(),
            AnyHeap::Fibonacci(heap) => heap.len(),
        }
    }

    fn insert(&mut self, key: K) -> Self::Handle {
        match self {
            AnyHeap::Binomial(heap) => heap.insert(key).into(),
            AnyHeap::Fibonacci(heap) => heap.insert(key).into(),
        }
    }

    fn min(&self) -> Result<&K, HeapError> {
        match self {
            AnyHeap::Binomial(heap) => heap.min(),
            AnyHeap::Fibonacci(heap) => heap.min(),
        }
    }

    fn delete_min(&mut self) -> Result<K, HeapError> {
        match self {
            AnyHeap::Binomial(heap) => heap.delete_min(),
            AnyHeap::Fibonacci(heap) => heap.delete_min(),
        }
    }

    fn get(&self, handle: &Self::Handle) -> Result<&K, HeapError> {
        match (self, handle) {
            (AnyHeap::Binomial(heap), AnyHandle::Binomial(h)) => heap.get(h),
            (AnyHeap::Fibonacci(heap), AnyHandle::Fibonacci(h)) => heap.get(h),
            _ => Err(HeapError::IncompatibleType),
        }
    }
}

impl<K: Ord> MeldablePQ<K> for AnyHeap<K> {
    /// Melds two heaps of the same variant
    ///
    /// Heaps of different variants are rejected with
    /// [`HeapError::IncompatibleType`] and left untouched.
    fn meld(&mut self, other: &mut Self) -> Result<(), HeapError> {
        match (self, other) {
            (AnyHeap::Binomial(a), AnyHeap::Binomial(b)) => a.meld(b),
            (AnyHeap::Fibonacci(a), AnyHeap::Fibonacci(b)) => a.meld(b),
            _ => Err(HeapError::IncompatibleType),
        }
    }
}

impl<K: Ord> CompletePQ<K> for AnyHeap<K> {
    /// Removes the element behind `handle`
    ///
    /// The binomial variant has no arbitrary delete; a non-empty binomial heap
    /// reports [`HeapError::IncompatibleType`].
    fn delete(&mut self, handle: &Self::Handle) -> Result<K, HeapError> {
        if self.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        match (self, handle) {
            (AnyHeap::Fibonacci(heap), AnyHandle::Fibonacci(h)) => heap.delete(h),
            _ => Err(HeapError::IncompatibleType),
        }
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError> {
        match (self, handle) {
            (AnyHeap::Fibonacci(heap), AnyHandle::Fibonacci(h)) => heap.decrease_key(h, new_key),
            _ => Err(HeapError::IncompatibleType),
        }
    }
}
