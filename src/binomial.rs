//! Binomial Heap implementation
//!
//! A lazy binomial heap is a ring of binomial trees with:
//! - O(1) insert and meld
//! - O(log n) amortized delete_min
//!
//! There is no efficient decrease_key, so this heap stops at
//! [`MeldablePQ`] in the capability hierarchy.
//!
//! # Algorithm Overview
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by linking two B_{k-1} trees
//! - Bₖ has exactly 2ᵏ nodes and its root has degree k
//!
//! The roots form a circular ring. Insert and meld only splice rings, so
//! several trees of the same degree may sit in the ring at once. Delete-min
//! pays for that laziness: it runs one degree-merge pass that links trees of
//! equal degree (like carry propagation in binary addition) until at most one
//! tree of each degree remains.

use crate::node::{self, RingNode};
use crate::storage::{NodeArena, NodeKey, RawHandle};
use crate::traits::{Handle, HeapError, MeldablePQ, PriorityQueue};
use std::mem;

/// Handle to an element in a Binomial heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinomialHandle(RawHandle);

impl Handle for BinomialHandle {}

/// Internal node structure for binomial heap
#[derive(Debug)]
pub(crate) struct BinomialNode<K> {
    key: K,
    /// Number of children; a Bₖ root has degree k
    degree: usize,
    child: Option<NodeKey>,
    prev: NodeKey,
    next: NodeKey,
}

impl<K> BinomialNode<K> {
    fn singleton(key: K, me: NodeKey) -> Self {
        BinomialNode {
            key,
            degree: 0,
            child: None,
            prev: me,
            next: me,
        }
    }
}

impl<K: Ord> RingNode for BinomialNode<K> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }

    fn prev(&self) -> NodeKey {
        self.prev
    }

    fn next(&self) -> NodeKey {
        self.next
    }

    fn set_prev(&mut self, prev: NodeKey) {
        self.prev = prev;
    }

    fn set_next(&mut self, next: NodeKey) {
        self.next = next;
    }

    fn child(&self) -> Option<NodeKey> {
        self.child
    }

    fn set_child(&mut self, child: Option<NodeKey>) {
        self.child = child;
    }

    fn degree(&self) -> usize {
        self.degree
    }

    fn set_degree(&mut self, degree: usize) {
        self.degree = degree;
    }
}

/// Upper bound on the number of distinct root degrees after consolidating `n`
/// nodes: ⌊log₂ n⌋ + 1
fn degree_bound(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

/// Binomial Heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::binomial::BinomialHeap;
/// use mergeable_heaps::{MeldablePQ, PriorityQueue};
///
/// let mut a = BinomialHeap::new();
/// a.insert(5);
/// a.insert(2);
/// let mut b = BinomialHeap::new();
/// b.insert(3);
///
/// a.meld(&mut b).unwrap();
/// assert!(b.is_empty());
/// assert_eq!(a.delete_min(), Ok(2));
/// assert_eq!(a.delete_min(), Ok(3));
/// ```
#[derive(Debug)]
pub struct BinomialHeap<K> {
    arena: NodeArena<BinomialNode<K>>,
    /// Minimum root, also the entry point of the root ring
    min: Option<NodeKey>,
    len: usize,
}

impl<K: Ord> Default for BinomialHeap<K> {
    fn default() -> Self {
        <Self as PriorityQueue<K>>::new()
    }
}

impl<K: Ord> PriorityQueue<K> for BinomialHeap<K> {
    type Handle = BinomialHandle;

    fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            min: None,
            len: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    /// Inserts a new element into the heap
    ///
    /// **Time Complexity**: O(1)
    ///
    /// **Algorithm**: Wrap the key in a B₀ tree and splice it into the root
    /// ring just before the minimum. No trees are linked here; that work is
    /// deferred to the next delete_min.
    fn insert(&mut self, key: K) -> Self::Handle {
        let node = self
            .arena
            .insert_with_key(|me| BinomialNode::singleton(key, me));

        match self.min {
            None => self.min = Some(node),
            Some(min) => {
                node::add_sibling(&mut self.arena, min, node);
                if self.arena[node].key < self.arena[min].key {
                    self.min = Some(node);
                }
            }
        }

        self.len += 1;
        BinomialHandle(self.arena.handle(node))
    }

    fn min(&self) -> Result<&K, HeapError> {
        self.min
            .map(|min| &self.arena[min].key)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Removes and returns the minimum element
    ///
    /// **Time Complexity**: O(log n) amortized
    ///
    /// **Algorithm**:
    /// 1. If the minimum is the only root, its children become the root ring.
    ///    They are B_{k-1}, ..., B₀ and already have distinct degrees, so a
    ///    scan for the new minimum is enough.
    /// 2. Otherwise unlink the minimum and splice its child ring into the
    ///    root ring.
    /// 3. Link trees of equal degree in one pass over the ring, using a
    ///    bucket table of ⌊log₂ n⌋ + 1 slots.
    /// 4. Rebuild the root ring from the buckets and record the new minimum.
    ///
    /// **Why O(log n) amortized?** Every root that the pass visits either
    /// ends up in one of the O(log n) buckets or is linked under another root,
    /// and each link is paid for by the insert that created the extra root.
    fn delete_min(&mut self) -> Result<K, HeapError> {
        let min = self.min.ok_or(HeapError::EmptyHeap)?;
        let bound = degree_bound(self.len);

        if node::is_only(&self.arena, min) {
            self.min = node::find_min(&self.arena, self.arena[min].child);
        } else {
            let next = self.arena[min].next;
            node::unlink(&mut self.arena, min);
            if let Some(children) = self.arena[min].child {
                node::merge_lists(&mut self.arena, next, children);
            }
            self.min = node::consolidate(&mut self.arena, next, bound);
        }

        self.len -= 1;
        let removed = self.arena.take(min);
        debug_assert_eq!(self.arena.len(), self.len);
        Ok(removed.key)
    }

    fn get(&self, handle: &Self::Handle) -> Result<&K, HeapError> {
        self.arena
            .resolve(&handle.0)
            .map(|node| &self.arena[node].key)
            .ok_or(HeapError::IncompatibleType)
    }
}

impl<K: Ord> MeldablePQ<K> for BinomialHeap<K> {
    /// Merges another heap into this heap
    ///
    /// **Time Complexity**: O(min(s, t)) for arenas of s and t segments, O(1) for heaps never melded into
    ///
    /// The root rings are spliced and `other`'s arena segments are handed over,
    /// so every handle `other` issued keeps working on this heap.
    ///
    /// On equal minima the minimum of `self` stays the minimum.
    fn meld(&mut self, other: &mut Self) -> Result<(), HeapError> {
        let Some(other_min) = other.min.take() else {
            return Ok(());
        };
        self.arena.append(&mut other.arena);
        self.len += mem::take(&mut other.len);

        match self.min {
            Some(min) => {
                node::merge_lists(&mut self.arena, min, other_min);
                if self.arena[other_min].key < self.arena[min].key {
                    self.min = Some(other_min);
                }
            }
            None => self.min = Some(other_min),
        }
        Ok(())
    }
}

impl<K: Ord> BinomialHeap<K> {
    /// Returns true if `handle` denotes an element of this heap
    pub fn contains(&self, handle: &BinomialHandle) -> bool {
        self.arena.resolve(&handle.0).is_some()
    }

    /// Checks the structural invariants of the heap
    ///
    /// Verifies that every ring is closed, degrees match child rings, heap
    /// order holds, every tree rooted at a degree-k node has 2ᵏ nodes, the
    /// node count equals `len`, and the min pointer is a minimal root.
    pub fn verify_structure(&self) -> bool {
        let Some(min) = self.min else {
            return self.len == 0 && self.arena.is_empty();
        };
        if !node::ring_is_closed(&self.arena, min) {
            return false;
        }

        let mut total = 0;
        for root in node::ring_keys(&self.arena, min) {
            if self.arena[root].key < self.arena[min].key {
                return false;
            }
            let mut binomial = |_parent: NodeKey, child: NodeKey| self.is_binomial_tree(child);
            match node::subtree_size(&self.arena, root, &mut binomial) {
                Some(size) if size == 1 << self.arena[root].degree => total += size,
                _ => return false,
            }
        }
        total == self.len && self.arena.len() == self.len
    }

    fn is_binomial_tree(&self, root: NodeKey) -> bool {
        node::subtree_size(&self.arena, root, &mut |_, _| true)
            .is_some_and(|size| size == 1 << self.arena[root].degree)
    }
}
