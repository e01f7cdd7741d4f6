//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert and meld
//! - O(1) amortized decrease_key
//! - O(log n) amortized delete_min and delete
//!
//! The structure consists of a collection of heap-ordered trees. Roots are
//! linked in a circular doubly linked ring, as are the children of every node.
//! Each node also keeps a back-reference to its parent and a `lost_child`
//! mark, which together drive the cascading cuts that keep trees bushy enough
//! for the O(log n) degree bound.
//!
//! # Node states
//!
//! A node is a root, an unmarked child or a marked child. Becoming a child
//! clears the mark; losing a child marks an unmarked child; losing a second
//! child cuts a marked child back to the root ring.

use crate::node::{self, RingNode};
use crate::storage::{NodeArena, NodeKey, RawHandle};
use crate::traits::{CompletePQ, Handle, HeapError, MeldablePQ, PriorityQueue};
use std::mem;

/// Handle to an element in a Fibonacci heap
///
/// Used with [`CompletePQ::decrease_key`] and [`CompletePQ::delete`]. A handle
/// whose element has been removed, or that was issued by another heap, is
/// rejected with [`HeapError::IncompatibleType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FibonacciHandle(RawHandle);

impl Handle for FibonacciHandle {}

#[derive(Debug)]
pub(crate) struct FibonacciNode<K> {
    key: K,
    degree: usize,
    /// Set when the node loses a child while it is itself a child
    lost_child: bool,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    prev: NodeKey,
    next: NodeKey,
}

impl<K> FibonacciNode<K> {
    fn singleton(key: K, me: NodeKey) -> Self {
        FibonacciNode {
            key,
            degree: 0,
            lost_child: false,
            parent: None,
            child: None,
            prev: me,
            next: me,
        }
    }
}

impl<K: Ord> RingNode for FibonacciNode<K> {
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

    fn adopted_by(&mut self, parent: NodeKey) {
        self.parent = Some(parent);
        self.lost_child = false;
    }
}

/// How [`FibonacciHeap::cut`] treats the node being detached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cut {
    /// The node moves to the root ring with its subtree
    Detach,
    /// The node is about to be freed; its children lose their parent
    Delete,
}

/// Upper bound on the number of distinct root degrees after consolidating `n`
/// nodes: ⌊log_φ n⌋ + 1
///
/// A Fibonacci tree whose root has degree d holds at least F(d+2) ≥ φᵈ nodes.
fn degree_bound(n: usize) -> usize {
    if n < 2 {
        return 1;
    }
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    ((n as f64).ln() / phi.ln()) as usize + 1
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::fibonacci::FibonacciHeap;
/// use mergeable_heaps::{CompletePQ, PriorityQueue};
///
/// let mut heap = FibonacciHeap::new();
/// let handles: Vec<_> = [5, 2, 7, 6, 9].into_iter().map(|k| heap.insert(k)).collect();
/// assert_eq!(heap.delete_min(), Ok(2));
///
/// heap.decrease_key(&handles[4], 1).unwrap();
/// assert_eq!(heap.min(), Ok(&1));
/// assert_eq!(heap.delete(&handles[2]), Ok(7));
/// assert_eq!(heap.delete_min(), Ok(1));
/// ```
#[derive(Debug)]
pub struct FibonacciHeap<K> {
    arena: NodeArena<FibonacciNode<K>>,
    /// Minimum root, also the entry point of the root ring
    min: Option<NodeKey>,
    len: usize,
    /// Nodes moved to the root ring by decrease_key, delete or cascading cuts
    cuts: usize,
}

impl<K: Ord> Default for FibonacciHeap<K> {
    fn default() -> Self {
        <Self as PriorityQueue<K>>::new()
    }
}

impl<K: Ord> PriorityQueue<K> for FibonacciHeap<K> {
    type Handle = FibonacciHandle;

    fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            min: None,
            len: 0,
            cuts: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, key: K) -> Self::Handle {
        let node = self
            .arena
            .insert_with_key(|me| FibonacciNode::singleton(key, me));

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
        FibonacciHandle(self.arena.handle(node))
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
    /// 1. Clear the parent reference of every child of the minimum
    /// 2. Replace the minimum by its children in the root ring (or make the
    ///    child ring the root ring if the minimum was the only root)
    /// 3. Link roots of equal degree in one pass, using a bucket table of
    ///    ⌊log_φ n⌋ + 1 slots
    /// 4. Rebuild the root ring from the buckets and record the new minimum
    ///
    /// Unlike the binomial heap, the children of a sole root are consolidated
    /// too: cuts may have left several of them with the same degree.
    fn delete_min(&mut self) -> Result<K, HeapError> {
        let min = self.min.ok_or(HeapError::EmptyHeap)?;
        let bound = degree_bound(self.len);
        self.orphan_children(min);

        let start = if !node::is_only(&self.arena, min) {
            let next = self.arena[min].next;
            node::unlink(&mut self.arena, min);
            if let Some(children) = self.arena[min].child {
                node::merge_lists(&mut self.arena, next, children);
            }
            Some(next)
        } else {
            self.arena[min].child
        };

        self.min = start.and_then(|start| node::consolidate(&mut self.arena, start, bound));
        self.len -= 1;
        let removed = self.arena.take(min);
        debug_assert_eq!(self.arena.len(), self.len);
        Ok(removed.key)
    }

    fn get(&self, handle: &Self::Handle) -> Result<&K, HeapError> {
        let node = self.resolve(handle)?;
        Ok(&self.arena[node].key)
    }
}

impl<K: Ord> MeldablePQ<K> for FibonacciHeap<K> {
    /// Merges another heap into this heap
    ///
    /// **Time Complexity**: O(min(s, t)) for arenas of s and t segments, O(1) for heaps never melded into
    ///
    /// The root rings are spliced and `other`'s arena segments are handed over,
    /// so every handle `other` issued keeps working on this heap.
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

impl<K: Ord> CompletePQ<K> for FibonacciHeap<K> {
    /// Removes an arbitrary element
    ///
    /// **Time Complexity**: O(log n) amortized
    ///
    /// **Algorithm**:
    /// - The minimum is removed through delete_min.
    /// - Any other node is detached from its ring, its children are spliced
    ///   into the root ring as independent trees, and the former parent (if
    ///   any) gets a cascading cut, exactly as if it had lost a child to
    ///   decrease_key.
    fn delete(&mut self, handle: &Self::Handle) -> Result<K, HeapError> {
        let min = self.min.ok_or(HeapError::EmptyHeap)?;
        let target = self.resolve(handle)?;
        if target == min {
            return self.delete_min();
        }

        let parent = self.arena[target].parent;
        self.cut(target, Cut::Delete);
        if let Some(children) = self.arena[target].child {
            node::merge_lists(&mut self.arena, min, children);
        }
        self.len -= 1;
        let removed = self.arena.take(target);

        if let Some(parent) = parent {
            self.cascading_cut(parent);
        }
        Ok(removed.key)
    }

    /// Decreases the key of an element
    ///
    /// **Time Complexity**: O(1) amortized
    ///
    /// **Algorithm**:
    /// 1. Update the key
    /// 2. If the node is a child and now smaller than its parent, cut it to
    ///    the root ring (keeping its subtree) and run a cascading cut on the
    ///    former parent
    /// 3. Move the min pointer if the node is the new minimum
    ///
    /// **Why O(1) amortized?** Each cascading cut past the first one clears a
    /// mark that an earlier operation set, so the total number of cuts is at
    /// most twice the number of decrease_key and delete calls.
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError> {
        let target = self.resolve(handle)?;
        if new_key > self.arena[target].key {
            return Err(HeapError::KeyIncreaseRejected);
        }
        self.arena[target].key = new_key;

        if let Some(parent) = self.arena[target].parent {
            if self.arena[target].key < self.arena[parent].key {
                self.move_to_roots(target);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if self.arena[target].key < self.arena[min].key {
                self.min = Some(target);
            }
        }
        Ok(())
    }
}

impl<K: Ord> FibonacciHeap<K> {
    /// Returns true if `handle` denotes an element of this heap
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.arena.resolve(&handle.0).is_some()
    }

    /// Total number of nodes moved to the root ring by decrease_key and
    /// cascading cuts since this heap was created
    pub fn cut_count(&self) -> usize {
        self.cuts
    }

    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        self.arena
            .resolve(&handle.0)
            .ok_or(HeapError::IncompatibleType)
    }

    /// Turns every child of `node` into a root-to-be: no parent, no mark
    fn orphan_children(&mut self, node: NodeKey) {
        if let Some(first) = self.arena[node].child {
            for child in node::ring_keys(&self.arena, first) {
                self.arena[child].parent = None;
                self.arena[child].lost_child = false;
            }
        }
    }

    /// Detaches `target` from whatever ring holds it and fixes up its parent
    fn cut(&mut self, target: NodeKey, kind: Cut) {
        if let Some(parent) = self.arena[target].parent {
            if self.arena[parent].child == Some(target) {
                self.arena[parent].child = if node::is_only(&self.arena, target) {
                    None
                } else {
                    Some(self.arena[target].next)
                };
            }
            self.arena[parent].degree -= 1;
        }
        node::unlink(&mut self.arena, target);

        match kind {
            Cut::Detach => {
                self.arena[target].parent = None;
                self.arena[target].lost_child = false;
            }
            Cut::Delete => self.orphan_children(target),
        }
    }

    /// Cuts `target` from its parent and splices it into the root ring
    fn move_to_roots(&mut self, target: NodeKey) {
        self.cut(target, Cut::Detach);
        if let Some(min) = self.min {
            node::merge_lists(&mut self.arena, min, target);
        }
        self.cuts += 1;
    }

    /// Walks up from `target`: marks the first unmarked child it meets and cuts
    /// every marked one on the way
    fn cascading_cut(&mut self, mut target: NodeKey) {
        while let Some(parent) = self.arena[target].parent {
            if !self.arena[target].lost_child {
                self.arena[target].lost_child = true;
                return;
            }
            self.move_to_roots(target);
            target = parent;
        }
    }

    /// Checks the structural invariants of the heap
    ///
    /// Verifies that every ring is closed, degrees match child rings, heap
    /// order holds, every child points back to its parent, roots have no
    /// parent, the node count equals `len`, and the min pointer is a minimal
    /// root.
    pub fn verify_structure(&self) -> bool {
        let Some(min) = self.min else {
            return self.len == 0 && self.arena.is_empty();
        };
        if !node::ring_is_closed(&self.arena, min) {
            return false;
        }

        let mut total = 0;
        for root in node::ring_keys(&self.arena, min) {
            if self.arena[root].parent.is_some() || self.arena[root].key < self.arena[min].key {
                return false;
            }
            let mut parent_link =
                |parent: NodeKey, child: NodeKey| self.arena[child].parent == Some(parent);
            match node::subtree_size(&self.arena, root, &mut parent_link) {
                Some(size) => total += size,
                None => return false,
            }
        }
        total == self.len && self.arena.len() == self.len
    }
}
