//! Node abstraction and circular sibling-ring helpers
//!
//! Both heaps keep their trees as circular doubly-linked rings of siblings:
//! the roots form one ring, and the children of every node form another.
//!
//! In a circular ring:
//! - A single node links to itself (both `next` and `prev`)
//! - There is no head or tail; any member can be the entry point
//! - Splicing two rings together is O(1)
//!
//! [`RingNode`] is the capability a node type needs for the helpers in this
//! module: reading its key, walking and relinking its ring, and owning a child
//! ring. The helpers are generic over one concrete node type per heap, so
//! there is never a runtime check of which kind of node is being linked.

use crate::storage::{NodeArena, NodeKey};
use smallvec::SmallVec;

/// A node that lives in a circular sibling ring and owns a child ring
pub trait RingNode {
    /// Ordering key
    type Key: Ord;

    fn key(&self) -> &Self::Key;

    fn prev(&self) -> NodeKey;
    fn next(&self) -> NodeKey;
    fn set_prev(&mut self, prev: NodeKey);
    fn set_next(&mut self, next: NodeKey);

    /// Representative of the child ring, if any
    fn child(&self) -> Option<NodeKey>;
    fn set_child(&mut self, child: Option<NodeKey>);

    /// Number of direct children
    fn degree(&self) -> usize;
    fn set_degree(&mut self, degree: usize);

    /// Called by [`add_child`] right before the node joins `parent`'s child ring
    fn adopted_by(&mut self, _parent: NodeKey) {}
}

/// Links `x` to itself, forming a ring of one
#[inline]
pub fn make_singleton<N: RingNode>(arena: &mut NodeArena<N>, x: NodeKey) {
    let node = &mut arena[x];
    node.set_next(x);
    node.set_prev(x);
}

/// Whether `x` is the only member of its ring
#[inline]
pub fn is_only<N: RingNode>(arena: &NodeArena<N>, x: NodeKey) -> bool {
    arena[x].next() == x
}

/// Inserts `node` immediately before `anchor`, making it the last element of
/// the ring that starts at `anchor`
///
/// `node` must not be a member of any other ring; its own links are
/// overwritten.
#[inline]
pub fn add_sibling<N: RingNode>(arena: &mut NodeArena<N>, anchor: NodeKey, node: NodeKey) {
    let last = arena[anchor].prev();
    arena[node].set_next(anchor);
    arena[node].set_prev(last);
    arena[last].set_next(node);
    arena[anchor].set_prev(node);
}

/// Removes `x` from its ring and leaves it as a singleton
///
/// The caller is responsible for any owner pointer (a parent's `child` or a
/// heap's min) that still refers to `x`.
#[inline]
pub fn unlink<N: RingNode>(arena: &mut NodeArena<N>, x: NodeKey) {
    let prev = arena[x].prev();
    let next = arena[x].next();
    arena[prev].set_next(next);
    arena[next].set_prev(prev);
    make_singleton(arena, x);
}

/// Makes `child` a child of `parent` and bumps `parent`'s degree
pub fn add_child<N: RingNode>(arena: &mut NodeArena<N>, parent: NodeKey, child: NodeKey) {
    arena[child].adopted_by(parent);
    match arena[parent].child() {
        None => {
            make_singleton(arena, child);
            arena[parent].set_child(Some(child));
        }
        Some(first) => add_sibling(arena, first, child),
    }
    let degree = arena[parent].degree();
    arena[parent].set_degree(degree + 1);
}

/// Splices two disjoint rings into one in O(1)
///
/// The members of `y`'s ring are placed right after `x`; each ring keeps its
/// internal order.
pub fn merge_lists<N: RingNode>(arena: &mut NodeArena<N>, x: NodeKey, y: NodeKey) {
    let x_next = arena[x].next();
    let y_prev = arena[y].prev();
    arena[x_next].set_prev(y_prev);
    arena[y_prev].set_next(x_next);
    arena[x].set_next(y);
    arena[y].set_prev(x);
}

/// Links two trees, keeping heap order, and returns the surviving root
///
/// The root with the larger key becomes a child of the other. On equal keys
/// the left operand `x` stays root.
pub fn join_trees<N: RingNode>(arena: &mut NodeArena<N>, x: NodeKey, y: NodeKey) -> NodeKey {
    if arena[y].key() < arena[x].key() {
        add_child(arena, y, x);
        y
    } else {
        add_child(arena, x, y);
        x
    }
}

/// Scans a ring for its minimum key; the first minimal node in `next` order wins
pub fn find_min<N: RingNode>(arena: &NodeArena<N>, ring: Option<NodeKey>) -> Option<NodeKey> {
    let start = ring?;
    let mut min = start;
    let mut current = arena[start].next();
    while current != start {
        if arena[current].key() < arena[min].key() {
            min = current;
        }
        current = arena[current].next();
    }
    Some(min)
}

/// Snapshot of the members of a ring in `next` order, starting at `start`
pub fn ring_keys<N: RingNode>(arena: &NodeArena<N>, start: NodeKey) -> Vec<NodeKey> {
    let mut keys = vec![start];
    let mut current = arena[start].next();
    while current != start {
        keys.push(current);
        current = arena[current].next();
    }
    keys
}

/// Degree-merge pass shared by both heaps
///
/// Walks the root ring starting at `start` once, bucketing trees by degree and
/// joining every pair that collides in a bucket (the earlier occupant is the
/// left operand of [`join_trees`]). The survivors are relinked into a fresh
/// root ring in increasing degree order. Returns the new minimum root.
///
/// `bound` is the expected number of distinct degrees; the table grows if a
/// larger degree shows up.
pub fn consolidate<N: RingNode>(
    arena: &mut NodeArena<N>,
    start: NodeKey,
    bound: usize,
) -> Option<NodeKey> {
    let mut buckets: SmallVec<[Option<NodeKey>; 64]> = SmallVec::new();
    buckets.resize(bound, None);

    for root in ring_keys(arena, start) {
        let mut tree = root;
        let mut degree = arena[tree].degree();
        loop {
            if degree >= buckets.len() {
                buckets.resize(degree + 1, None);
            }
            match buckets[degree].take() {
                Some(occupant) => {
                    tree = join_trees(arena, occupant, tree);
                    degree += 1;
                }
                None => {
                    buckets[degree] = Some(tree);
                    break;
                }
            }
        }
    }

    let mut min: Option<NodeKey> = None;
    let mut anchor: Option<NodeKey> = None;
    for tree in buckets.into_iter().flatten() {
        match anchor {
            None => {
                make_singleton(arena, tree);
                anchor = Some(tree);
            }
            Some(first) => add_sibling(arena, first, tree),
        }
        match min {
            Some(m) if arena[m].key() <= arena[tree].key() => {}
            _ => min = Some(tree),
        }
    }
    min
}

/// Counts the nodes of the tree rooted at `root`, checking along the way that
/// every ring is closed, every degree matches its child ring, heap order holds,
/// and `check(parent, child)` accepts every edge
///
/// Returns `None` on the first violation. Used by the heaps' structure checks.
pub fn subtree_size<N: RingNode>(
    arena: &NodeArena<N>,
    root: NodeKey,
    check: &mut dyn FnMut(NodeKey, NodeKey) -> bool,
) -> Option<usize> {
    let mut size = 1;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let Some(first) = arena[node].child() else {
            if arena[node].degree() != 0 {
                return None;
            }
            continue;
        };
        let children = ring_keys(arena, first);
        if children.len() != arena[node].degree() || !ring_is_closed(arena, first) {
            return None;
        }
        for child in children {
            if !arena.contains(child)
                || arena[child].key() < arena[node].key()
                || !check(node, child)
            {
                return None;
            }
            size += 1;
            stack.push(child);
        }
    }
    Some(size)
}

/// Whether `prev` and `next` agree around the ring that contains `start`
pub fn ring_is_closed<N: RingNode>(arena: &NodeArena<N>, start: NodeKey) -> bool {
    ring_keys(arena, start)
        .into_iter()
        .all(|k| arena[arena[k].next()].prev() == k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestNode {
        value: i32,
        tag: &'static str,
        prev: NodeKey,
        next: NodeKey,
        child: Option<NodeKey>,
        degree: usize,
        adopted: Option<NodeKey>,
    }

    impl RingNode for TestNode {
        type Key = i32;

        fn key(&self) -> &i32 {
            &self.value
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
            self.adopted = Some(parent);
        }
    }

    fn node(arena: &mut NodeArena<TestNode>, value: i32, tag: &'static str) -> NodeKey {
        arena.insert_with_key(|k| TestNode {
            value,
            tag,
            prev: k,
            next: k,
            child: None,
            degree: 0,
            adopted: None,
        })
    }

    fn values(arena: &NodeArena<TestNode>, start: NodeKey) -> Vec<i32> {
        ring_keys(arena, start)
            .into_iter()
            .map(|k| arena[k].value)
            .collect()
    }

    #[test]
    fn test_singleton_ring() {
        let mut arena = NodeArena::new();
        let a = node(&mut arena, 1, "a");
        assert!(is_only(&arena, a));
        assert_eq!(arena[a].prev, a);
        assert!(ring_is_closed(&arena, a));
    }

    #[test]
    fn test_add_sibling_appends_before_anchor() {
        let mut arena = NodeArena::new();
        let a = node(&mut arena, 1, "a");
        let b = node(&mut arena, 2, "b");
        let c = node(&mut arena, 3, "c");
        add_sibling(&mut arena, a, b);
        add_sibling(&mut arena, a, c);

        assert_eq!(values(&arena, a), vec![1, 2, 3]);
        assert_eq!(arena[a].prev, c);
        assert!(ring_is_closed(&arena, a));
    }

    #[test]
    fn test_unlink_middle() {
        let mut arena = NodeArena::new();
        let a = node(&mut arena, 1, "a");
        let b = node(&mut arena, 2, "b");
        let c = node(&mut arena, 3, "c");
        add_sibling(&mut arena, a, b);
        add_sibling(&mut arena, a, c);

        unlink(&mut arena, b);
        assert_eq!(values(&arena, a), vec![1, 3]);
        assert!(is_only(&arena, b));
        assert!(ring_is_closed(&arena, a));
    }

    #[test]
    fn test_merge_lists_preserves_each_ring_order() {
        let mut arena = NodeArena::new();
        let a = node(&mut arena, 1, "a");
        let b = node(&mut arena, 2, "b");
        add_sibling(&mut arena, a, b);
        let c = node(&mut arena, 3, "c");
        let d = node(&mut arena, 4, "d");
        add_sibling(&mut arena, c, d);

        merge_lists(&mut arena, a, c);
        assert_eq!(values(&arena, a), vec![1, 3, 4, 2]);
        assert!(ring_is_closed(&arena, a));
    }

    #[test]
    fn test_add_child_builds_ring_and_degree() {
        let mut arena = NodeArena::new();
        let p = node(&mut arena, 0, "p");
        let x = node(&mut arena, 5, "x");
        let y = node(&mut arena, 6, "y");
        add_child(&mut arena, p, x);
        add_child(&mut arena, p, y);

        assert_eq!(arena[p].degree, 2);
        assert_eq!(arena[p].child, Some(x));
        assert_eq!(values(&arena, x), vec![5, 6]);
        assert_eq!(arena[y].adopted, Some(p));
        assert_eq!(subtree_size(&arena, p, &mut |_, _| true), Some(3));
    }

    #[test]
    fn test_join_trees_smaller_key_wins() {
        let mut arena = NodeArena::new();
        let big = node(&mut arena, 9, "big");
        let small = node(&mut arena, 3, "small");
        let root = join_trees(&mut arena, big, small);
        assert_eq!(root, small);
        assert_eq!(arena[small].child, Some(big));
    }

    #[test]
    fn test_join_trees_left_operand_wins_tie() {
        let mut arena = NodeArena::new();
        let left = node(&mut arena, 4, "left");
        let right = node(&mut arena, 4, "right");
        let root = join_trees(&mut arena, left, right);
        assert_eq!(arena[root].tag, "left");
        assert_eq!(arena[left].child, Some(right));
    }

    #[test]
    fn test_find_min_first_wins_tie() {
        let mut arena = NodeArena::new();
        assert_eq!(find_min(&arena, None), None);

        let a = node(&mut arena, 2, "a");
        let b = node(&mut arena, 1, "b");
        let c = node(&mut arena, 1, "c");
        add_sibling(&mut arena, a, b);
        add_sibling(&mut arena, a, c);
        assert_eq!(find_min(&arena, Some(a)), Some(b));
        assert_eq!(find_min(&arena, Some(c)), Some(c));
    }

    #[test]
    fn test_consolidate_leaves_distinct_degrees() {
        let mut arena = NodeArena::new();
        let keys: Vec<_> = [7, 3, 9, 1, 4, 8, 2]
            .iter()
            .map(|&v| node(&mut arena, v, "n"))
            .collect();
        for &k in &keys[1..] {
            add_sibling(&mut arena, keys[0], k);
        }

        let min = consolidate(&mut arena, keys[0], 3).unwrap();
        assert_eq!(arena[min].value, 1);

        // 7 = 0b111: one tree each of degree 0, 1 and 2.
        let mut degrees: Vec<_> = ring_keys(&arena, min)
            .into_iter()
            .map(|k| arena[k].degree)
            .collect();
        degrees.sort_unstable();
        assert_eq!(degrees, vec![0, 1, 2]);
        assert!(ring_is_closed(&arena, min));

        let total: usize = ring_keys(&arena, min)
            .into_iter()
            .map(|k| subtree_size(&arena, k, &mut |_, _| true).unwrap())
            .sum();
        assert_eq!(total, 7);
    }

    #[test]
    fn test_consolidate_grows_undersized_table() {
        let mut arena = NodeArena::new();
        let keys: Vec<_> = (0..8).map(|v| node(&mut arena, v, "n")).collect();
        for &k in &keys[1..] {
            add_sibling(&mut arena, keys[0], k);
        }
        let min = consolidate(&mut arena, keys[0], 1).unwrap();
        assert!(is_only(&arena, min));
        assert_eq!(arena[min].degree, 3);
    }

    #[test]
    fn test_consolidate_earlier_tree_wins_tie() {
        let mut arena = NodeArena::new();
        let first = node(&mut arena, 5, "first");
        let second = node(&mut arena, 5, "second");
        add_sibling(&mut arena, first, second);

        let root = consolidate(&mut arena, first, 1).unwrap();
        assert_eq!(arena[root].tag, "first");
    }
}
