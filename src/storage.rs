//! Arena storage for heap nodes
//!
//! Every heap owns one [`NodeArena`]. The arena is a table of segments, each a
//! `slotmap` of nodes tagged with the [`ArenaId`] of the arena that first
//! allocated it. A [`NodeKey`] names a segment and a generational slot inside
//! it, so links between nodes (siblings, children, parent back-references) are
//! plain keys and cutting and splicing are O(1) index writes.
//!
//! Nodes never move between slots. Melding two heaps hands the segments of one
//! arena over to the other ([`NodeArena::append`]); every key and every link
//! stays the same, so handles follow their nodes into the melded heap.
//!
//! # Handles
//!
//! Handles given to callers wrap a [`RawHandle`], the key of the node. An arena
//! only resolves keys whose segment it holds, and slotmap generations make a
//! key stale as soon as its node is removed, so a handle that outlived its node
//! (or belongs to another heap) is detected instead of aliasing a reused slot.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::mem;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    struct SlotKey;
}

/// Identity of one arena segment, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaId(u64);

impl ArenaId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ArenaId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Generational key of a node: its segment plus its slot in that segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    segment: ArenaId,
    slot: SlotKey,
}

/// Node key as handed out to callers, the payload of every public handle type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle(NodeKey);

/// Segmented slotmap node storage
///
/// New nodes go to the home segment, which belongs to this arena for its whole
/// life. Segments taken over from other arenas are only read and removed from,
/// and are dropped once their last node is gone.
#[derive(Debug)]
pub struct NodeArena<N> {
    home: ArenaId,
    segments: FxHashMap<ArenaId, SlotMap<SlotKey, N>>,
    len: usize,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> NodeArena<N> {
    /// Creates an empty arena with a fresh home segment id
    pub fn new() -> Self {
        Self {
            home: ArenaId::fresh(),
            segments: FxHashMap::default(),
            len: 0,
        }
    }

    /// Id of the segment new nodes are allocated in
    pub fn id(&self) -> ArenaId {
        self.home
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocates a node built from its own key
    ///
    /// Ring nodes start out linked to themselves, which needs the key before
    /// the node exists.
    pub fn insert_with_key(&mut self, f: impl FnOnce(NodeKey) -> N) -> NodeKey {
        let home = self.home;
        let segment = self.segments.entry(home).or_insert_with(SlotMap::with_key);
        let slot = segment.insert_with_key(|slot| f(NodeKey { segment: home, slot }));
        self.len += 1;
        NodeKey {
            segment: home,
            slot,
        }
    }

    pub fn remove(&mut self, key: NodeKey) -> Option<N> {
        let segment = self.segments.get_mut(&key.segment)?;
        let node = segment.remove(key.slot)?;
        // The home segment is kept so its slot generations keep counting.
        if segment.is_empty() && key.segment != self.home {
            self.segments.remove(&key.segment);
        }
        self.len -= 1;
        Some(node)
    }

    /// Removes a node that is known to be live
    ///
    /// # Panics
    /// Panics if `key` is not in the arena, like indexing does.
    pub fn take(&mut self, key: NodeKey) -> N {
        match self.remove(key) {
            Some(node) => node,
            None => panic!("node {key:?} is not in the arena"),
        }
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.segments
            .get(&key.segment)
            .is_some_and(|segment| segment.contains_key(key.slot))
    }

    /// Wraps a key of this arena into a handle
    pub fn handle(&self, node: NodeKey) -> RawHandle {
        RawHandle(node)
    }

    /// Resolves a handle to a live node of this arena
    ///
    /// Returns `None` for handles whose segment this arena does not hold and for
    /// handles whose node has been removed.
    pub fn resolve(&self, handle: &RawHandle) -> Option<NodeKey> {
        self.contains(handle.0).then_some(handle.0)
    }

    /// Takes over every segment of `other`
    ///
    /// Keys and links are unchanged, so handles minted by `other` resolve here
    /// afterwards. The smaller segment table is moved into the larger one.
    /// `other` is left empty with a fresh home segment id, and no longer
    /// resolves any handle it minted before.
    pub fn append(&mut self, other: &mut NodeArena<N>) {
        let mut taken = mem::take(other);
        if taken.segments.len() > self.segments.len() {
            mem::swap(&mut self.segments, &mut taken.segments);
        }
        self.segments.extend(taken.segments);
        self.len += taken.len;
    }
}

impl<N> Index<NodeKey> for NodeArena<N> {
    type Output = N;

    fn index(&self, key: NodeKey) -> &N {
        match self.segments.get(&key.segment) {
            Some(segment) => &segment[key.slot],
            None => panic!("node {key:?} is not in the arena"),
        }
    }
}

impl<N> IndexMut<NodeKey> for NodeArena<N> {
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        match self.segments.get_mut(&key.segment) {
            Some(segment) => &mut segment[key.slot],
            None => panic!("node {key:?} is not in the arena"),
        }
    }
}
