//! Mergeable priority queue with in-place priority modification.
//!
//! [`PairingHeap`] is a multi-way tree heap with amortized O(1) insert and
//! O(log n) pop. Each inserted element gets a stable [`NodeRef`] through which
//! its value can later be adjusted in either direction without a search:
//! moves toward the root cost O(1) (cut the node and relink it with the
//! root), moves away from the root pair-merge the node's children and relink
//! the merged subtree.
//!
//! Nodes live in an arena of slots addressed by index, with explicit
//! parent/child/sibling links; sibling lists are doubly linked so a node can
//! be cut out of its parent's child list in constant time.

use std::marker::PhantomData;

/// Decides which of two values sits closer to the root.
///
/// The heap is written against this policy instead of a raw comparator so
/// that maximum-selection heaps are spelled out as [`MaxFirst`] rather than
/// hidden behind an inverted ordering.
pub trait SelectionPolicy<T> {
    /// Returns `true` when `a` must be an ancestor of `b`. Comparisons are
    /// strict: equal values never outrank each other, so the incumbent root
    /// wins ties.
    fn outranks(a: &T, b: &T) -> bool;
}

/// Smallest value at the root: a min-heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinFirst;

impl<T: PartialOrd> SelectionPolicy<T> for MinFirst {
    fn outranks(a: &T, b: &T) -> bool {
        a < b
    }
}

/// Largest value at the root, for maximum-selection uses of the heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFirst;

impl<T: PartialOrd> SelectionPolicy<T> for MaxFirst {
    fn outranks(a: &T, b: &T) -> bool {
        b < a
    }
}

/// Stable handle to an element in a [`PairingHeap`].
///
/// Remains valid from [`PairingHeap::insert`] until the element is returned
/// by [`PairingHeap::pop`]. Using a handle after its element was popped, or
/// against a different heap, is a caller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef(usize);

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    parent: Option<usize>,
    child: Option<usize>,
    next: Option<usize>,
    prev: Option<usize>,
}

impl<T> Slot<T> {
    fn new(value: T) -> Self {
        Self {
            value: Some(value),
            parent: None,
            child: None,
            next: None,
            prev: None,
        }
    }
}

/// A pairing heap ordered by a [`SelectionPolicy`], defaulting to a min-heap.
///
/// # Examples
/// ```
/// use mincut::heap::PairingHeap;
///
/// let mut heap = PairingHeap::new();
/// let node = heap.insert(4);
/// heap.insert(2);
/// heap.modify(node, 1);
/// assert_eq!(heap.pop(), Some(1));
/// assert_eq!(heap.pop(), Some(2));
/// ```
#[derive(Debug)]
pub struct PairingHeap<T, S: SelectionPolicy<T> = MinFirst> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
    policy: PhantomData<S>,
}

impl<T, S: SelectionPolicy<T>> Default for PairingHeap<T, S> {
    fn default() -> Self {
        Self::with_policy()
    }
}

impl<T: PartialOrd> PairingHeap<T, MinFirst> {
    /// Creates an empty min-heap.
    pub fn new() -> Self {
        Self::with_policy()
    }
}

impl<T, S: SelectionPolicy<T>> PairingHeap<T, S> {
    /// Creates an empty heap ordered by the policy `S`.
    pub fn with_policy() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            policy: PhantomData,
        }
    }

    /// Number of elements currently in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The value the policy ranks first, or `None` if the heap is empty.
    pub fn peek(&self) -> Option<&T> {
        match self.root {
            Some(root) => self.slots[root].value.as_ref(),
            None => None,
        }
    }

    /// The value behind `node`, or `None` if it has already been popped.
    pub fn get(&self, node: NodeRef) -> Option<&T> {
        self.slots.get(node.0).and_then(|slot| slot.value.as_ref())
    }

    /// Inserts `value` and returns a handle for later [`modify`] calls.
    ///
    /// Amortized O(1): the new singleton is linked with the current root.
    ///
    /// [`modify`]: PairingHeap::modify
    pub fn insert(&mut self, value: T) -> NodeRef {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Slot::new(value);
                idx
            }
            None => {
                self.slots.push(Slot::new(value));
                self.slots.len() - 1
            }
        };
        self.root = Some(match self.root {
            Some(root) => self.link(root, idx),
            None => idx,
        });
        self.len += 1;
        NodeRef(idx)
    }

    /// Removes and returns the value the policy ranks first.
    ///
    /// Amortized O(log n): the root's children are merged pairwise left to
    /// right, then folded right to left into the new root.
    pub fn pop(&mut self) -> Option<T> {
        let root = self.root?;
        self.root = self.merge_children(root);
        self.len -= 1;
        self.free.push(root);
        self.slots[root].value.take()
    }

    /// Replaces the value behind `node`, restructuring as needed.
    ///
    /// A move toward the root cuts the node from its parent and links it with
    /// the root in O(1); a move away from the root detaches and pair-merges
    /// the node's children, then links the merged subtree with the root. A
    /// value ranked equal to the old one is stored without restructuring.
    ///
    /// # Panics
    /// Panics if `node` refers to an element that was already popped.
    pub fn modify(&mut self, node: NodeRef, value: T) {
        let idx = node.0;
        let current = self.value_at(idx);
        let toward_root = S::outranks(&value, current);
        let away_from_root = !toward_root && S::outranks(current, &value);
        self.slots[idx].value = Some(value);
        if toward_root {
            if let Some(parent) = self.slots[idx].parent {
                if self.outranks_at(idx, parent) {
                    self.cut(idx);
                    if let Some(root) = self.root {
                        self.root = Some(self.link(root, idx));
                    }
                }
            }
        } else if away_from_root {
            if let Some(subtree) = self.merge_children(idx) {
                if let Some(root) = self.root {
                    self.root = Some(self.link(root, subtree));
                }
            }
        }
    }

    fn value_at(&self, idx: usize) -> &T {
        match &self.slots[idx].value {
            Some(value) => value,
            None => panic!("stale pairing heap node reference"),
        }
    }

    fn outranks_at(&self, a: usize, b: usize) -> bool {
        S::outranks(self.value_at(a), self.value_at(b))
    }

    /// Links two roots; the loser becomes the winner's leftmost child.
    fn link(&mut self, a: usize, b: usize) -> usize {
        let (winner, loser) = if self.outranks_at(b, a) { (b, a) } else { (a, b) };
        let first = self.slots[winner].child;
        self.slots[loser].next = first;
        if let Some(first) = first {
            self.slots[first].prev = Some(loser);
        }
        self.slots[loser].prev = None;
        self.slots[loser].parent = Some(winner);
        self.slots[winner].child = Some(loser);
        winner
    }

    /// Detaches `idx` from its parent's child list in O(1).
    fn cut(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;
        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => {
                if let Some(parent) = self.slots[idx].parent {
                    self.slots[parent].child = next;
                }
            }
        }
        if let Some(next) = next {
            self.slots[next].prev = prev;
        }
        let slot = &mut self.slots[idx];
        slot.prev = None;
        slot.next = None;
        slot.parent = None;
    }

    /// Detaches `idx`'s children and merges them into a single tree with the
    /// classic two-pass pairing scheme, returning its root.
    fn merge_children(&mut self, idx: usize) -> Option<usize> {
        let mut node = self.slots[idx].child.take()?;
        // First pass: link children pairwise left to right, chaining the
        // pair winners through their prev fields.
        let mut prev: Option<usize> = None;
        loop {
            let next = match self.slots[node].next {
                Some(next) => next,
                None => {
                    self.slots[node].prev = prev;
                    break;
                }
            };
            let next_next = self.slots[next].next;
            node = self.link(node, next);
            self.slots[node].prev = prev;
            prev = Some(node);
            match next_next {
                Some(next_next) => node = next_next,
                None => break,
            }
        }
        // Second pass: fold the winners right to left.
        let mut prev = self.slots[node].prev;
        while let Some(winner) = prev {
            let before = self.slots[winner].prev;
            node = self.link(winner, node);
            prev = before;
        }
        let slot = &mut self.slots[node];
        slot.prev = None;
        slot.next = None;
        slot.parent = None;
        Some(node)
    }
}
