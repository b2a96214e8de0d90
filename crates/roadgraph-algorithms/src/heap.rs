//! Addressable pairing heap
//!
//! A min-heap whose entries can be reached again through the
//! [`HeapHandle`] returned by [`PairingHeap::insert`], which makes
//! decrease-key an O(1) cut followed by one link. Nodes live in an arena
//! and refer to each other by slot index.

const NIL: usize = usize::MAX;

/// Stable reference to an entry of one [`PairingHeap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapHandle(usize);

impl HeapHandle {
    /// Handle of the same entry after its heap was merged into another
    /// heap at `offset` (the value returned by [`PairingHeap::merge`]).
    pub fn shifted(self, offset: usize) -> Self {
        HeapHandle(self.0 + offset)
    }
}

#[derive(Debug, Clone)]
struct Slot<K, P> {
    key: K,
    prio: P,
    /// First child
    child: usize,
    /// Next sibling
    next: usize,
    /// Previous sibling, or the parent for a first child
    prev: usize,
    queued: bool,
}

/// Min-ordered pairing heap with decrease-key and merge
#[derive(Debug, Clone)]
pub struct PairingHeap<K, P> {
    slots: Vec<Slot<K, P>>,
    root: usize,
    len: usize,
    scratch: Vec<usize>,
}

impl<K, P> Default for PairingHeap<K, P> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            root: NIL,
            len: 0,
            scratch: Vec::new(),
        }
    }
}

impl<K: Copy, P: Copy + Ord> PairingHeap<K, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Entries currently queued
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the entry behind `handle` is still queued
    pub fn contains(&self, handle: HeapHandle) -> bool {
        self.slots.get(handle.0).map_or(false, |s| s.queued)
    }

    /// Current priority of a queued entry
    pub fn priority(&self, handle: HeapHandle) -> Option<P> {
        self.slots
            .get(handle.0)
            .filter(|s| s.queued)
            .map(|s| s.prio)
    }

    /// Minimum entry without removing it
    pub fn peek(&self) -> Option<(K, P)> {
        self.slots.get(self.root).map(|s| (s.key, s.prio))
    }

    pub fn insert(&mut self, key: K, prio: P) -> HeapHandle {
        let idx = self.slots.len();
        self.slots.push(Slot {
            key,
            prio,
            child: NIL,
            next: NIL,
            prev: NIL,
            queued: true,
        });
        self.root = self.link(self.root, idx);
        self.len += 1;
        HeapHandle(idx)
    }

    /// Remove and return the minimum entry.
    ///
    /// The root's children are linked pairwise left to right, then the
    /// pairs are folded into one tree right to left.
    pub fn delete_min(&mut self) -> Option<(K, P)> {
        let root = self.root;
        let slot = self.slots.get_mut(root)?;
        slot.queued = false;
        let first = std::mem::replace(&mut slot.child, NIL);
        let popped = (slot.key, slot.prio);
        self.len -= 1;

        let mut pairs = std::mem::take(&mut self.scratch);
        let mut cursor = first;
        while cursor != NIL {
            let a = cursor;
            let b = self.slots[a].next;
            cursor = if b == NIL { NIL } else { self.slots[b].next };
            self.detach_links(a);
            if b != NIL {
                self.detach_links(b);
            }
            pairs.push(self.link(a, b));
        }

        let mut merged = NIL;
        while let Some(tree) = pairs.pop() {
            merged = self.link(tree, merged);
        }
        self.root = merged;
        self.scratch = pairs;

        Some(popped)
    }

    /// Lower the priority of a queued entry.
    ///
    /// Returns `false`, leaving the heap untouched, when the entry is no
    /// longer queued or `prio` is not strictly lower than its current one.
    pub fn decrease_key(&mut self, handle: HeapHandle, prio: P) -> bool {
        let idx = handle.0;
        match self.slots.get(idx) {
            Some(slot) if slot.queued && prio < slot.prio => {}
            _ => return false,
        }
        self.slots[idx].prio = prio;
        if idx == self.root {
            return true;
        }

        // Heap order still holds against the parent
        let prev = self.slots[idx].prev;
        let is_first_child = self.slots[prev].child == idx;
        if is_first_child && self.slots[prev].prio <= prio {
            return true;
        }

        self.cut(idx);
        self.root = self.link(self.root, idx);
        true
    }

    /// Move every entry of `other` into this heap.
    ///
    /// Handles issued by `other` stay valid after
    /// [`HeapHandle::shifted`] by the returned offset.
    pub fn merge(&mut self, other: PairingHeap<K, P>) -> usize {
        let offset = self.slots.len();
        let shift = |i: usize| if i == NIL { NIL } else { i + offset };

        self.slots.extend(other.slots.into_iter().map(|mut slot| {
            slot.child = shift(slot.child);
            slot.next = shift(slot.next);
            slot.prev = shift(slot.prev);
            slot
        }));
        self.root = self.link(self.root, shift(other.root));
        self.len += other.len;
        offset
    }

    /// Link two roots; the one with the larger priority becomes the
    /// first child of the other. Either side may be `NIL`.
    fn link(&mut self, a: usize, b: usize) -> usize {
        if a == NIL {
            return b;
        }
        if b == NIL {
            return a;
        }

        let (parent, child) = if self.slots[b].prio < self.slots[a].prio {
            (b, a)
        } else {
            (a, b)
        };

        let old_first = self.slots[parent].child;
        self.slots[child].next = old_first;
        self.slots[child].prev = parent;
        if old_first != NIL {
            self.slots[old_first].prev = child;
        }
        self.slots[parent].child = child;
        parent
    }

    /// Unhook a non-root node (with its subtree) from its sibling list.
    fn cut(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;

        if self.slots[prev].child == idx {
            self.slots[prev].child = next;
        } else {
            self.slots[prev].next = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        }
        self.detach_links(idx);
    }

    fn detach_links(&mut self, idx: usize) {
        self.slots[idx].next = NIL;
        self.slots[idx].prev = NIL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BinaryHeap;
    use std::cmp::Reverse;

    fn drain<K: Copy, P: Copy + Ord>(heap: &mut PairingHeap<K, P>) -> Vec<P> {
        std::iter::from_fn(|| heap.delete_min().map(|(_, p)| p)).collect()
    }

    #[test]
    fn test_insert_delete_min_order() {
        let mut heap = PairingHeap::new();
        for (key, prio) in [(1u32, 5u64), (2, 3), (3, 9), (4, 1), (5, 3)] {
            heap.insert(key, prio);
        }

        assert_eq!(heap.len(), 5);
        assert_eq!(heap.peek(), Some((4, 1)));
        assert_eq!(drain(&mut heap), vec![1, 3, 3, 5, 9]);
        assert!(heap.is_empty());
        assert_eq!(heap.delete_min(), None);
    }

    #[test]
    fn test_decrease_key_moves_entry_to_front() {
        let mut heap = PairingHeap::new();
        let handles: Vec<_> = (0..10u64).map(|i| heap.insert(i, 100 + i)).collect();

        // Pop once so the remaining entries form a multi-level tree
        assert_eq!(heap.delete_min(), Some((0, 100)));

        assert!(heap.decrease_key(handles[7], 50));
        assert_eq!(heap.peek(), Some((7, 50)));
        assert_eq!(heap.priority(handles[7]), Some(50));

        // Not lower, or no longer queued
        assert!(!heap.decrease_key(handles[7], 60));
        assert!(!heap.decrease_key(handles[0], 1));
        assert!(!heap.contains(handles[0]));

        assert_eq!(heap.delete_min(), Some((7, 50)));
        assert_eq!(heap.delete_min(), Some((1, 101)));
        assert_eq!(heap.len(), 7);
    }

    #[test]
    fn test_merge_keeps_handles_addressable() {
        let mut left = PairingHeap::new();
        left.insert('a', 4u64);
        left.insert('b', 8);

        let mut right = PairingHeap::new();
        right.insert('c', 6u64);
        let d = right.insert('d', 10);

        let offset = left.merge(right);
        assert_eq!(left.len(), 4);

        let d = d.shifted(offset);
        assert!(left.contains(d));
        assert!(left.decrease_key(d, 1));

        let keys: Vec<_> = std::iter::from_fn(|| left.delete_min().map(|(k, _)| k)).collect();
        assert_eq!(keys, vec!['d', 'a', 'c', 'b']);
    }

    #[test]
    fn test_merge_into_empty() {
        let mut empty = PairingHeap::<u8, u8>::new();
        let mut other = PairingHeap::new();
        other.insert(1, 1);

        assert_eq!(empty.merge(other), 0);
        assert_eq!(empty.peek(), Some((1, 1)));
    }

    #[test]
    fn test_random_operations_match_binary_heap() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut heap = PairingHeap::new();
        let mut handles = Vec::new();
        let mut current: Vec<Option<u64>> = Vec::new();

        for _ in 0..2000 {
            match rng.gen_range(0..3) {
                0 => {
                    let prio = rng.gen_range(0..10_000u64);
                    handles.push(heap.insert(current.len(), prio));
                    current.push(Some(prio));
                }
                1 if !handles.is_empty() => {
                    let i = rng.gen_range(0..handles.len());
                    if let Some(prio) = current[i] {
                        let lower = prio / 2;
                        if heap.decrease_key(handles[i], lower) {
                            current[i] = Some(lower);
                        }
                    }
                }
                _ => {
                    if let Some((key, prio)) = heap.delete_min() {
                        let expected = current.iter().flatten().min().copied();
                        assert_eq!(Some(prio), expected);
                        assert_eq!(current[key], Some(prio));
                        current[key] = None;
                    }
                }
            }
            assert_eq!(heap.len(), current.iter().flatten().count());
        }

        let mut reference: BinaryHeap<_> = current.iter().flatten().map(|&p| Reverse(p)).collect();
        for prio in drain(&mut heap) {
            assert_eq!(reference.pop(), Some(Reverse(prio)));
        }
        assert!(reference.is_empty());
    }
}
