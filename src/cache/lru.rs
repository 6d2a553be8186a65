//! Recency Tracking Module
//!
//! Implements the least-recently-used ordering behind cache eviction as a
//! doubly-linked list over a slab of nodes, indexed by a HashMap. Touch,
//! remove and evict are all O(1), and the order depends only on the
//! sequence of touch events, never on map iteration order.

use std::collections::HashMap;

// == Node ==
/// One slot in the recency list.
#[derive(Debug)]
struct Node {
    key: String,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Tracks key access order for LRU eviction.
///
/// Head = most recently touched, tail = least recently touched. Freed slots
/// are recycled through a free list so long-running churn does not grow the
/// slab.
#[derive(Debug, Default)]
pub struct RecencyList {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Vec<usize>,
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty recency list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// Existing keys are unlinked and relinked at the head; new keys get a
    /// fresh (or recycled) slot at the head.
    pub fn touch(&mut self, key: &str) {
        if let Some(&idx) = self.index.get(key) {
            self.unlink(idx);
            self.push_front(idx);
        } else {
            let idx = self.alloc(key.to_string());
            self.index.insert(key.to_string(), idx);
            self.push_front(idx);
        }
    }

    // == Remove ==
    /// Removes a key from the tracker. No-op if the key is untracked.
    pub fn remove(&mut self, key: &str) {
        if let Some(idx) = self.index.remove(key) {
            self.unlink(idx);
            self.free.push(idx);
        }
    }

    // == Evict Oldest ==
    /// Unlinks and returns the least recently used key, or None if empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let idx = self.tail?;
        let key = self.nodes[idx].key.clone();
        self.index.remove(&key);
        self.unlink(idx);
        self.free.push(idx);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.tail.map(|idx| self.nodes[idx].key.as_str())
    }

    // == Clear ==
    /// Drops every tracked key.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    // == Length ==
    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    #[allow(dead_code)]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Internals ==
    fn alloc(&mut self, key: String) -> usize {
        if let Some(idx) = self.free.pop() {
            self.nodes[idx].key = key;
            idx
        } else {
            self.nodes.push(Node {
                key,
                prev: None,
                next: None,
            });
            self.nodes.len() - 1
        }
    }

    /// Detaches a node from its neighbors, fixing head/tail.
    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    /// Links a detached node in at the head (most recent).
    fn push_front(&mut self, idx: usize) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = self.head;

        if let Some(old_head) = self.head {
            self.nodes[old_head].prev = Some(idx);
        }
        self.head = Some(idx);

        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }
}
