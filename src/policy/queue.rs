//! Ready queues.
//!
//! Both queues refuse to hold the same pid twice, so a policy never
//! duplicates a process it has been told about.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use crate::models::Pid;

/// FIFO queue of ready processes. Insertion order is dispatch order.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    order: VecDeque<Pid>,
    members: HashSet<Pid>,
}

impl ReadyQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `pid` at the tail. Returns `false` if it was already queued.
    pub fn push_back(&mut self, pid: Pid) -> bool {
        if !self.members.insert(pid) {
            return false;
        }
        self.order.push_back(pid);
        true
    }

    /// Removes and returns the head.
    pub fn pop_front(&mut self) -> Option<Pid> {
        let pid = self.order.pop_front()?;
        self.members.remove(&pid);
        Some(pid)
    }

    /// The head, without removing it.
    pub fn front(&self) -> Option<Pid> {
        self.order.front().copied()
    }

    /// Whether `pid` is waiting.
    pub fn contains(&self, pid: Pid) -> bool {
        self.members.contains(&pid)
    }

    /// Number of waiting processes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Waiting processes, head first.
    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.order.iter().copied()
    }
}

/// Min-queue ordered by a key, ties broken by insertion order.
///
/// Backs the non-preemptive SJF and priority policies.
#[derive(Debug, Clone)]
pub struct KeyedQueue<K: Ord> {
    heap: BinaryHeap<Reverse<(K, u64, Pid)>>,
    members: HashSet<Pid>,
    next_seq: u64,
}

impl<K: Ord> KeyedQueue<K> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            members: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Inserts `pid` with `key`. Returns `false` if it was already queued.
    pub fn push(&mut self, pid: Pid, key: K) -> bool {
        if !self.members.insert(pid) {
            return false;
        }
        self.heap.push(Reverse((key, self.next_seq, pid)));
        self.next_seq += 1;
        true
    }

    /// Removes and returns the pid with the smallest key.
    pub fn pop(&mut self) -> Option<Pid> {
        let Reverse((_, _, pid)) = self.heap.pop()?;
        self.members.remove(&pid);
        Some(pid)
    }

    /// Whether `pid` is waiting.
    pub fn contains(&self, pid: Pid) -> bool {
        self.members.contains(&pid)
    }

    /// Number of waiting processes.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<K: Ord> Default for KeyedQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
