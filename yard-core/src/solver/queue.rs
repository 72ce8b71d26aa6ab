#[cfg(test)]
#[path = "../../tests/unit/solver/queue_test.rs"]
mod queue_test;

use crate::utils::{Float, OrdFloat};
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// A fixed capacity max priority queue which keeps only entries with the highest priorities.
///
/// Each key is stored at most once: pushing an existing key replaces its entry when the new priority
/// is higher. When the queue is full, a new entry evicts the lowest priority one if it has a higher
/// priority. Replaced and evicted entries are removed from the heap lazily.
pub struct CapacityLimitedQueue<K, V> {
    capacity: usize,
    sequence: u64,
    heap: BinaryHeap<Reverse<(OrdFloat, u64)>>,
    keys: FxHashMap<u64, K>,
    entries: FxHashMap<K, (Float, u64, V)>,
}

impl<K: Hash + Eq + Clone, V> CapacityLimitedQueue<K, V> {
    /// Creates a new instance of `CapacityLimitedQueue`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sequence: 0,
            heap: BinaryHeap::with_capacity(capacity + 1),
            keys: FxHashMap::default(),
            entries: FxHashMap::default(),
        }
    }

    /// Returns amount of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the queue has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the lowest priority kept in the queue.
    pub fn min_priority(&mut self) -> Option<Float> {
        self.discard_stale();
        self.heap.peek().map(|Reverse((priority, _))| priority.0)
    }

    /// Pushes an entry. Returns true if the entry was stored.
    pub fn push(&mut self, key: K, priority: Float, value: V) -> bool {
        if self.capacity == 0 || priority.is_nan() {
            return false;
        }

        if let Some((existing, sequence, _)) = self.entries.get(&key) {
            if priority <= *existing {
                return false;
            }

            let sequence = *sequence;
            self.keys.remove(&sequence);
            self.entries.remove(&key);
        } else if self.entries.len() >= self.capacity {
            match self.min_priority() {
                Some(lowest) if priority > lowest => self.pop_lowest(),
                _ => return false,
            }
        }

        self.sequence += 1;
        self.heap.push(Reverse((OrdFloat(priority), self.sequence)));
        self.keys.insert(self.sequence, key.clone());
        self.entries.insert(key, (priority, self.sequence, value));

        true
    }

    /// Consumes the queue and returns entries ordered by descending priority.
    pub fn into_sorted_vec(self) -> Vec<(K, Float, V)> {
        let mut entries = self
            .entries
            .into_iter()
            .map(|(key, (priority, sequence, value))| (sequence, key, priority, value))
            .collect::<Vec<_>>();

        // NOTE insertion order keeps the result deterministic for equal priorities
        entries.sort_by(|(a_seq, _, a, _), (b_seq, _, b, _)| OrdFloat(*b).cmp(&OrdFloat(*a)).then(a_seq.cmp(b_seq)));

        entries.into_iter().map(|(_, key, priority, value)| (key, priority, value)).collect()
    }

    fn pop_lowest(&mut self) {
        self.discard_stale();
        if let Some(Reverse((_, sequence))) = self.heap.pop() {
            if let Some(key) = self.keys.remove(&sequence) {
                self.entries.remove(&key);
            }
        }
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse((_, sequence))) = self.heap.peek() {
            if self.keys.contains_key(sequence) {
                break;
            }
            self.heap.pop();
        }
    }
}
