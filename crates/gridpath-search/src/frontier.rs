//! The A* open list.
//!
//! Entries are stored in a min-heap keyed by `(f, seq)`: lower estimated
//! total cost first, ties broken by the insertion sequence the caller
//! assigned (lower first, so equal-cost cells expand FIFO). `f` is compared
//! with [`f64::total_cmp`], so the order is total even for NaN.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// An entry in the frontier.
#[derive(Debug)]
struct Entry<T> {
    item: T,
    f: f64,
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order; the heap wraps entries in `Reverse`.
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue ordered by `(f, seq)`.
///
/// The frontier does not deduplicate: pushing the same item twice keeps
/// both entries, and it is up to the caller to recognise the outdated one
/// when it is popped.
pub struct Frontier<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    high_water: usize,
}

impl<T> Frontier<T> {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            high_water: 0,
        }
    }

    /// Create an empty frontier with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(cap),
            high_water: 0,
        }
    }

    /// Push `item` with estimated total cost `f` and insertion sequence
    /// `seq`.
    pub fn push(&mut self, item: T, f: f64, seq: u64) {
        self.heap.push(Reverse(Entry { item, f, seq }));
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Pop the entry with the lowest `(f, seq)`, returning `(item, f, seq)`.
    pub fn pop(&mut self) -> Option<(T, f64, u64)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.item, entry.f, entry.seq))
    }

    /// The key of the entry [`pop`](Self::pop) would return next.
    pub fn peek_key(&self) -> Option<(f64, u64)> {
        self.heap.peek().map(|Reverse(entry)| (entry.f, entry.seq))
    }

    /// Whether the frontier is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries, outdated ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Largest number of entries held at once since creation.
    #[inline]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Remove all entries. The high-water mark is kept.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_f_first() {
        let mut q = Frontier::new();
        q.push("a", 3.0, 0);
        q.push("b", 1.0, 1);
        q.push("c", 2.0, 2);

        assert_eq!(q.pop().map(|e| e.0), Some("b"));
        assert_eq!(q.pop().map(|e| e.0), Some("c"));
        assert_eq!(q.pop().map(|e| e.0), Some("a"));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn equal_f_is_fifo_by_sequence() {
        let mut q = Frontier::new();
        q.push("third", 1.5, 7);
        q.push("first", 1.5, 2);
        q.push("second", 1.5, 4);

        assert_eq!(q.pop().map(|e| e.0), Some("first"));
        assert_eq!(q.pop().map(|e| e.0), Some("second"));
        assert_eq!(q.pop().map(|e| e.0), Some("third"));
    }

    #[test]
    fn f_dominates_sequence() {
        let mut q = Frontier::new();
        q.push("late-cheap", 1.0, 100);
        q.push("early-dear", 1.0 + 1e-9, 0);
        assert_eq!(q.peek_key(), Some((1.0, 100)));
        assert_eq!(q.pop().map(|e| e.0), Some("late-cheap"));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut q = Frontier::new();
        q.push(5usize, 4.0, 1);
        q.push(5usize, 3.0, 1);
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some((5, 3.0, 1)));
        assert_eq!(q.pop(), Some((5, 4.0, 1)));
    }

    #[test]
    fn high_water_does_not_decrease() {
        let mut q = Frontier::new();
        q.push(0, 1.0, 0);
        q.push(1, 2.0, 1);
        q.push(2, 3.0, 2);
        assert_eq!(q.high_water(), 3);
        let _ = q.pop();
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.high_water(), 3);
    }
}
