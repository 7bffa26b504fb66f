use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Min-priority queue consumed by the shortest path engine.
///
/// A key may be inserted many times with different priorities; every copy stays
/// in the queue until it is extracted.
pub trait PriorityQueue<K, P> {
    /// Inserts `key` with the given priority
    fn insert(&mut self, key: K, priority: P);

    /// Removes and returns the entry with the smallest priority
    fn extract_min(&mut self) -> Option<(K, P)>;

    /// Returns true if the queue holds no entries
    fn is_empty(&self) -> bool;

    /// Number of entries, duplicates included
    fn len(&self) -> usize;
}

/// A wrapper around BinaryHeap for priority queue operations in shortest path algorithms
#[derive(Debug, Clone)]
pub struct BinaryHeapWrapper<V, P>
where
    V: Copy + Eq + Debug + Ord,
    P: Copy + Debug + Ord,
{
    /// The underlying binary heap
    heap: BinaryHeap<Reverse<(P, V)>>,
}

impl<V, P> BinaryHeapWrapper<V, P>
where
    V: Copy + Eq + Debug + Ord,
    P: Copy + Debug + Ord,
{
    /// Creates a new empty priority queue
    pub fn new() -> Self {
        BinaryHeapWrapper {
            heap: BinaryHeap::new(),
        }
    }

    /// Creates an empty queue able to hold `capacity` entries without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        BinaryHeapWrapper {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Returns the entry with the smallest priority without removing it
    pub fn peek(&self) -> Option<(V, P)> {
        self.heap.peek().map(|Reverse((priority, vertex))| (*vertex, *priority))
    }

    /// Clears the priority queue
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<V, P> Default for BinaryHeapWrapper<V, P>
where
    V: Copy + Eq + Debug + Ord,
    P: Copy + Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> PriorityQueue<V, P> for BinaryHeapWrapper<V, P>
where
    V: Copy + Eq + Debug + Ord,
    P: Copy + Debug + Ord,
{
    fn insert(&mut self, key: V, priority: P) {
        self.heap.push(Reverse((priority, key)));
    }

    fn extract_min(&mut self) -> Option<(V, P)> {
        self.heap.pop().map(|Reverse((priority, vertex))| (vertex, priority))
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
