use crate::grid::Position;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// An entry in the priority frontier. The heap is a max-heap, so `Ord` is
/// implemented in reverse; equal priorities fall back to the insertion
/// sequence number, which keeps pops stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityEntry {
    priority: u32,
    seq: u64,
    pos: Position,
}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that BinaryHeap pops the smallest priority, and within a
        // priority tier the earliest-inserted entry.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// The set of discovered-but-not-settled cells, parameterized by ordering
/// policy. All four search algorithms share one loop and differ only in which
/// variant they feed it: FIFO for BFS, LIFO for DFS, priority for Dijkstra
/// and A*.
#[derive(Debug)]
pub enum Frontier {
    Fifo(VecDeque<Position>),
    Lifo(Vec<Position>),
    Priority { heap: BinaryHeap<PriorityEntry>, seq: u64 },
}

impl Frontier {
    pub fn fifo() -> Self {
        Frontier::Fifo(VecDeque::new())
    }

    pub fn lifo() -> Self {
        Frontier::Lifo(Vec::new())
    }

    pub fn priority() -> Self {
        Frontier::Priority {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Inserts a cell. `priority` is ignored by the FIFO and LIFO variants.
    pub fn push(&mut self, pos: Position, priority: u32) {
        match self {
            Frontier::Fifo(queue) => queue.push_back(pos),
            Frontier::Lifo(stack) => stack.push(pos),
            Frontier::Priority { heap, seq } => {
                heap.push(PriorityEntry {
                    priority,
                    seq: *seq,
                    pos,
                });
                *seq += 1;
            }
        }
    }

    pub fn pop(&mut self) -> Option<Position> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Lifo(stack) => stack.pop(),
            Frontier::Priority { heap, .. } => heap.pop().map(|entry| entry.pos),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Frontier::Fifo(queue) => queue.is_empty(),
            Frontier::Lifo(stack) => stack.is_empty(),
            Frontier::Priority { heap, .. } => heap.is_empty(),
        }
    }
}
