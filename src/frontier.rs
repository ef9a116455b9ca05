//! Min-priority queue over grid cells with membership tests and in-place re-prioritisation.
//!
//! [BinaryHeap](std::collections::BinaryHeap) cannot change the priority of an entry once it has
//! been pushed, so this keeps its own array heap together with a position index from cell to
//! heap slot. The index makes [contains](PriorityFrontier::contains) O(1) and lets
//! [fix](PriorityFrontier::fix) restore heap order in O(log n).
use core::cmp::Ordering;

use fxhash::FxHashMap;

use crate::cell::CellId;

/// An enqueued cell. Owned by the frontier until popped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriorityItem {
    pub cell: CellId,
    pub priority: i32,
    /// Insertion sequence, breaks ties between equal priorities in FIFO order.
    seq: u64,
}

impl PartialOrd for PriorityItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityItem {
    /// Smaller is more urgent: first by priority, then by insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        match self.priority.cmp(&other.priority) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            s => s,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PriorityFrontier {
    heap: Vec<PriorityItem>,
    positions: FxHashMap<CellId, usize>,
    next_seq: u64,
}

impl PriorityFrontier {
    pub fn new() -> PriorityFrontier {
        PriorityFrontier::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
        self.next_seq = 0;
    }

    /// Enqueues `cell` with `priority`. A cell that is already enqueued is re-prioritised in
    /// place rather than duplicated.
    pub fn push(&mut self, cell: CellId, priority: i32) {
        if self.fix(cell, priority) {
            return;
        }
        let item = PriorityItem {
            cell,
            priority,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let ix = self.heap.len();
        self.heap.push(item);
        self.positions.insert(cell, ix);
        self.sift_up(ix);
    }

    /// Removes and returns the most urgent item, or [None] if the frontier is empty.
    pub fn pop_min(&mut self) -> Option<PriorityItem> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let item = self.heap.pop()?;
        self.positions.remove(&item.cell);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(item)
    }

    pub fn peek(&self) -> Option<&PriorityItem> {
        self.heap.first()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.positions.contains_key(&cell)
    }

    pub fn priority(&self, cell: CellId) -> Option<i32> {
        self.positions.get(&cell).map(|&ix| self.heap[ix].priority)
    }

    /// Changes the priority of an enqueued cell and restores heap order. Returns [false] if the
    /// cell is not enqueued.
    pub fn fix(&mut self, cell: CellId, priority: i32) -> bool {
        let Some(&ix) = self.positions.get(&cell) else {
            return false;
        };
        let old = self.heap[ix].priority;
        self.heap[ix].priority = priority;
        match priority.cmp(&old) {
            Ordering::Less => self.sift_up(ix),
            Ordering::Greater => self.sift_down(ix),
            Ordering::Equal => {}
        }
        true
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.positions.insert(self.heap[i].cell, i);
        self.positions.insert(self.heap[j].cell, j);
    }

    fn sift_up(&mut self, mut ix: usize) {
        while ix > 0 {
            let parent = (ix - 1) / 2;
            if self.heap[ix] >= self.heap[parent] {
                break;
            }
            self.swap(ix, parent);
            ix = parent;
        }
    }

    fn sift_down(&mut self, mut ix: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * ix + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let child = if right < n && self.heap[right] < self.heap[left] {
                right
            } else {
                left
            };
            if self.heap[child] >= self.heap[ix] {
                break;
            }
            self.swap(ix, child);
            ix = child;
        }
    }
}
