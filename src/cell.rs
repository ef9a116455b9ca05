use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::N_NEIGHBOURS;

/// A (row, col) position on the grid. Valid positions lie in `[0, n)` on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    pub fn manhattan_distance(&self, other: &Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// The 4-neighbourhood in search order: down, up, right, left.
    /// Points may fall outside the grid.
    pub fn neumann_neighborhood(&self) -> [Coord; N_NEIGHBOURS] {
        [
            Coord::new(self.row + 1, self.col),
            Coord::new(self.row - 1, self.col),
            Coord::new(self.row, self.col + 1),
            Coord::new(self.row, self.col - 1),
        ]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Coord {
        Coord::new(row, col)
    }
}

/// Slot of a cell in the grid arena (row-major).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a cell currently is. Exactly one state per cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// Enqueued in the frontier.
    Frontier,
    /// Expanded by the search.
    Visited,
    Path,
}

impl CellState {
    pub fn is_barrier(self) -> bool {
        matches!(self, CellState::Barrier)
    }

    /// States written by a search run, as opposed to the layout set up by the user.
    pub fn is_search_mark(self) -> bool {
        match self {
            CellState::Frontier | CellState::Visited | CellState::Path => true,
            CellState::Empty | CellState::Barrier | CellState::Start | CellState::End => false,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Barrier => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Frontier => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Cell {
    pub state: CellState,
    /// Snapshot of the non-barrier neighbours taken by the last recompute.
    pub(crate) neighbours: SmallVec<[CellId; N_NEIGHBOURS]>,
}

impl Cell {
    pub fn neighbours(&self) -> &[CellId] {
        &self.neighbours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Coord::new(0, 0);
        let b = Coord::new(4, 3);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn neighbourhood_order() {
        let c = Coord::new(2, 2);
        assert_eq!(
            c.neumann_neighborhood(),
            [
                Coord::new(3, 2),
                Coord::new(1, 2),
                Coord::new(2, 3),
                Coord::new(2, 1)
            ]
        );
    }

    #[test]
    fn only_search_states_are_marks() {
        assert!(CellState::Visited.is_search_mark());
        assert!(CellState::Path.is_search_mark());
        assert!(!CellState::Start.is_search_mark());
        assert!(!CellState::Barrier.is_search_mark());
    }
}
