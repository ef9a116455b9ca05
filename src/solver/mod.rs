use crate::cell::{CellId, CellState, Coord};
use crate::grid::Grid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod astar;
pub mod path;

/// Receives the state changes a search makes to the grid so a presentation layer can redraw.
/// Both hooks default to doing nothing.
pub trait SearchObserver {
    /// Called whenever a cell changes state during a search.
    fn on_transition(&mut self, _coord: Coord, _state: CellState) {}
    /// Called once per expanded cell and once per cell walked during path reconstruction.
    fn on_frame(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

impl<F> SearchObserver for F
where
    F: FnMut(Coord, CellState),
{
    fn on_transition(&mut self, coord: Coord, state: CellState) {
        self(coord, state)
    }
}

/// Records every transition and counts frames, for replaying a search after the fact.
#[derive(Clone, Debug, Default)]
pub struct TransitionLog {
    pub transitions: Vec<(Coord, CellState)>,
    pub frames: usize,
}

impl TransitionLog {
    pub fn new() -> TransitionLog {
        TransitionLog::default()
    }

    pub fn count(&self, coord: Coord, state: CellState) -> usize {
        self.transitions
            .iter()
            .filter(|&&(c, s)| c == coord && s == state)
            .count()
    }
}

impl SearchObserver for TransitionLog {
    fn on_transition(&mut self, coord: Coord, state: CellState) {
        self.transitions.push((coord, state));
    }
    fn on_frame(&mut self) {
        self.frames += 1;
    }
}

/// What to do when a cheaper route is found to a cell that is still enqueued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrontierPolicy {
    /// Lower the priority of the existing entry to the new f-score.
    #[default]
    Reprioritize,
    /// Keep the priority the entry was first enqueued with. Scores and predecessors are still
    /// updated.
    KeepFirst,
}

/// A path found by a search, from start to goal inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    pub cells: Vec<Coord>,
    /// Number of unit steps, equal to the goal's g-score.
    pub cost: i32,
    /// Number of cells popped from the frontier.
    pub expanded: usize,
}

impl Path {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn start(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Coord> {
        self.cells.last().copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Path),
    /// The frontier ran dry before reaching the goal.
    NoPath,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NoPath => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NoPath => None,
        }
    }
}

/// Sets the state of a cell and reports it, unless it already has that state. Barriers are
/// layout and are never repainted, even when a stale neighbour cache leads the search into one.
pub(crate) fn paint<O: SearchObserver>(
    grid: &mut Grid,
    id: CellId,
    state: CellState,
    observer: &mut O,
) {
    let current = grid.state_of(id);
    if current == state || current.is_barrier() {
        return;
    }
    grid.set_state_of(id, state);
    observer.on_transition(grid.coord(id), state);
}
