//! Editing state behind an interactive board: which cells are the start and end, how clicks
//! turn into cell states and how a search is kicked off. Rendering and input decoding live in
//! the front end; this only tracks what they feed in.
use log::{debug, info};

use crate::cell::{CellState, Coord};
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::solver::astar::AstarSolver;
use crate::solver::{SearchObserver, SearchOutcome};

#[derive(Clone, Debug)]
pub struct Session {
    pub grid: Grid,
    pub solver: AstarSolver,
    start: Option<Coord>,
    end: Option<Coord>,
}

impl Session {
    pub fn new(rows: i32) -> Result<Session> {
        Ok(Session {
            grid: Grid::new(rows)?,
            solver: AstarSolver::new(),
            start: None,
            end: None,
        })
    }

    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    /// Maps a pixel position in a square window `width` pixels wide to the cell under it.
    pub fn cell_at_pixel(&self, x: i32, y: i32, width: i32) -> Option<Coord> {
        let gap = width / self.grid.size();
        if gap <= 0 || x < 0 || y < 0 {
            return None;
        }
        let coord = Coord::new(y / gap, x / gap);
        self.grid.in_bounds(coord).then_some(coord)
    }

    /// Primary click. The first free designation wins: start, then end, then a barrier. The
    /// start and end cells themselves are left alone once placed.
    pub fn paint(&mut self, coord: Coord) -> Result<()> {
        if !self.grid.in_bounds(coord) {
            return Err(GridError::OutOfBounds(coord));
        }
        let is_start = self.start == Some(coord);
        let is_end = self.end == Some(coord);
        if self.start.is_none() && !is_end {
            self.start = Some(coord);
            self.grid.set_state(coord, CellState::Start)
        } else if self.end.is_none() && !is_start {
            self.end = Some(coord);
            self.grid.set_state(coord, CellState::End)
        } else if !is_start && !is_end {
            self.grid.set_state(coord, CellState::Barrier)
        } else {
            Ok(())
        }
    }

    /// Secondary click. Resets the cell and drops its start/end designation.
    pub fn erase(&mut self, coord: Coord) -> Result<()> {
        self.grid.set_state(coord, CellState::Empty)?;
        if self.start == Some(coord) {
            self.start = None;
        } else if self.end == Some(coord) {
            self.end = None;
        }
        Ok(())
    }

    /// Clears marks from an earlier run, rebuilds the neighbour caches and searches between
    /// the placed endpoints.
    pub fn run<O: SearchObserver>(&mut self, observer: &mut O) -> Result<SearchOutcome> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(GridError::MissingEndpoints);
        };
        self.grid.clear_search();
        self.grid.recompute_neighbours();
        let outcome = self.solver.solve(&mut self.grid, start, end, observer)?;
        info!(
            "Run from {} to {} finished, path found: {}",
            start,
            end,
            outcome.is_found()
        );
        Ok(outcome)
    }

    /// Empties the board and forgets both endpoints.
    pub fn reset(&mut self) -> Result<()> {
        debug!("Resetting {}x{} board", self.grid.size(), self.grid.size());
        self.grid = Grid::new(self.grid.size())?;
        self.start = None;
        self.end = None;
        Ok(())
    }
}
