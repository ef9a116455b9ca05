//! # grid_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search on an editable square grid,
//! built to drive an interactive visualizer. Movement is 4-directional with unit cost and the
//! heuristic is the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), so
//! every path found is a shortest one.
//!
//! The search writes its progress into the grid itself (cells become
//! [Frontier](CellState::Frontier), [Visited](CellState::Visited) and finally
//! [Path](CellState::Path)) and reports each change to a [SearchObserver] so a front end can
//! redraw as it goes. Neighbour lists are cached per cell and are not refreshed automatically:
//! call [Grid::recompute_neighbours] (or [Grid::update]) after changing barriers.
//!
//! ```
//! use grid_astar::{AstarSolver, CellState, Coord, Grid, NoopObserver};
//!
//! let mut grid = Grid::new(3).unwrap();
//! grid.set_state(Coord::new(1, 1), CellState::Barrier).unwrap();
//! grid.recompute_neighbours();
//! let outcome = AstarSolver::new()
//!     .solve(&mut grid, Coord::new(0, 0), Coord::new(2, 2), &mut NoopObserver)
//!     .unwrap();
//! assert_eq!(outcome.path().map(|p| p.cost), Some(4));
//! ```
pub mod cell;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod session;
pub mod solver;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;

pub use cell::{CellId, CellState, Coord};
pub use error::{GridError, Result};
pub use frontier::{PriorityFrontier, PriorityItem};
pub use grid::Grid;
pub use session::Session;
pub use solver::astar::AstarSolver;
pub use solver::{
    FrontierPolicy, NoopObserver, Path, SearchObserver, SearchOutcome, TransitionLog,
};

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Score of a cell the search has not reached yet.
pub const INFINITY: i32 = i32::MAX;
/// Cardinal moves only.
pub const N_NEIGHBOURS: usize = 4;
