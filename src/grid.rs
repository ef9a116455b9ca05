use core::fmt;

use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, CellId, CellState, Coord};
use crate::error::{GridError, Result};
use crate::N_NEIGHBOURS;

/// [Grid] owns an n×n arena of cells. Besides the raw states it keeps a neighbour cache per
/// cell and a [UnionFind] over 4-connected open cells. Both are snapshots: changing barrier
/// membership flags them as dirty and they have to be rebuilt, either explicitly with
/// [recompute_neighbours](Self::recompute_neighbours) and
/// [generate_components](Self::generate_components) or lazily with [update](Self::update).
#[derive(Clone, Debug)]
pub struct Grid {
    n: i32,
    cells: Vec<Cell>,
    pub components: UnionFind<usize>,
    pub neighbours_dirty: bool,
    pub components_dirty: bool,
}

impl Grid {
    /// Allocates an n×n grid of [CellState::Empty] cells.
    pub fn new(n: i32) -> Result<Grid> {
        if n <= 0 {
            return Err(GridError::InvalidGridSize(n));
        }
        let len = (n as usize) * (n as usize);
        let mut grid = Grid {
            n,
            cells: vec![Cell::default(); len],
            components: UnionFind::new(len),
            neighbours_dirty: true,
            components_dirty: true,
        };
        grid.update();
        Ok(grid)
    }

    /// Side length.
    pub fn size(&self) -> i32 {
        self.n
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0 && coord.col >= 0 && coord.row < self.n && coord.col < self.n
    }

    pub fn id(&self, coord: Coord) -> Option<CellId> {
        self.in_bounds(coord)
            .then(|| CellId((coord.row * self.n + coord.col) as usize))
    }

    pub fn coord(&self, id: CellId) -> Coord {
        let ix = id.index() as i32;
        Coord::new(ix / self.n, ix % self.n)
    }

    pub fn state(&self, coord: Coord) -> Option<CellState> {
        self.id(coord).map(|id| self.cells[id.index()].state)
    }

    pub(crate) fn state_of(&self, id: CellId) -> CellState {
        self.cells[id.index()].state
    }

    /// Overwrites the state of a cell. Start/end uniqueness is left to the caller.
    pub fn set_state(&mut self, coord: Coord, state: CellState) -> Result<()> {
        let id = self.id(coord).ok_or(GridError::OutOfBounds(coord))?;
        self.set_state_of(id, state);
        Ok(())
    }

    /// Joins newly connected components when a barrier is lifted and flags the components as
    /// dirty when one is placed, since that may split a component.
    pub(crate) fn set_state_of(&mut self, id: CellId, state: CellState) {
        let was_barrier = self.cells[id.index()].state.is_barrier();
        self.cells[id.index()].state = state;
        if was_barrier == state.is_barrier() {
            return;
        }
        self.neighbours_dirty = true;
        if state.is_barrier() {
            self.components_dirty = true;
        } else {
            let open: SmallVec<[CellId; N_NEIGHBOURS]> =
                self.open_neighbours(self.coord(id)).collect();
            for n in open {
                self.components.union(id.index(), n.index());
            }
        }
    }

    /// Cached neighbours of a cell, as of the last recompute.
    pub fn neighbours(&self, id: CellId) -> &[CellId] {
        self.cells[id.index()].neighbours()
    }

    pub fn neighbour_coords(&self, coord: Coord) -> Vec<Coord> {
        self.id(coord)
            .map(|id| self.neighbours(id).iter().map(|&n| self.coord(n)).collect())
            .unwrap_or_default()
    }

    fn open_neighbours(&self, coord: Coord) -> impl Iterator<Item = CellId> + '_ {
        coord
            .neumann_neighborhood()
            .into_iter()
            .filter_map(|p| self.id(p))
            .filter(|&n| !self.state_of(n).is_barrier())
    }

    /// Rebuilds every neighbour cache from the current barrier layout. Must be called after
    /// barrier changes and before each search.
    pub fn recompute_neighbours(&mut self) {
        debug!("Recomputing neighbours for {}x{} grid", self.n, self.n);
        for ix in 0..self.cells.len() {
            let coord = self.coord(CellId(ix));
            let neighbours: SmallVec<[CellId; N_NEIGHBOURS]> =
                self.open_neighbours(coord).collect();
            self.cells[ix].neighbours = neighbours;
        }
        self.neighbours_dirty = false;
    }

    /// Generates a new [UnionFind] structure and links up open grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components");
        self.components = UnionFind::new(self.cells.len());
        for (row, col) in iproduct!(0..self.n, 0..self.n) {
            let point = Coord::new(row, col);
            let Some(ix) = self.id(point) else { continue };
            if self.state_of(ix).is_barrier() {
                continue;
            }
            // Down and right suffice, the other two links are made from the other side.
            for p in [Coord::new(row + 1, col), Coord::new(row, col + 1)] {
                if let Some(n) = self.id(p) {
                    if !self.state_of(n).is_barrier() {
                        self.components.union(ix.index(), n.index());
                    }
                }
            }
        }
        self.components_dirty = false;
    }

    /// Regenerates neighbours and components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.neighbours_dirty {
            self.recompute_neighbours();
        }
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Checks if start and goal are open cells on the same component.
    pub fn reachable(&self, start: Coord, goal: Coord) -> bool {
        match (self.id(start), self.id(goal)) {
            (Some(s), Some(g)) => {
                !self.state_of(s).is_barrier()
                    && !self.state_of(g).is_barrier()
                    && self.components.equiv(s.index(), g.index())
            }
            _ => false,
        }
    }

    /// Resets cells marked by a previous search back to [CellState::Empty].
    pub fn clear_search(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.state.is_search_mark() {
                cell.state = CellState::Empty;
            }
        }
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.n as usize) {
            let line: String = row.iter().map(|c| c.state.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
