use crate::cell::{CellId, CellState, Coord};
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::solver::{paint, SearchObserver};
use crate::FxIndexMap;

/// Walks the predecessor map back from `goal` to `start`, marking every cell in between as
/// [CellState::Path] and restoring the goal to [CellState::End]. The start keeps its state.
/// Emits one frame per walked cell, goal first. Returns the cells in start to goal order.
pub fn reconstruct_path<O: SearchObserver>(
    grid: &mut Grid,
    came_from: &FxIndexMap<CellId, CellId>,
    start: CellId,
    goal: CellId,
    observer: &mut O,
) -> Result<Vec<Coord>> {
    let limit = grid.cell_count();
    let chain: Vec<CellId> =
        std::iter::successors(Some(goal), |id| came_from.get(id).copied())
            .take(limit + 1)
            .collect();
    if chain.len() > limit {
        return Err(GridError::Internal(format!(
            "predecessor chain from {} does not terminate",
            grid.coord(goal)
        )));
    }
    if chain.last() != Some(&start) {
        let end = chain.last().map_or(goal, |&id| id);
        return Err(GridError::Internal(format!(
            "predecessor chain ends at {} instead of {}",
            grid.coord(end),
            grid.coord(start)
        )));
    }

    for &id in &chain {
        if id == goal {
            paint(grid, id, CellState::End, observer);
        } else if id != start {
            paint(grid, id, CellState::Path, observer);
        }
        observer.on_frame();
    }
    Ok(chain.iter().rev().map(|&id| grid.coord(id)).collect())
}
