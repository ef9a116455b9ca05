use log::{info, trace, warn};
use smallvec::SmallVec;

use crate::cell::{CellId, CellState, Coord};
use crate::error::{GridError, Result};
use crate::frontier::PriorityFrontier;
use crate::grid::Grid;
use crate::solver::path::reconstruct_path;
use crate::solver::{paint, FrontierPolicy, Path, SearchObserver, SearchOutcome};
use crate::{FxIndexMap, INFINITY, N_NEIGHBOURS};

/// Per-search bookkeeping, indexed by [CellId]. Dropped when the search returns.
#[derive(Clone, Debug)]
pub struct SearchContext {
    pub g_score: Vec<i32>,
    pub f_score: Vec<i32>,
    pub came_from: FxIndexMap<CellId, CellId>,
    pub frontier: PriorityFrontier,
}

impl SearchContext {
    pub fn new(cell_count: usize) -> SearchContext {
        SearchContext {
            g_score: vec![INFINITY; cell_count],
            f_score: vec![INFINITY; cell_count],
            came_from: FxIndexMap::default(),
            frontier: PriorityFrontier::new(),
        }
    }
}

/// A* over the 4-connected unit-cost grid with the Manhattan distance as heuristic, which is
/// consistent on such grids so the first time the goal is popped its path is optimal.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub frontier_policy: FrontierPolicy,
    /// Reject barrier endpoints with [GridError::BlockedEndpoint]. When off, a barrier start
    /// still expands through its own neighbour cache and a barrier end is never reached.
    pub validate_endpoints: bool,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            frontier_policy: FrontierPolicy::Reprioritize,
            validate_endpoints: true,
        }
    }

    pub fn heuristic(&self, p1: &Coord, p2: &Coord) -> i32 {
        p1.manhattan_distance(p2)
    }

    fn endpoint(&self, grid: &Grid, coord: Coord) -> Result<CellId> {
        let id = grid.id(coord).ok_or(GridError::OutOfBounds(coord))?;
        if self.validate_endpoints && grid.state_of(id).is_barrier() {
            return Err(GridError::BlockedEndpoint(coord));
        }
        Ok(id)
    }

    /// Searches for a shortest path from `start` to `end` using the grid's neighbour caches,
    /// which the caller must have recomputed since the last barrier change. Cells entering the
    /// frontier become [CellState::Frontier], expanded cells other than the start become
    /// [CellState::Visited] and, on success, the path is marked by [reconstruct_path]. The start
    /// and end cells are never repainted as frontier or visited.
    pub fn solve<O: SearchObserver>(
        &self,
        grid: &mut Grid,
        start: Coord,
        end: Coord,
        observer: &mut O,
    ) -> Result<SearchOutcome> {
        let start_id = self.endpoint(grid, start)?;
        let end_id = self.endpoint(grid, end)?;
        if grid.neighbours_dirty {
            warn!("Neighbour caches are stale, the search may follow outdated barriers");
        }
        info!("Searching for a path from {} to {}", start, end);

        let mut ct = SearchContext::new(grid.cell_count());
        ct.g_score[start_id.index()] = 0;
        ct.f_score[start_id.index()] = self.heuristic(&start, &end);
        ct.frontier.push(start_id, 0);

        let mut expanded = 0;
        while let Some(item) = ct.frontier.pop_min() {
            let current = item.cell;
            expanded += 1;
            trace!("Expanding {} with priority {}", grid.coord(current), item.priority);

            if current == end_id {
                let cells = reconstruct_path(grid, &ct.came_from, start_id, end_id, observer)?;
                let cost = ct.g_score[end_id.index()];
                if cells.len() as i32 != cost + 1 {
                    return Err(GridError::Internal(format!(
                        "path of {} cells does not match cost {}",
                        cells.len(),
                        cost
                    )));
                }
                info!("Found path of cost {} after expanding {} cells", cost, expanded);
                return Ok(SearchOutcome::Found(Path {
                    cells,
                    cost,
                    expanded,
                }));
            }

            let g = ct.g_score[current.index()];
            if g == INFINITY {
                return Err(GridError::Internal(format!(
                    "popped {} without a g-score",
                    grid.coord(current)
                )));
            }
            let neighbours: SmallVec<[CellId; N_NEIGHBOURS]> =
                SmallVec::from_slice(grid.neighbours(current));
            for neighbour in neighbours {
                let tentative_g = g + 1;
                let ix = neighbour.index();
                if tentative_g >= ct.g_score[ix] {
                    continue;
                }
                ct.came_from.insert(neighbour, current);
                ct.g_score[ix] = tentative_g;
                ct.f_score[ix] = tentative_g + self.heuristic(&grid.coord(neighbour), &end);

                if ct.frontier.contains(neighbour) {
                    if self.frontier_policy == FrontierPolicy::Reprioritize {
                        ct.frontier.fix(neighbour, ct.f_score[ix]);
                    }
                } else {
                    ct.frontier.push(neighbour, ct.f_score[ix]);
                    if neighbour != start_id && neighbour != end_id {
                        paint(grid, neighbour, CellState::Frontier, observer);
                    }
                }
            }

            if current != start_id {
                paint(grid, current, CellState::Visited, observer);
            }
            observer.on_frame();
        }

        info!(
            "{} is not reachable from {} ({} cells expanded)",
            end, start, expanded
        );
        Ok(SearchOutcome::NoPath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{NoopObserver, TransitionLog};

    fn grid_with(n: i32, barriers: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(n).unwrap();
        for &b in barriers {
            grid.set_state(b.into(), CellState::Barrier).unwrap();
        }
        grid.recompute_neighbours();
        grid
    }

    fn solve(grid: &mut Grid, start: (i32, i32), end: (i32, i32)) -> SearchOutcome {
        AstarSolver::new()
            .solve(grid, start.into(), end.into(), &mut NoopObserver)
            .unwrap()
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let mut grid = grid_with(1, &[]);
        let path = solve(&mut grid, (0, 0), (0, 0)).into_path().unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.cost, 0);
        assert_eq!(path.expanded, 1);
    }

    /// Asserts that the optimal 4 step solution is found around a centre obstacle.
    #[test]
    fn solve_simple_problem() {
        // |S  |
        // | # |
        // |  E|
        let mut grid = grid_with(3, &[(1, 1)]);
        let path = solve(&mut grid, (0, 0), (2, 2)).into_path().unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.cost, 4);
        assert!(!path.contains(Coord::new(1, 1)));
    }

    #[test]
    fn path_is_contiguous() {
        let mut grid = grid_with(6, &[(1, 0), (1, 1), (1, 2), (1, 3), (3, 5), (3, 4), (3, 3)]);
        let path = solve(&mut grid, (0, 0), (5, 5)).into_path().unwrap();
        assert_eq!(path.start(), Some(Coord::new(0, 0)));
        assert_eq!(path.goal(), Some(Coord::new(5, 5)));
        for w in path.cells.windows(2) {
            assert_eq!(w[0].manhattan_distance(&w[1]), 1);
        }
        assert_eq!(path.len() as i32, path.cost + 1);
    }

    #[test]
    fn rejects_out_of_bounds_endpoints() {
        let mut grid = grid_with(3, &[]);
        let result = AstarSolver::new().solve(
            &mut grid,
            Coord::new(0, 0),
            Coord::new(3, 3),
            &mut NoopObserver,
        );
        assert_eq!(result, Err(GridError::OutOfBounds(Coord::new(3, 3))));
    }

    #[test]
    fn rejects_blocked_endpoints() {
        let mut grid = grid_with(3, &[(2, 2)]);
        let result = AstarSolver::new().solve(
            &mut grid,
            Coord::new(0, 0),
            Coord::new(2, 2),
            &mut NoopObserver,
        );
        assert_eq!(result, Err(GridError::BlockedEndpoint(Coord::new(2, 2))));
    }

    #[test]
    fn blocked_end_without_validation_has_no_path() {
        let mut grid = grid_with(3, &[(2, 2)]);
        let mut solver = AstarSolver::new();
        solver.validate_endpoints = false;
        let outcome = solver
            .solve(&mut grid, Coord::new(0, 0), Coord::new(2, 2), &mut NoopObserver)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NoPath);
    }

    #[test]
    fn endpoints_keep_their_identity() {
        let mut grid = grid_with(4, &[]);
        grid.set_state(Coord::new(0, 0), CellState::Start).unwrap();
        grid.set_state(Coord::new(3, 3), CellState::End).unwrap();
        let mut log = TransitionLog::new();
        AstarSolver::new()
            .solve(&mut grid, Coord::new(0, 0), Coord::new(3, 3), &mut log)
            .unwrap();
        assert_eq!(grid.state(Coord::new(0, 0)), Some(CellState::Start));
        assert_eq!(grid.state(Coord::new(3, 3)), Some(CellState::End));
        assert!(log
            .transitions
            .iter()
            .all(|&(c, _)| c != Coord::new(0, 0) && c != Coord::new(3, 3)));
    }

    #[test]
    fn frames_match_expansions_and_path() {
        let mut grid = grid_with(5, &[]);
        let mut log = TransitionLog::new();
        let path = AstarSolver::new()
            .solve(&mut grid, Coord::new(0, 0), Coord::new(4, 4), &mut log)
            .unwrap()
            .into_path()
            .unwrap();
        // Every non-goal pop emits a frame, and so does every walked path cell.
        assert_eq!(log.frames, path.expanded - 1 + path.len());
    }

    #[test]
    fn keep_first_policy_finds_a_valid_path() {
        let barriers = [(0, 2), (1, 2), (2, 2), (3, 2), (5, 4), (4, 4), (3, 4)];
        let mut grid = grid_with(6, &barriers);
        let reprioritized = solve(&mut grid, (0, 0), (0, 5)).into_path().unwrap();
        let mut grid = grid_with(6, &barriers);
        let mut solver = AstarSolver::new();
        solver.frontier_policy = FrontierPolicy::KeepFirst;
        let kept = solver
            .solve(&mut grid, Coord::new(0, 0), Coord::new(0, 5), &mut NoopObserver)
            .unwrap()
            .into_path()
            .unwrap();
        assert_eq!(reprioritized.cost, 13);
        assert!(kept.cost >= reprioritized.cost);
        assert_eq!(kept.len() as i32, kept.cost + 1);
        for w in kept.cells.windows(2) {
            assert_eq!(w[0].manhattan_distance(&w[1]), 1);
        }
    }

    /// Keeping stale priorities can expand a cell before its cheapest route is known, so it is
    /// expanded again once that route turns up. Re-prioritising never does this.
    #[test]
    fn keep_first_policy_revisits_cells() {
        // |.......S..|
        // |......##..|
        // |..........|
        // |.......#..|
        // |.........#|
        // |........#E|
        // |.........#|
        // |..........|
        // |..........|
        // |..........|
        let barriers = [(1, 6), (1, 7), (3, 7), (4, 9), (5, 8), (6, 9)];
        let (start, end) = (Coord::new(0, 7), Coord::new(5, 9));
        let run = |policy: FrontierPolicy| {
            let mut grid = grid_with(10, &barriers);
            let mut solver = AstarSolver::new();
            solver.frontier_policy = policy;
            let mut log = TransitionLog::new();
            let outcome = solver.solve(&mut grid, start, end, &mut log).unwrap();
            assert_eq!(outcome, SearchOutcome::NoPath);
            log
        };
        let visits = |log: &TransitionLog| {
            log.transitions
                .iter()
                .filter(|&&(_, s)| s == CellState::Visited)
                .count()
        };

        let reprioritized = run(FrontierPolicy::Reprioritize);
        assert_eq!(visits(&reprioritized), 92);
        assert_eq!(reprioritized.count(Coord::new(4, 5), CellState::Visited), 1);
        assert_eq!(reprioritized.count(Coord::new(5, 5), CellState::Visited), 1);

        let kept = run(FrontierPolicy::KeepFirst);
        assert_eq!(visits(&kept), 94);
        assert_eq!(kept.count(Coord::new(4, 5), CellState::Visited), 2);
        assert_eq!(kept.count(Coord::new(5, 5), CellState::Visited), 2);
    }

    #[test]
    fn stale_neighbours_follow_old_layout() {
        let mut grid = grid_with(3, &[]);
        for col in 0..3 {
            grid.set_state(Coord::new(1, col), CellState::Barrier).unwrap();
        }
        assert!(grid.neighbours_dirty);
        // The cache still predates the wall.
        assert!(solve(&mut grid, (0, 0), (2, 0)).is_found());
        grid.clear_search();
        grid.recompute_neighbours();
        assert_eq!(solve(&mut grid, (0, 0), (2, 0)), SearchOutcome::NoPath);
    }

    #[test]
    fn stale_search_leaves_barriers_in_place() {
        let mut grid = grid_with(3, &[]);
        for col in 0..3 {
            grid.set_state(Coord::new(1, col), CellState::Barrier).unwrap();
        }
        let mut log = TransitionLog::new();
        let path = AstarSolver::new()
            .solve(&mut grid, Coord::new(0, 0), Coord::new(2, 0), &mut log)
            .unwrap()
            .into_path()
            .unwrap();
        assert!(path.contains(Coord::new(1, 0)));
        assert_eq!(grid.count(CellState::Barrier), 3);
        assert!(log.transitions.iter().all(|&(c, _)| c.row != 1));
        grid.clear_search();
        assert_eq!(grid.count(CellState::Barrier), 3);
        assert_eq!(grid.to_string(), "...\n###\nE..\n");
    }
}
