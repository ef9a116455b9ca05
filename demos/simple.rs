use grid_astar::{AstarSolver, CellState, Coord, Grid, NoopObserver};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a barrier
// - S marks the start
// - E marks the end
fn main() {
    env_logger::init();
    let mut grid = Grid::new(3).unwrap();
    grid.set_state(Coord::new(1, 1), CellState::Barrier).unwrap();
    let start = Coord::new(0, 0);
    let end = Coord::new(2, 2);
    grid.set_state(start, CellState::Start).unwrap();
    grid.set_state(end, CellState::End).unwrap();
    grid.recompute_neighbours();
    let outcome = AstarSolver::new()
        .solve(&mut grid, start, end, &mut NoopObserver)
        .unwrap();
    if let Some(path) = outcome.path() {
        println!("A path of cost {} has been found:", path.cost);
        for p in &path.cells {
            println!("{}", p);
        }
    }
    println!("{}", grid);
}
