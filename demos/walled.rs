use grid_astar::{CellState, Coord, SearchOutcome, Session};

// Drives a session the way a front end would: clicks place the start, the end and a wall with a
// single gap, then every state change is printed as it happens.
//  _____
// |S    |
// |     |
// |## ##|
// |     |
// |    E|
//  _____
fn main() {
    env_logger::init();
    let mut session = Session::new(5).unwrap();
    session.paint(Coord::new(0, 0)).unwrap();
    session.paint(Coord::new(4, 4)).unwrap();
    for col in [0, 1, 3, 4] {
        session.paint(Coord::new(2, col)).unwrap();
    }
    let mut observer = |coord: Coord, state: CellState| println!("{coord} -> {state:?}");
    match session.run(&mut observer).unwrap() {
        SearchOutcome::Found(path) => {
            println!("Path of cost {} expanding {} cells", path.cost, path.expanded)
        }
        SearchOutcome::NoPath => println!("No path"),
    }
    println!("{}", session.grid);

    // Closing the gap cuts the board in two.
    session.paint(Coord::new(2, 2)).unwrap();
    let outcome = session.run(&mut |_: Coord, _: CellState| {}).unwrap();
    println!("After closing the gap: {:?}", outcome);
    println!("{}", session.grid);
}
