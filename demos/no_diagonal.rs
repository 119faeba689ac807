use grid_planner::{AStar, Cell, GridMap, Heuristic, Occupancy, SearchOptions, TieBreaker};

fn main() {
    let mut grid = GridMap::new(10, 10, 1.0);
    for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2), (5, 0), (5, 1), (0, 5), (1, 5)] {
        grid.set(Cell::new(x, y), Occupancy::Obstacle);
    }
    let options = SearchOptions {
        allow_diagonal: false,
        ..SearchOptions::default()
    };
    let planner = AStar::new(Heuristic::Manhattan, TieBreaker::GMax, options);
    let result = planner
        .search(&grid, Cell::new(0, 0), Cell::new(7, 7), false)
        .unwrap();
    println!("{grid}");
    println!("found: {}, length: {}", result.path_found, result.path_length());
    for node in &result.path {
        print!("{} ", node.position);
    }
    println!();
}
