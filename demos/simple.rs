use grid_planner::{AStar, Cell, GridMap, Heuristic, Occupancy, SearchOptions, TieBreaker};

// In this example a path is found on a grid with shape
// #####
// #S  #
// # # #
// #  E#
// #####
// S marks the start
// E marks the end
fn main() {
    let mut grid = GridMap::new(5, 5, 1.0);
    for i in 0..5 {
        grid.set(Cell::new(i, 0), Occupancy::Obstacle);
        grid.set(Cell::new(i, 4), Occupancy::Obstacle);
        grid.set(Cell::new(0, i), Occupancy::Obstacle);
        grid.set(Cell::new(4, i), Occupancy::Obstacle);
    }
    grid.set(Cell::new(2, 2), Occupancy::Obstacle);
    let planner = AStar::new(
        Heuristic::Euclidean,
        TieBreaker::GMax,
        SearchOptions::default(),
    );
    let result = planner
        .search(&grid, Cell::new(1, 1), Cell::new(3, 3), false)
        .unwrap();
    if result.path_found {
        println!("A path has been found:");
        for node in &result.path {
            println!("{} (g = {:.3})", node.position, node.g);
        }
        println!("length: {:.4}", result.path_length());
    }
}
