use grid_planner::{AStar, Cell, GridMap, Heuristic, Occupancy, SearchOptions, TieBreaker};

// Records the per-expansion history of the open and closed sets and prints
// how the frontier evolves over the run.
fn main() {
    let mut grid = GridMap::new(6, 6, 1.0);
    for (x, y) in [(2, 1), (2, 2), (2, 3), (2, 4)] {
        grid.set(Cell::new(x, y), Occupancy::Obstacle);
    }
    let planner = AStar::new(
        Heuristic::Diagonal,
        TieBreaker::GMax,
        SearchOptions::default(),
    );
    let result = planner
        .search(&grid, Cell::new(0, 3), Cell::new(5, 3), true)
        .unwrap();
    for (number, step) in result.history.iter().enumerate() {
        let expanded = step.closed.last().unwrap().position;
        println!(
            "step {number}: expanded {expanded}, open {} closed {}",
            step.open.len(),
            step.closed.len()
        );
    }
    println!(
        "steps: {}, nodes created: {}, length: {:.4}, elapsed: {:?}",
        result.steps(),
        result.nodes_created(),
        result.path_length(),
        result.elapsed
    );
}
