use core::fmt;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::frontier::{Frontier, Node, NodeRecord};
use crate::grid::{Cell, GridMap, Occupancy};
use crate::heuristic::Heuristic;
use crate::tiebreak::TieBreaker;
use crate::ParseStrategyError;

const AXIS_COST: f64 = 1.0;
const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Movement and ranking configuration of a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOptions {
    /// Weight applied to the heuristic in the rank key `g + weight * h`.
    /// 0 degenerates to Dijkstra, values above 1 trade optimality for speed.
    pub heuristic_weight: f64,
    pub allow_diagonal: bool,
    /// Whether a diagonal move may pass a single blocked flanking cell.
    pub cut_corners: bool,
    /// Whether a diagonal move may pass between two blocked flanking cells.
    pub allow_squeeze: bool,
}

impl Default for SearchOptions {
    fn default() -> SearchOptions {
        SearchOptions {
            heuristic_weight: 1.0,
            allow_diagonal: true,
            cut_corners: true,
            allow_squeeze: true,
        }
    }
}

/// Precondition violation reported by [AStar::search] before the search
/// loop starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    OutOfBounds(Cell),
    Blocked(Cell),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchError::OutOfBounds(cell) => write!(f, "cell {cell} is outside the grid"),
            SearchError::Blocked(cell) => write!(f, "cell {cell} is an obstacle"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Snapshot of the open and closed sets after one expansion.
#[derive(Clone, Debug)]
pub struct SearchStep {
    pub open: Vec<NodeRecord>,
    pub closed: Vec<NodeRecord>,
}

/// Outcome of a single search run.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub path_found: bool,
    /// Node chain from start to goal; empty when no path exists.
    pub path: Vec<NodeRecord>,
    /// Final open set in rank order.
    pub open: Vec<NodeRecord>,
    /// Final closed set in finalization order.
    pub closed: Vec<NodeRecord>,
    /// Per-expansion snapshots; populated only when history recording was
    /// requested.
    pub history: Vec<SearchStep>,
    pub elapsed: Duration,
}

impl SearchResult {
    /// Geometric length of the path: the sum of Euclidean segment lengths
    /// between consecutive path nodes, independent of the cost metric that
    /// produced the path.
    pub fn path_length(&self) -> f64 {
        self.path
            .windows(2)
            .map(|pair| Heuristic::Euclidean.estimate(pair[0].position, pair[1].position))
            .sum()
    }

    /// [path_length](Self::path_length) scaled by the map's cell size, for
    /// reporting in world units.
    pub fn scaled_path_length(&self, grid: &GridMap) -> f64 {
        self.path_length() * grid.cell_size()
    }

    /// Number of expansions performed, counting the final goal pop.
    pub fn steps(&self) -> usize {
        self.closed.len() + usize::from(self.path_found)
    }

    /// Number of nodes created over the run.
    pub fn nodes_created(&self) -> usize {
        self.closed.len() + self.open.len()
    }
}

/// Weighted A* search engine over a [GridMap]. Holds only read-only
/// strategy state, so one engine value can run any number of searches and
/// can be shared across threads together with the map.
#[derive(Clone, Copy, Debug)]
pub struct AStar {
    heuristic: Heuristic,
    tie_breaker: TieBreaker,
    options: SearchOptions,
}

impl AStar {
    pub fn new(heuristic: Heuristic, tie_breaker: TieBreaker, options: SearchOptions) -> AStar {
        AStar {
            heuristic,
            tie_breaker,
            options,
        }
    }

    /// A* with the heuristic weight zeroed out, which makes the rank key
    /// pure accumulated cost.
    pub fn dijkstra(
        heuristic: Heuristic,
        tie_breaker: TieBreaker,
        mut options: SearchOptions,
    ) -> AStar {
        options.heuristic_weight = 0.0;
        AStar::new(heuristic, tie_breaker, options)
    }

    /// Constructs an engine from a configuration-level algorithm name.
    pub fn from_name(
        name: &str,
        heuristic: Heuristic,
        tie_breaker: TieBreaker,
        options: SearchOptions,
    ) -> Result<AStar, ParseStrategyError> {
        match name {
            "astar" => Ok(AStar::new(heuristic, tie_breaker, options)),
            "dijkstra" => Ok(AStar::dijkstra(heuristic, tie_breaker, options)),
            _ => Err(ParseStrategyError::UnknownAlgorithm(name.to_owned())),
        }
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn tie_breaker(&self) -> TieBreaker {
        self.tie_breaker
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    fn validate(&self, grid: &GridMap, cell: Cell) -> Result<(), SearchError> {
        if !grid.in_bounds(cell) {
            warn!("{cell} is outside the {}x{} grid", grid.width(), grid.height());
            return Err(SearchError::OutOfBounds(cell));
        }
        if grid.occupancy(cell) == Occupancy::Obstacle {
            warn!("{cell} is an obstacle");
            return Err(SearchError::Blocked(cell));
        }
        Ok(())
    }

    /// Eligible moves from `p` with their costs, subject to the movement
    /// policies. Offsets are widened to i64 before the bounds check so a
    /// neighbor "left of" column 0 is out of bounds rather than wrapped.
    fn neighbours(&self, grid: &GridMap, p: Cell) -> SmallVec<[(Cell, f64); 8]> {
        const OFFSETS: [(i64, i64); 8] = [
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ];
        let mut eligible = SmallVec::new();
        for (dx, dy) in OFFSETS {
            let nx = p.x as i64 + dx;
            let ny = p.y as i64 + dy;
            if grid.bordered_occupancy(nx, ny, Occupancy::Obstacle) == Occupancy::Obstacle {
                continue;
            }
            let candidate = Cell::new(nx as u32, ny as u32);
            if dx == 0 || dy == 0 {
                eligible.push((candidate, AXIS_COST));
                continue;
            }
            if !self.options.allow_diagonal {
                continue;
            }
            // The two cells sharing one axis with p flank the diagonal move.
            let x_flank = grid.bordered_occupancy(nx, p.y as i64, Occupancy::Obstacle)
                == Occupancy::Obstacle;
            let y_flank = grid.bordered_occupancy(p.x as i64, ny, Occupancy::Obstacle)
                == Occupancy::Obstacle;
            if !self.options.cut_corners {
                if x_flank || y_flank {
                    continue;
                }
            } else if !self.options.allow_squeeze && x_flank && y_flank {
                continue;
            }
            eligible.push((candidate, DIAGONAL_COST));
        }
        eligible
    }

    /// Runs a single search from `start` to `goal`. A missing path is a
    /// normal outcome (`path_found = false`), not an error; errors are
    /// reserved for invalid start or goal cells. When `record_history` is
    /// set, the result carries an (open, closed) snapshot per expansion.
    pub fn search(
        &self,
        grid: &GridMap,
        start: Cell,
        goal: Cell,
        record_history: bool,
    ) -> Result<SearchResult, SearchError> {
        self.validate(grid, start)?;
        self.validate(grid, goal)?;

        let begin = Instant::now();
        let mut frontier = Frontier::new(self.options.heuristic_weight, self.tie_breaker);
        let mut history = Vec::new();
        frontier.insert(Node {
            position: start,
            g: 0.0,
            h: self.heuristic.estimate(start, goal),
            parent: None,
        });

        let mut found = None;
        while let Some(index) = frontier.pop() {
            let node = *frontier.node(index);
            if node.position == goal {
                // The parent chain already encodes the path; the goal node
                // is not closed.
                found = Some(index);
                break;
            }
            frontier.close(index);
            for (candidate, move_cost) in self.neighbours(grid, node.position) {
                if frontier.is_closed(candidate) {
                    continue;
                }
                let g = node.g + move_cost;
                match frontier.index_of(candidate) {
                    None => {
                        frontier.insert(Node {
                            position: candidate,
                            g,
                            h: self.heuristic.estimate(candidate, goal),
                            parent: Some(index),
                        });
                    }
                    Some(existing) => {
                        debug_assert!(frontier.is_open(candidate));
                        if g < frontier.node(existing).g {
                            debug!("cheaper path to {candidate}: g {g:.3}");
                            frontier.improve(existing, g, index);
                        }
                    }
                }
            }
            if record_history {
                history.push(SearchStep {
                    open: frontier.open_records(),
                    closed: frontier.closed_records(),
                });
            }
        }

        let elapsed = begin.elapsed();
        let (path_found, path) = match found {
            Some(goal_index) => (true, frontier.path_to(goal_index)),
            None => {
                warn!("open set exhausted, no path from {start} to {goal}");
                (false, Vec::new())
            }
        };
        let result = SearchResult {
            path_found,
            path,
            open: frontier.open_records(),
            closed: frontier.closed_records(),
            history,
            elapsed,
        };
        info!(
            "search {start} -> {goal}: found={} steps={} created={} in {:?}",
            result.path_found,
            result.steps(),
            frontier.created(),
            result.elapsed
        );
        Ok(result)
    }
}
