//! # grid_planner
//!
//! A grid-based shortest-path search system. Implements weighted
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over a 2D
//! occupancy grid; zeroing the heuristic weight degenerates the search to
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm).
//! Movement over the 8-neighborhood is governed by diagonal, corner-cutting
//! and squeeze policies, and node ranking uses a floating-point-safe
//! three-level comparator (relative-epsilon cost equality, configurable
//! tie-breaking, lexicographic position order) so results are deterministic
//! across runs.
//!
//! Searches can record a per-expansion history of the open and closed sets
//! for diagnostic consumers.

pub mod float_cmp;
pub mod frontier;
pub mod grid;
pub mod heuristic;
pub mod search;
pub mod tiebreak;

pub use frontier::{Node, NodeRecord};
pub use grid::{Cell, GridMap, Occupancy};
pub use heuristic::Heuristic;
pub use search::{AStar, SearchError, SearchOptions, SearchResult, SearchStep};
pub use tiebreak::TieBreaker;

use core::fmt;

/// An unrecognized strategy or algorithm name from the configuration layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseStrategyError {
    UnknownHeuristic(String),
    UnknownTieBreaker(String),
    UnknownAlgorithm(String),
}

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseStrategyError::UnknownHeuristic(name) => {
                write!(f, "unknown heuristic type: {name}")
            }
            ParseStrategyError::UnknownTieBreaker(name) => {
                write!(f, "unknown tie breaker: {name}")
            }
            ParseStrategyError::UnknownAlgorithm(name) => {
                write!(f, "unknown search type: {name}")
            }
        }
    }
}

impl std::error::Error for ParseStrategyError {}
