use std::str::FromStr;

use crate::grid::Cell;
use crate::ParseStrategyError;

/// Estimate of the remaining cost between two cells. All four strategies are
/// non-negative and symmetric; whether a strategy is admissible depends on
/// the movement rules the search is configured with, which is the caller's
/// responsibility (e.g. Manhattan overestimates when diagonal moves are
/// allowed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// Octile distance: diagonal steps where possible, straight for the rest.
    Diagonal,
    Manhattan,
    #[default]
    Euclidean,
    Chebyshev,
}

impl Heuristic {
    pub fn estimate(&self, a: Cell, b: Cell) -> f64 {
        let dx = (a.x.max(b.x) - a.x.min(b.x)) as f64;
        let dy = (a.y.max(b.y) - a.y.min(b.y)) as f64;
        match self {
            Heuristic::Diagonal => {
                (dx.max(dy) - dx.min(dy)) + std::f64::consts::SQRT_2 * dx.min(dy)
            }
            Heuristic::Manhattan => dx + dy,
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
            Heuristic::Chebyshev => dx.max(dy),
        }
    }
}

impl FromStr for Heuristic {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diagonal" => Ok(Heuristic::Diagonal),
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" | "euclid" => Ok(Heuristic::Euclidean),
            "chebyshev" => Ok(Heuristic::Chebyshev),
            _ => Err(ParseStrategyError::UnknownHeuristic(s.to_owned())),
        }
    }
}
