use std::str::FromStr;

use crate::float_cmp::rank_equal;
use crate::frontier::Node;
use crate::grid::Cell;
use crate::ParseStrategyError;

/// Secondary ordering rule between two nodes whose primary rank keys are
/// equal. Only invoked under that contract; see the frontier comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Prefers the node with the larger accumulated cost `g`. Among ties
    /// this drives expansion deeper along the current path first, which
    /// typically means fewer re-expansions.
    #[default]
    GMax,
    /// Prefers the node with the larger heuristic estimate `h`.
    GMin,
}

/// Deterministic finalizer: lexicographically smaller `(x, y)` wins. This
/// guarantees a strict total order between distinct positions regardless of
/// how the cost-based criteria fall out.
fn finalize(a: Cell, b: Cell) -> bool {
    a < b
}

impl TieBreaker {
    /// Whether `a` should be expanded before `b`.
    pub fn is_better(&self, a: &Node, b: &Node) -> bool {
        match self {
            TieBreaker::GMax => {
                if rank_equal(a.g, b.g) {
                    finalize(a.position, b.position)
                } else {
                    a.g > b.g
                }
            }
            TieBreaker::GMin => {
                if rank_equal(a.h, b.h) {
                    finalize(a.position, b.position)
                } else {
                    a.h > b.h
                }
            }
        }
    }
}

impl FromStr for TieBreaker {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "g-max" => Ok(TieBreaker::GMax),
            "g-min" => Ok(TieBreaker::GMin),
            _ => Err(ParseStrategyError::UnknownTieBreaker(s.to_owned())),
        }
    }
}
