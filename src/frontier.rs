//! The expansion record and the ordered/indexed collections holding it.
//!
//! Discovered nodes live in an insertion-ordered arena keyed by position;
//! parent links are arena indices, so the parent chain is acyclic by
//! construction as long as parents always point at earlier-discovered
//! entries with lower or equal `g`. The open set is a rank-ordered view
//! over arena indices kept in sync on every insert, improve and removal.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};

use crate::float_cmp::rank_equal;
use crate::grid::Cell;
use crate::tiebreak::TieBreaker;

pub type NodeIndex = usize;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// One discovered state of the search. `parent` is the arena index of the
/// node this one was expanded from; only the start node has none.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    pub position: Cell,
    /// Accumulated cost from the start.
    pub g: f64,
    /// Heuristic estimate of the remaining cost to the goal.
    pub h: f64,
    pub parent: Option<NodeIndex>,
}

/// Flattened node view for reporting: the parent is resolved to its
/// position so records stay meaningful outside the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
    pub position: Cell,
    pub g: f64,
    pub h: f64,
    pub parent: Option<Cell>,
}

/// Sort key of an open node. Ranks by `f = g + weight * h` with two
/// fallback levels: the configured tie-breaker when the primary keys are
/// equal within relative epsilon, then lexicographic position order. The
/// final level makes the order total over distinct positions, which the
/// ordered container requires; `Equal` is only ever produced for the same
/// position.
#[derive(Clone, Copy, Debug)]
struct RankKey {
    f: f64,
    g: f64,
    h: f64,
    position: Cell,
    index: NodeIndex,
    tie: TieBreaker,
}

impl RankKey {
    fn node_view(&self) -> Node {
        Node {
            position: self.position,
            g: self.g,
            h: self.h,
            parent: None,
        }
    }
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for RankKey {}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.position == other.position {
            return Ordering::Equal;
        }
        if !rank_equal(self.f, other.f) {
            return self.f.total_cmp(&other.f);
        }
        if self.tie.is_better(&self.node_view(), &other.node_view()) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

/// Open and closed sets over a shared node arena.
///
/// Invariants: every position appears at most once in the arena; a position
/// is in at most one of {open, closed}; closed only grows. Nodes are never
/// removed from the arena, so indices stay valid for the lifetime of the
/// search and its result.
#[derive(Clone, Debug)]
pub struct Frontier {
    nodes: FxIndexMap<Cell, Node>,
    open: BTreeSet<RankKey>,
    closed: FxIndexSet<NodeIndex>,
    weight: f64,
    tie: TieBreaker,
}

impl Frontier {
    pub fn new(weight: f64, tie: TieBreaker) -> Frontier {
        Frontier {
            nodes: FxIndexMap::default(),
            open: BTreeSet::new(),
            closed: FxIndexSet::default(),
            weight,
            tie,
        }
    }

    fn key_for(&self, index: NodeIndex, node: &Node) -> RankKey {
        RankKey {
            f: node.g + self.weight * node.h,
            g: node.g,
            h: node.h,
            position: node.position,
            index,
            tie: self.tie,
        }
    }

    /// Adds a newly discovered node to the arena and the open set. The
    /// position must not have been discovered before.
    pub fn insert(&mut self, node: Node) -> NodeIndex {
        let (index, previous) = self.nodes.insert_full(node.position, node);
        debug_assert!(previous.is_none());
        let fresh = self.open.insert(self.key_for(index, &node));
        debug_assert!(fresh);
        index
    }

    /// Rewrites `g` and `parent` of an already-open node after a cheaper
    /// path to it was found, re-ranking it in the open set. The node keeps
    /// its identity (arena index).
    pub fn improve(&mut self, index: NodeIndex, g: f64, parent: NodeIndex) {
        let node = self.nodes[index];
        debug_assert!(g < node.g);
        // Remove-then-reinsert: the sort key changes with g.
        let removed = self.open.remove(&self.key_for(index, &node));
        debug_assert!(removed);
        let node = {
            let node = &mut self.nodes[index];
            node.g = g;
            node.parent = Some(parent);
            *node
        };
        self.open.insert(self.key_for(index, &node));
    }

    /// Takes the minimal open node by rank. The node stays in the arena and
    /// is in neither set until [close](Self::close) is called for it.
    pub fn pop(&mut self) -> Option<NodeIndex> {
        self.open.pop_first().map(|key| key.index)
    }

    /// Removes a node from the open set by position.
    pub fn remove(&mut self, position: Cell) -> Option<NodeIndex> {
        let index = self.nodes.get_index_of(&position)?;
        let key = self.key_for(index, &self.nodes[index]);
        self.open.remove(&key).then_some(index)
    }

    /// Finalizes a popped node.
    pub fn close(&mut self, index: NodeIndex) {
        self.closed.insert(index);
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    /// Arena index of a discovered position, open or not.
    pub fn index_of(&self, position: Cell) -> Option<NodeIndex> {
        self.nodes.get_index_of(&position)
    }

    pub fn is_open(&self, position: Cell) -> bool {
        self.nodes
            .get_full(&position)
            .is_some_and(|(index, _, node)| self.open.contains(&self.key_for(index, node)))
    }

    pub fn is_closed(&self, position: Cell) -> bool {
        self.nodes
            .get_index_of(&position)
            .is_some_and(|index| self.closed.contains(&index))
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Total number of nodes discovered so far.
    pub fn created(&self) -> usize {
        self.nodes.len()
    }

    pub fn record(&self, index: NodeIndex) -> NodeRecord {
        let node = &self.nodes[index];
        NodeRecord {
            position: node.position,
            g: node.g,
            h: node.h,
            parent: node.parent.map(|p| self.nodes[p].position),
        }
    }

    /// Open nodes in expansion (rank) order.
    pub fn open_records(&self) -> Vec<NodeRecord> {
        self.open.iter().map(|key| self.record(key.index)).collect()
    }

    /// Closed nodes in the order they were finalized.
    pub fn closed_records(&self) -> Vec<NodeRecord> {
        self.closed.iter().map(|&index| self.record(index)).collect()
    }

    /// Walks parent references from `index` back to the start node and
    /// returns the chain in start-to-goal order.
    pub fn path_to(&self, index: NodeIndex) -> Vec<NodeRecord> {
        let mut path: Vec<NodeRecord> = itertools::unfold(Some(index), |state| {
            state.map(|ix| {
                *state = self.nodes[ix].parent;
                self.record(ix)
            })
        })
        .take(self.nodes.len())
        .collect();
        // A parent cycle would be a logic defect; the take bound above plus
        // this assert turn it into a loud failure instead of a hang.
        debug_assert!(matches!(path.last(), Some(rec) if rec.parent.is_none()));
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn node(x: u32, y: u32, g: f64, h: f64) -> Node {
        Node {
            position: Cell::new(x, y),
            g,
            h,
            parent: None,
        }
    }

    #[test]
    fn pops_in_rank_order() {
        let mut frontier = Frontier::new(1.0, TieBreaker::GMax);
        frontier.insert(node(0, 0, 3.0, 4.0));
        frontier.insert(node(1, 0, 1.0, 1.0));
        frontier.insert(node(2, 0, 2.0, 2.0));
        let mut order = Vec::new();
        while let Some(ix) = frontier.pop() {
            order.push(frontier.node(ix).position);
        }
        assert_eq!(
            order,
            vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(0, 0)]
        );
    }

    #[test]
    fn open_records_iterate_in_rank_order() {
        let mut frontier = Frontier::new(1.0, TieBreaker::GMax);
        frontier.insert(node(0, 0, 5.0, 0.0));
        frontier.insert(node(1, 1, 1.0, 1.0));
        frontier.insert(node(2, 2, 0.0, 3.0));
        let ranks: Vec<f64> = frontier.open_records().iter().map(|r| r.g + r.h).collect();
        assert_eq!(ranks, vec![2.0, 3.0, 5.0]);
    }

    #[test]
    fn improve_reranks_and_rewrites_in_place() {
        let mut frontier = Frontier::new(1.0, TieBreaker::GMax);
        let start = frontier.insert(node(0, 0, 0.0, 0.0));
        let costly = frontier.insert(node(5, 5, 10.0, 1.0));
        frontier.insert(node(1, 0, 4.0, 1.0));
        frontier.improve(costly, 2.0, start);

        let improved = frontier.node(costly);
        assert_eq!(improved.g, 2.0);
        assert_eq!(improved.parent, Some(start));
        // Identity preserved: the same position still maps to the same slot.
        assert_eq!(frontier.index_of(Cell::new(5, 5)), Some(costly));

        frontier.pop(); // start, rank 0
        let next = frontier.pop().unwrap();
        assert_eq!(frontier.node(next).position, Cell::new(5, 5));
    }

    #[test]
    fn remove_by_position() {
        let mut frontier = Frontier::new(1.0, TieBreaker::GMax);
        frontier.insert(node(0, 0, 1.0, 0.0));
        let victim = frontier.insert(node(1, 0, 0.5, 0.0));
        assert_eq!(frontier.remove(Cell::new(1, 0)), Some(victim));
        assert_eq!(frontier.remove(Cell::new(9, 9)), None);
        assert_eq!(frontier.open_len(), 1);
        assert!(!frontier.is_open(Cell::new(1, 0)));
        let popped = frontier.pop().unwrap();
        assert_eq!(frontier.node(popped).position, Cell::new(0, 0));
    }

    #[test]
    fn open_and_closed_membership_is_exclusive() {
        let mut frontier = Frontier::new(1.0, TieBreaker::GMax);
        let ix = frontier.insert(node(3, 3, 1.0, 1.0));
        assert!(frontier.is_open(Cell::new(3, 3)));
        assert!(!frontier.is_closed(Cell::new(3, 3)));
        assert_eq!(frontier.pop(), Some(ix));
        assert!(!frontier.is_open(Cell::new(3, 3)));
        assert!(!frontier.is_closed(Cell::new(3, 3)));
        frontier.close(ix);
        assert!(frontier.is_closed(Cell::new(3, 3)));
    }

    #[test]
    fn path_walks_parent_chain_back_to_start() {
        let mut frontier = Frontier::new(1.0, TieBreaker::GMax);
        let a = frontier.insert(node(0, 0, 0.0, 2.0));
        let b = frontier.insert(Node {
            parent: Some(a),
            ..node(1, 0, 1.0, 1.0)
        });
        let c = frontier.insert(Node {
            parent: Some(b),
            ..node(2, 0, 2.0, 0.0)
        });
        let path = frontier.path_to(c);
        let positions: Vec<Cell> = path.iter().map(|r| r.position).collect();
        assert_eq!(
            positions,
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]
        );
        assert_eq!(path[0].parent, None);
        assert_eq!(path[1].parent, Some(Cell::new(0, 0)));
        assert_eq!(path[2].parent, Some(Cell::new(1, 0)));
    }

    fn random_key(rng: &mut StdRng, tie: TieBreaker, magnitude: f64) -> RankKey {
        let g = rng.gen::<f64>() * magnitude;
        let h = rng.gen::<f64>() * magnitude;
        RankKey {
            f: g + h,
            g,
            h,
            position: Cell::new(rng.gen_range(0..1000), rng.gen_range(0..1000)),
            index: 0,
            tie,
        }
    }

    /// The comparator must be a strict total order over distinct positions
    /// for the ordered container to be correct, across cost regimes from
    /// tiny to huge and including exact rank collisions.
    #[test]
    fn comparator_is_a_strict_total_order() {
        let mut rng = StdRng::seed_from_u64(7);
        for tie in [TieBreaker::GMax, TieBreaker::GMin] {
            for magnitude in [1e-9, 1.0, 1e9] {
                let mut keys: Vec<RankKey> = (0..40)
                    .map(|_| random_key(&mut rng, tie, magnitude))
                    .collect();
                // Force rank collisions so the tie-break levels are exercised.
                for i in 0..10 {
                    let mut dup = keys[i];
                    dup.position = Cell::new(dup.position.x + 1000, dup.position.y);
                    dup.g = keys[i].f - dup.h;
                    dup.f = keys[i].f;
                    keys.push(dup);
                }
                for a in &keys {
                    assert_eq!(a.cmp(a), Ordering::Equal);
                    for b in &keys {
                        assert_eq!(a.cmp(b), b.cmp(a).reverse());
                        for c in &keys {
                            if a.cmp(b) == Ordering::Less && b.cmp(c) == Ordering::Less {
                                assert_eq!(a.cmp(c), Ordering::Less);
                            }
                        }
                    }
                }
            }
        }
    }
}
