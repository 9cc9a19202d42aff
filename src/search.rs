// Territory search
//
// Breadth-first expansion of reachable cells up to a fixed depth. Every node
// remembers the first move of its lineage (its origin); cells reached are
// credited to that origin, weighted by depth. After each depth level the
// origin with the highest score is reported as the current decision.

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::decision::DecisionSink;
use crate::grid::Grid;
use crate::moves;
use crate::types::{Coord, Position, RelativeMove};

/// One reachable future position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    /// Hops from the start
    pub depth: u32,
    /// Move taken from the immediate parent; `None` on the root
    pub movement: Option<RelativeMove>,
    /// Move taken at depth 1; `None` on the root, inherited unchanged below it
    pub origin: Option<RelativeMove>,
    pub position: Position,
}

impl SearchNode {
    pub fn root(position: Position) -> Self {
        SearchNode {
            depth: 0,
            movement: None,
            origin: None,
            position,
        }
    }

    /// Child reached from `self` by `movement`
    pub fn child(&self, movement: RelativeMove, position: Position) -> Self {
        SearchNode {
            depth: self.depth + 1,
            movement: Some(movement),
            origin: Some(self.origin.unwrap_or(movement)),
            position,
        }
    }

    pub fn cell(&self) -> Coord {
        self.position.cell
    }
}

/// Running score per origin move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores([i64; 3]);

impl Scores {
    pub fn get(&self, origin: RelativeMove) -> i64 {
        self.0[origin.index()]
    }

    fn add(&mut self, origin: RelativeMove, depth: u32) {
        self.0[origin.index()] += i64::from(depth);
    }

    fn sub(&mut self, origin: RelativeMove, depth: u32) {
        self.0[origin.index()] -= i64::from(depth);
    }

    /// Best origin: FORWARD unless another move scores strictly higher.
    /// Candidates are visited FORWARD, STARBOARD, LARBOARD so ties keep the earlier one.
    pub fn best(&self) -> RelativeMove {
        let mut chosen = RelativeMove::Forward;
        for candidate in RelativeMove::all() {
            if self.get(candidate) > self.get(chosen) {
                chosen = candidate;
            }
        }
        chosen
    }
}

/// What evaluating a node did to the context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// Node has no origin (the root); nothing recorded
    Unscored,
    /// Cell was unexplored and is now owned by the node's origin
    New,
    /// Cell was taken over from a shallower claim of another origin
    Transferred { from: RelativeMove },
    /// Existing owner kept the cell
    Kept,
}

/// Mutable per-call search state
pub struct SearchContext<'a> {
    grid: &'a Grid,
    scores: Scores,
    explored: HashMap<Coord, SearchNode>,
}

impl<'a> SearchContext<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        SearchContext {
            grid,
            scores: Scores::default(),
            explored: HashMap::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Node currently owning `cell`, if any
    pub fn owner(&self, cell: &Coord) -> Option<&SearchNode> {
        self.explored.get(cell)
    }

    pub fn explored_count(&self) -> usize {
        self.explored.len()
    }

    /// Folds one node into the score table and the explored map.
    ///
    /// An unexplored cell is credited to the node's origin with the node's
    /// depth. A claimed cell changes hands only when the newcomer comes from a
    /// different origin and is strictly deeper; the previous owner's credit is
    /// then withdrawn. Equal-depth contests keep the current owner.
    pub fn evaluate_node(&mut self, node: &SearchNode) -> Claim {
        let Some(origin) = node.origin else {
            return Claim::Unscored;
        };

        match self.explored.entry(node.cell()) {
            Entry::Vacant(slot) => {
                self.scores.add(origin, node.depth);
                slot.insert(*node);
                Claim::New
            }
            Entry::Occupied(mut slot) => {
                let owner = *slot.get();
                match owner.origin {
                    Some(owner_origin) if owner_origin != origin && owner.depth < node.depth => {
                        self.scores.sub(owner_origin, owner.depth);
                        self.scores.add(origin, node.depth);
                        slot.insert(*node);
                        Claim::Transferred { from: owner_origin }
                    }
                    _ => Claim::Kept,
                }
            }
        }
    }

    pub fn best_move(&self) -> RelativeMove {
        self.scores.best()
    }
}

/// Children of one node: valid successors in random order
pub fn expand_node<R: Rng + ?Sized>(grid: &Grid, node: &SearchNode, rng: &mut R) -> Vec<SearchNode> {
    let mut children: Vec<SearchNode> = moves::candidates(&node.position)
        .into_iter()
        .filter(|(_, position)| grid.is_valid(&position.cell))
        .map(|(movement, position)| node.child(movement, position))
        .collect();

    // Siblings are shuffled so contested cells are not always won by the move listed first
    children.shuffle(rng);
    children
}

/// Next generation of the frontier: every node's children, parents in input order.
/// Siblings of different origins landing on the same cell are all kept.
pub fn expand_frontier<R: Rng + ?Sized>(
    grid: &Grid,
    frontier: &[SearchNode],
    rng: &mut R,
) -> Vec<SearchNode> {
    let mut next = Vec::with_capacity(frontier.len() * 3);
    for node in frontier {
        next.extend(expand_node(grid, node, rng));
    }
    next
}

/// Result of a completed search
#[derive(Debug, Clone)]
pub struct SearchSummary {
    pub scores: Scores,
    pub final_move: RelativeMove,
    pub explored_cells: usize,
    pub nodes_evaluated: usize,
}

/// Runs the territory search from `start`, emitting one decision per depth
/// from 0 through `max_depth` inclusive.
///
/// Round 0 evaluates the root, which has no origin and scores nothing.
/// Round `d` expands the frontier into depth-`d` nodes and scores them, so
/// the decision for depth `d` accounts for every node up to that depth.
/// An empty frontier simply stops contributing; decisions keep being emitted.
pub fn run_search<R: Rng + ?Sized>(
    correlation_id: &str,
    start: Position,
    grid: &Grid,
    max_depth: u32,
    rng: &mut R,
    sink: &mut dyn DecisionSink,
) -> SearchSummary {
    let mut ctx = SearchContext::new(grid);
    let mut frontier = vec![SearchNode::root(start)];
    let mut nodes_evaluated = 0;

    for depth in 0..=max_depth {
        if depth > 0 {
            frontier = expand_frontier(grid, &frontier, rng);
        }

        for node in &frontier {
            ctx.evaluate_node(node);
        }
        nodes_evaluated += frontier.len();

        let chosen = ctx.best_move();
        debug!(
            "[{}] depth {}: {} (frontier={}, scores F={} S={} L={})",
            correlation_id,
            depth,
            chosen,
            frontier.len(),
            ctx.scores.get(RelativeMove::Forward),
            ctx.scores.get(RelativeMove::Starboard),
            ctx.scores.get(RelativeMove::Larboard),
        );
        sink.emit(correlation_id, chosen, depth);
    }

    let summary = SearchSummary {
        scores: ctx.scores,
        final_move: ctx.best_move(),
        explored_cells: ctx.explored_count(),
        nodes_evaluated,
    };

    info!(
        "[{}] Search complete: {} at depth {} ({} cells explored, {} nodes)",
        correlation_id, summary.final_move, max_depth, summary.explored_cells, summary.nodes_evaluated
    );

    summary
}
