//! Search Scenario Tests
//!
//! End-to-end behavior of the territory search: candidate generation on a
//! small board, per-depth decisions, score growth and contested cells.
//! The sibling shuffle is random, so scenarios are run across many seeds and
//! only assert what holds for every seed.

use light_cycle_bot::decision::Decision;
use light_cycle_bot::grid::Grid;
use light_cycle_bot::moves;
use light_cycle_bot::search::{expand_node, run_search, Claim, SearchContext, SearchNode};
use light_cycle_bot::types::{Coord, Position, RelativeMove};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn heading_plus_x() -> Position {
    Position::new(Coord::new(2, 2), Coord::new(1, 2))
}

fn step(to: (i32, i32), from: (i32, i32)) -> Position {
    Position::new(Coord::new(to.0, to.1), Coord::new(from.0, from.1))
}

#[test]
fn test_open_5x5_candidates_are_all_valid() {
    let grid = Grid::new(5, 5, []);
    let [forward, starboard, larboard] = moves::candidates(&heading_plus_x());

    assert_eq!(forward.1.cell, Coord::new(3, 2));
    assert_eq!(starboard.1.cell, Coord::new(2, 3));
    assert_eq!(larboard.1.cell, Coord::new(2, 1));
    assert!(grid.is_valid(&forward.1.cell));
    assert!(grid.is_valid(&starboard.1.cell));
    assert!(grid.is_valid(&larboard.1.cell));
}

#[test]
fn test_open_5x5_depth_one_ties_resolve_to_forward() {
    let grid = Grid::new(5, 5, []);

    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut decisions: Vec<Decision> = Vec::new();
        let summary = run_search("open", heading_plus_x(), &grid, 1, &mut rng, &mut decisions);

        assert_eq!(summary.scores.get(RelativeMove::Forward), 1);
        assert_eq!(summary.scores.get(RelativeMove::Starboard), 1);
        assert_eq!(summary.scores.get(RelativeMove::Larboard), 1);

        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[0].depth, 0);
        assert_eq!(decisions[0].chosen_move, RelativeMove::Forward);
        assert_eq!(decisions[1].depth, 1);
        assert_eq!(decisions[1].chosen_move, RelativeMove::Forward);
        assert!(decisions.iter().all(|d| d.correlation_id == "open"));
    }
}

#[test]
fn test_blocked_forward_is_never_chosen_at_depth_one() {
    let grid = Grid::new(5, 5, [Coord::new(3, 2)]);

    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut decisions: Vec<Decision> = Vec::new();
        let summary = run_search("blocked", heading_plus_x(), &grid, 1, &mut rng, &mut decisions);

        assert_eq!(summary.scores.get(RelativeMove::Forward), 0);
        assert_eq!(summary.scores.get(RelativeMove::Starboard), 1);
        assert_eq!(summary.scores.get(RelativeMove::Larboard), 1);
        assert_ne!(decisions[1].chosen_move, RelativeMove::Forward);
    }
}

#[test]
fn test_corridor_score_strictly_increases_with_depth() {
    // One-row board: only FORWARD ever stays on the grid
    let grid = Grid::new(12, 1, []);
    let start = step((0, 0), (-1, 0));

    let mut previous = 0;
    for max_depth in 1..=10u32 {
        let mut rng = StdRng::seed_from_u64(u64::from(max_depth));
        let mut decisions: Vec<Decision> = Vec::new();
        let summary = run_search("corridor", start, &grid, max_depth, &mut rng, &mut decisions);

        let score = summary.scores.get(RelativeMove::Forward);
        assert!(score > previous, "depth {}: {} <= {}", max_depth, score, previous);
        assert_eq!(summary.scores.get(RelativeMove::Starboard), 0);
        assert_eq!(summary.scores.get(RelativeMove::Larboard), 0);
        assert_eq!(decisions.last().unwrap().chosen_move, RelativeMove::Forward);
        previous = score;
    }

    // Sum of depths 1..=10
    assert_eq!(previous, 55);
}

#[test]
fn test_decisions_are_emitted_for_every_depth_even_when_trapped() {
    // Heading +x into the right wall with the whole right column filled
    let grid = Grid::new(3, 3, [Coord::new(2, 0), Coord::new(2, 2), Coord::new(2, 1)]);
    let start = step((2, 1), (1, 1));
    let mut rng = StdRng::seed_from_u64(11);
    let mut decisions: Vec<Decision> = Vec::new();

    let summary = run_search("trapped", start, &grid, 4, &mut rng, &mut decisions);

    assert_eq!(
        decisions.iter().map(|d| d.depth).collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4]
    );
    assert!(decisions.iter().all(|d| d.chosen_move == RelativeMove::Forward));
    assert_eq!(summary.explored_cells, 0);
}

#[test]
fn test_shallow_claim_is_transferred_to_deeper_origin() {
    let grid = Grid::new(5, 5, []);
    let mut ctx = SearchContext::new(&grid);

    let root = SearchNode::root(heading_plus_x());
    let forward = root.child(RelativeMove::Forward, step((3, 2), (2, 2)));
    let starboard = root.child(RelativeMove::Starboard, step((2, 3), (2, 2)));
    // STARBOARD lineage swings back up and reaches (3,2) at depth 3
    let starboard_2 = starboard.child(RelativeMove::Larboard, step((3, 3), (2, 3)));
    let starboard_3 = starboard_2.child(RelativeMove::Larboard, step((3, 2), (3, 3)));

    assert_eq!(ctx.evaluate_node(&forward), Claim::New);
    assert_eq!(ctx.evaluate_node(&starboard), Claim::New);
    assert_eq!(
        ctx.evaluate_node(&starboard_3),
        Claim::Transferred { from: RelativeMove::Forward }
    );

    assert_eq!(starboard_3.origin, Some(RelativeMove::Starboard));
    assert_eq!(ctx.scores().get(RelativeMove::Forward), 0);
    assert_eq!(ctx.scores().get(RelativeMove::Starboard), 1 + 3);
    let owner = ctx.owner(&Coord::new(3, 2)).unwrap();
    assert_eq!(owner.depth, 3);
    assert_eq!(owner.origin, Some(RelativeMove::Starboard));
}

#[test]
fn test_equal_depth_contest_keeps_first_owner() {
    let grid = Grid::new(5, 5, []);
    let mut ctx = SearchContext::new(&grid);

    let root = SearchNode::root(heading_plus_x());
    let forward = root.child(RelativeMove::Forward, step((3, 2), (2, 2)));
    let starboard = root.child(RelativeMove::Starboard, step((2, 3), (2, 2)));
    // Both lineages reach (3,3) at depth 2
    let via_forward = forward.child(RelativeMove::Starboard, step((3, 3), (3, 2)));
    let via_starboard = starboard.child(RelativeMove::Larboard, step((3, 3), (2, 3)));

    ctx.evaluate_node(&forward);
    ctx.evaluate_node(&starboard);
    assert_eq!(ctx.evaluate_node(&via_forward), Claim::New);
    assert_eq!(ctx.evaluate_node(&via_starboard), Claim::Kept);

    assert_eq!(ctx.scores().get(RelativeMove::Forward), 1 + 2);
    assert_eq!(ctx.scores().get(RelativeMove::Starboard), 1);
    assert_eq!(
        ctx.owner(&Coord::new(3, 3)).unwrap().origin,
        Some(RelativeMove::Forward)
    );
}

#[test]
fn test_origin_matches_depth_one_ancestor_over_long_runs() {
    let grid = Grid::new(8, 8, [Coord::new(4, 4), Coord::new(1, 6)]);
    let mut rng = StdRng::seed_from_u64(2024);
    let root = SearchNode::root(step((3, 3), (3, 2)));

    // Walk each depth-1 branch down its first surviving child to depth 6
    for first in expand_node(&grid, &root, &mut rng) {
        assert_eq!(first.origin, first.movement);
        let mut node = first;
        while node.depth < 6 {
            match expand_node(&grid, &node, &mut rng).first() {
                Some(child) => node = *child,
                None => break,
            }
            assert_eq!(node.origin, first.movement);
        }
    }
}
