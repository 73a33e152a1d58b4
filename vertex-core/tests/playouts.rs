//! Random playouts
//!
//! Plays seeded random games on several board sizes, with and without
//! blockers, and checks the rule invariants after every move:
//! - legal moves stay on the board and are stable across calls
//! - turns alternate, boxes are never removed or duplicated
//! - eliminated ids are never seen again and the record only grows
//! - a decided winner is final

use std::collections::HashSet;

use rand::prelude::*;
use rand::rngs::StdRng;

use vertex_core::{initialize_with_rng, Cell, GameConfig, GameState, Player};

const MAX_PLIES: usize = 400;

fn check_invariants(before: &GameState, after: &GameState, to: Cell) {
    assert_eq!(after.current_player, before.current_player.opponent());
    assert!(after.valid_moves.is_empty());
    assert_eq!(after.blockers, before.blockers);
    assert_eq!(after.board_size, before.board_size);

    for player in [Player::One, Player::Two] {
        let boxes = after.pieces.iter().filter(|p| p.is_box() && p.owner == player).count();
        assert_eq!(boxes, 1, "{player} must keep exactly one box");
    }
    assert_eq!(after.box_of(before.current_player).unwrap().position, to);

    let ids: HashSet<_> = after.pieces.iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids.len(), after.pieces.len(), "piece ids must be unique");

    assert!(after.eliminated_vertices.starts_with(&before.eliminated_vertices));
    for gone in &after.eliminated_vertices {
        assert!(!ids.contains(gone), "{gone} came back");
    }

    for piece in &after.pieces {
        assert!(piece.position.in_bounds(after.board_size));
        // every surviving vertex keeps its orientation
        if let Some(old) = before.piece(&piece.id) {
            assert_eq!(old.kind, piece.kind);
        }
    }

    if before.winner.is_some() {
        assert_eq!(after.winner, before.winner);
    }
}

fn playout(config: GameConfig, seed: u64) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = initialize_with_rng(&config, &mut rng).unwrap();

    for _ in 0..MAX_PLIES {
        if state.is_over() {
            break;
        }
        let moves = state.legal_moves();
        assert_eq!(moves, state.legal_moves());
        for m in &moves {
            assert!(m.in_bounds(state.board_size), "off-board move {m}");
            let own_box = state.box_of(state.current_player).unwrap().position;
            let enemy_box = state.box_of(state.current_player.opponent()).unwrap().position;
            assert_eq!(own_box.manhattan(*m), 1);
            assert!(enemy_box.chebyshev(*m) > 1, "move {m} touches the enemy box");
            assert!(!state.is_blocked(own_box, *m));
        }
        if moves.is_empty() {
            break;
        }
        let to = moves[rng.random_range(0..moves.len())];
        let next = state.apply_move(to);
        check_invariants(&state, &next, to);
        state = next;
    }
    state
}

#[test]
fn test_random_playouts_default_board() {
    for seed in 0..60 {
        playout(GameConfig::default(), seed);
    }
}

#[test]
fn test_random_playouts_with_blockers() {
    for seed in 0..60 {
        playout(GameConfig::new(6, true), seed);
    }
}

#[test]
fn test_random_playouts_other_sizes() {
    for size in [2u8, 3, 4, 5, 8] {
        for seed in 0..20 {
            playout(GameConfig::new(size, seed % 2 == 0), seed);
        }
    }
}

#[test]
fn test_playouts_are_reproducible() {
    let a = playout(GameConfig::new(6, true), 1234);
    let b = playout(GameConfig::new(6, true), 1234);
    assert_eq!(a, b);
}

/// Scripted P1 march: push vertex-p1-1 up column 1 and across row 0.
#[test]
fn test_scripted_push_to_goal() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut state = initialize_with_rng(&GameConfig::default(), &mut rng).unwrap();
    // park P2's box out of the way; it only shuffles between (3,4) and (4,4)
    state
        .pieces
        .iter_mut()
        .find(|p| p.is_box() && p.owner == Player::Two)
        .unwrap()
        .position = Cell::new(3, 4);
    // clear the top row, keeping one P2 vertex off the path so P2 cannot win
    // by having none left
    state
        .pieces
        .retain(|p| p.owner == Player::One || p.is_box() || p.id.as_str() == "vertex-p2-0");
    state
        .pieces
        .iter_mut()
        .find(|p| p.id.as_str() == "vertex-p2-0")
        .unwrap()
        .position = Cell::new(2, 0);

    let p1_path = [
        Cell::new(5, 1), // enter the vertex cell moving right
        Cell::new(4, 1), // carry it up
        Cell::new(3, 1),
        Cell::new(2, 1),
        Cell::new(1, 1),
        Cell::new(0, 1),
        Cell::new(0, 2), // carry it right along the top row
        Cell::new(0, 3),
        Cell::new(0, 4),
        Cell::new(0, 5),
    ];
    let p2_shuffle = [Cell::new(4, 4), Cell::new(3, 4)];

    for (i, to) in p1_path.iter().enumerate() {
        assert_eq!(state.current_player, Player::One);
        assert!(state.is_legal(*to), "step {i}: {to} not legal");
        state = state.apply_move(*to);
        assert_eq!(state.winner, None, "step {i}: game ended early");
        if i + 1 == p1_path.len() {
            break;
        }
        let back = p2_shuffle[i % 2];
        assert!(state.is_legal(back), "p2 step {i}: {back} not legal");
        state = state.apply_move(back);
    }

    let vertex = state.pieces.iter().find(|p| p.id.as_str() == "vertex-p1-1");
    assert!(vertex.is_none());
    assert_eq!(state.eliminated_vertices.len(), 1);
    assert_eq!(state.eliminated_vertices[0].as_str(), "vertex-p1-1");
    assert_eq!(state.box_of(Player::One).unwrap().position, Cell::new(0, 5));
    assert_eq!(state.vertices_of(Player::Two).count(), 1);
}
