//! Static position evaluation.
//!
//! Scores are from one player's point of view: positive is good for that
//! player. Each side earns points for vertices already eliminated and loses
//! points for the distance its remaining vertices still have to travel, plus
//! a small penalty for how far its box is from a vertex it could push.

use vertex_core::{Cell, Direction, GameState, Piece, Player};

/// Score of a decided game.
pub const WIN_SCORE: i32 = 1_000_000;

const ELIMINATED_WEIGHT: i32 = 1_000;
const VERTEX_STEP_WEIGHT: i32 = 10;
const BOX_STEP_WEIGHT: i32 = 1;

/// Evaluate `state` for `player`.
pub fn evaluate(state: &GameState, player: Player) -> i32 {
    if let Some(winner) = state.winner {
        return if winner == player { WIN_SCORE } else { -WIN_SCORE };
    }
    side_score(state, player) - side_score(state, player.opponent())
}

fn side_score(state: &GameState, player: Player) -> i32 {
    let goal = state.goal_of(player);
    let starting = state.board_size as i32 - 1;

    let mut remaining = 0;
    let mut travel = 0;
    for vertex in state.vertices_of(player) {
        remaining += 1;
        travel += vertex.position.manhattan(goal);
    }
    let eliminated = (starting - remaining).max(0);

    let reach = state
        .box_of(player)
        .and_then(|b| nearest_push(state, b.position, player))
        .unwrap_or(0);

    eliminated * ELIMINATED_WEIGHT - travel * VERTEX_STEP_WEIGHT - reach * BOX_STEP_WEIGHT
}

/// Steps the box needs before it carries one of `player`'s vertices.
///
/// A vertex sharing the box's cell costs nothing. Otherwise the box has to
/// reach a neighbour from which it enters the vertex cell in a direction the
/// vertex permits, then take that step. Vertices with no such neighbour on
/// the board are skipped. `None` if no vertex is reachable at all.
pub fn nearest_push(state: &GameState, from: Cell, player: Player) -> Option<i32> {
    state
        .vertices_of(player)
        .filter_map(|vertex| push_distance(state.board_size, from, vertex))
        .min()
}

fn push_distance(board_size: u8, from: Cell, vertex: &Piece) -> Option<i32> {
    if vertex.position == from {
        return Some(0);
    }
    let orientation = vertex.orientation()?;
    Direction::ALL
        .iter()
        .filter(|dir| orientation.permits(**dir))
        .filter_map(|dir| {
            let (dr, dc) = dir.delta();
            let approach = Cell::new(vertex.position.row - dr, vertex.position.col - dc);
            approach
                .in_bounds(board_size)
                .then(|| from.manhattan(approach) + 1)
        })
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertex_core::{initialize, GameConfig, Orientation, PieceId};

    fn fresh() -> GameState {
        initialize(&GameConfig::default()).unwrap()
    }

    // ========== Evaluation ==========

    #[test]
    fn test_start_position_is_balanced() {
        let state = fresh();
        assert_eq!(evaluate(&state, Player::One), 0);
        assert_eq!(evaluate(&state, Player::Two), 0);
    }

    #[test]
    fn test_evaluation_is_antisymmetric() {
        let state = fresh().apply_move(Cell::new(5, 1));
        assert_eq!(evaluate(&state, Player::One), -evaluate(&state, Player::Two));
    }

    #[test]
    fn test_decided_game_scores_win() {
        let mut state = fresh();
        state.winner = Some(Player::Two);
        assert_eq!(evaluate(&state, Player::Two), WIN_SCORE);
        assert_eq!(evaluate(&state, Player::One), -WIN_SCORE);
    }

    #[test]
    fn test_elimination_outweighs_travel() {
        let mut state = fresh();
        let before = evaluate(&state, Player::One);
        state.pieces.retain(|p| p.id != PieceId::for_vertex(Player::One, 5));
        state.eliminated_vertices.push(PieceId::for_vertex(Player::One, 5));
        assert!(evaluate(&state, Player::One) > before);
    }

    #[test]
    fn test_pushing_a_vertex_up_improves_score() {
        let state = fresh();
        let entered = state.apply_move(Cell::new(5, 1));
        let reply = entered.apply_move(Cell::new(1, 5));
        let pushed = reply.apply_move(Cell::new(4, 1));
        assert!(evaluate(&pushed, Player::One) > evaluate(&reply, Player::One));
    }

    // ========== Push Distance ==========

    #[test]
    fn test_push_distance_on_shared_cell() {
        let state = fresh().apply_move(Cell::new(5, 1));
        assert_eq!(nearest_push(&state, Cell::new(5, 1), Player::One), Some(0));
    }

    #[test]
    fn test_push_distance_from_start() {
        let state = fresh();
        // box at (5,0) enters (5,1) moving right
        assert_eq!(nearest_push(&state, Cell::new(5, 0), Player::One), Some(1));
        // box at (0,5) enters (0,4) moving left
        assert_eq!(nearest_push(&state, Cell::new(0, 5), Player::Two), Some(1));
    }

    #[test]
    fn test_unreachable_vertex_is_skipped() {
        let mut state = fresh();
        state.pieces.retain(|p| p.is_box() || p.owner == Player::Two);
        // a top-right vertex in the bottom-left corner can only be entered from off the board
        state.pieces.push(Piece::new_vertex(
            Player::One,
            1,
            Orientation::TopRight,
            Cell::new(5, 0),
        ));
        assert_eq!(nearest_push(&state, Cell::new(3, 3), Player::One), None);
    }
}
