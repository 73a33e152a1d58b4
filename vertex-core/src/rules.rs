//! Move generation, move application, and win detection.

use tracing::debug;

use crate::{Cell, Direction, GameState, Piece, Player, RuleError};

/// A destination may hold at most this many boxes before it is full.
const MAX_BOXES_PER_CELL: usize = 3;

/// Decide whether `just_moved` has won: true once it has no vertices left.
pub fn evaluate_winner(pieces: &[Piece], just_moved: Player) -> Option<Player> {
    let remaining = pieces
        .iter()
        .filter(|p| p.is_vertex() && p.owner == just_moved)
        .count();
    if remaining == 0 {
        Some(just_moved)
    } else {
        None
    }
}

impl GameState {
    // ========== Move Generation ==========

    /// Destinations the current player's box may slide to.
    ///
    /// Candidates are tried in [`Direction::ALL`] order. A candidate is
    /// rejected if any of the following holds, checked in this order:
    ///
    /// 1. it is off the board;
    /// 2. the opponent's box touches it (diagonals included);
    /// 3. a wall separates it from the box;
    /// 4. any opponent piece stands on it;
    /// 5. three or more boxes already stand on it;
    /// 6. an own vertex on it forbids entry in this direction.
    ///
    /// Read-only; returns an empty list if the current player has no box.
    pub fn legal_moves(&self) -> Vec<Cell> {
        let player = self.current_player;
        let Some(own_box) = self.box_of(player) else {
            return Vec::new();
        };
        let from = own_box.position;
        let enemy_box = self.box_of(player.opponent()).map(|b| b.position);

        Direction::ALL
            .into_iter()
            .filter(|&dir| self.can_slide(player, from, dir, enemy_box))
            .map(|dir| from.offset(dir))
            .collect()
    }

    /// Check a single candidate slide against the six rejection rules.
    fn can_slide(&self, player: Player, from: Cell, dir: Direction, enemy_box: Option<Cell>) -> bool {
        let to = from.offset(dir);

        if !to.in_bounds(self.board_size) {
            return false;
        }
        if enemy_box.is_some_and(|enemy| enemy.chebyshev(to) <= 1) {
            return false;
        }
        if self.is_blocked(from, to) {
            return false;
        }

        let mut boxes = 0;
        for piece in self.pieces_at(to) {
            if piece.owner != player {
                return false;
            }
            if piece.is_box() {
                boxes += 1;
            }
        }
        if boxes >= MAX_BOXES_PER_CELL {
            return false;
        }

        // every own vertex already there has to accept a box arriving this way
        self.pieces_at(to)
            .filter_map(Piece::orientation)
            .all(|orientation| orientation.permits(dir))
    }

    /// Check if `to` is currently a legal destination.
    pub fn is_legal(&self, to: Cell) -> bool {
        self.legal_moves().contains(&to)
    }

    // ========== Move Application ==========

    /// Slide the current player's box to `to` and return the next snapshot.
    ///
    /// Own vertices sharing the box's starting cell move with it when their
    /// orientation permits the direction. Own vertices that end on the goal
    /// cell are removed and their ids appended to `eliminated_vertices`. The
    /// mover wins when none of its vertices remain. The turn passes and the
    /// `valid_moves` cache is cleared.
    ///
    /// Lenient: if the current player has no box, or `to` is not a legal
    /// destination, the state comes back unchanged. Once `winner` is set it
    /// never changes, but callers should stop applying moves at that point;
    /// use [`GameState::try_apply_move`] to have that enforced.
    pub fn apply_move(&self, to: Cell) -> GameState {
        let player = self.current_player;
        let Some(own_box) = self.box_of(player) else {
            debug!(%player, "no box to move");
            return self.clone();
        };
        let from = own_box.position;
        let box_id = &own_box.id;

        // legality first: `to` may be anywhere, and only legal moves are one step away
        let dir = match self.is_legal(to).then(|| Direction::between(from, to)) {
            Some(Some(dir)) => dir,
            _ => {
                debug!(%player, %from, %to, "rejected illegal destination");
                return self.clone();
            }
        };

        let mut pieces: Vec<Piece> = self
            .pieces
            .iter()
            .map(|piece| {
                let carried = match piece.orientation() {
                    None => &piece.id == box_id,
                    Some(orientation) => {
                        piece.owner == player && piece.position == from && orientation.permits(dir)
                    }
                };
                if carried {
                    Piece {
                        position: to,
                        ..piece.clone()
                    }
                } else {
                    piece.clone()
                }
            })
            .collect();

        let goal = self.goal_of(player);
        let mut eliminated_vertices = self.eliminated_vertices.clone();
        pieces.retain(|piece| {
            let done = piece.is_vertex() && piece.owner == player && piece.position == goal;
            if done {
                debug!(%player, id = %piece.id, "vertex eliminated");
                eliminated_vertices.push(piece.id.clone());
            }
            !done
        });

        let winner = self.winner.or_else(|| evaluate_winner(&pieces, player));
        if self.winner.is_none() {
            if let Some(winner) = winner {
                debug!(%winner, "game won");
            }
        }

        GameState {
            board_size: self.board_size,
            pieces,
            blockers: self.blockers.clone(),
            current_player: player.opponent(),
            winner,
            valid_moves: Vec::new(),
            eliminated_vertices,
        }
    }

    /// Like [`GameState::apply_move`], but report why a move was refused.
    pub fn try_apply_move(&self, to: Cell) -> Result<GameState, RuleError> {
        if let Some(winner) = self.winner {
            return Err(RuleError::GameOver { winner });
        }
        if self.box_of(self.current_player).is_none() {
            return Err(RuleError::NoBox {
                player: self.current_player,
            });
        }
        if !self.is_legal(to) {
            return Err(RuleError::IllegalMove { to });
        }
        Ok(self.apply_move(to))
    }
}
