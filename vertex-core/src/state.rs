use serde::{Deserialize, Serialize};

use crate::{Blocker, Cell, Piece, PieceId, Player};

/// A full game snapshot.
///
/// Snapshots are never mutated by the rules: [`GameState::apply_move`]
/// clones what it needs and returns a new value, so an old snapshot stays
/// valid for anyone still holding it. Positions need not be unique; a box
/// and several vertices routinely share a cell.
///
/// `valid_moves` is advisory UI state. It is cleared by every applied move
/// and must be recomputed (see [`GameState::with_legal_moves`]) before it is
/// trusted again.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board_size: u8,
    pub pieces: Vec<Piece>,
    pub blockers: Vec<Blocker>,
    pub current_player: Player,
    pub winner: Option<Player>,
    #[serde(default)]
    pub valid_moves: Vec<Cell>,
    /// Ids of every vertex removed at its goal, in elimination order.
    #[serde(default)]
    pub eliminated_vertices: Vec<PieceId>,
}

impl GameState {
    /// The box owned by `player`, if it exists.
    pub fn box_of(&self, player: Player) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.is_box() && p.owner == player)
    }

    /// Vertices still on the board for `player`.
    pub fn vertices_of(&self, player: Player) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.is_vertex() && p.owner == player)
    }

    /// Every piece standing on `cell`.
    pub fn pieces_at(&self, cell: Cell) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.position == cell)
    }

    pub fn piece(&self, id: &PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| &p.id == id)
    }

    /// Goal cell for `player`'s vertices on this board.
    #[inline]
    pub fn goal_of(&self, player: Player) -> Cell {
        player.goal(self.board_size)
    }

    /// Check if a wall sits on the edge between `a` and `b`.
    pub fn is_blocked(&self, a: Cell, b: Cell) -> bool {
        self.blockers.iter().any(|w| w.separates(a, b))
    }

    /// Whether a winner has been decided. Terminal: callers must stop
    /// applying moves once this is true.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// A copy with the `valid_moves` cache filled for the current player.
    pub fn with_legal_moves(&self) -> GameState {
        GameState {
            valid_moves: self.legal_moves(),
            ..self.clone()
        }
    }

    /// A copy with the `valid_moves` cache emptied.
    pub fn without_legal_moves(&self) -> GameState {
        GameState {
            valid_moves: Vec::new(),
            ..self.clone()
        }
    }
}
