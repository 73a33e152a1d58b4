use crate::{Cell, GameState};

/// A move-choosing policy for the side to move.
///
/// Strategies only read the state and pick one of the supplied legal
/// destinations; they never apply moves themselves. Returning `None` means
/// the strategy has nothing to offer (no legal moves).
pub trait Strategy {
    fn choose_move(&mut self, state: &GameState, legal_moves: &[Cell]) -> Option<Cell>;

    /// Short name for logs and match summaries.
    fn name(&self) -> &str;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn choose_move(&mut self, state: &GameState, legal_moves: &[Cell]) -> Option<Cell> {
        (**self).choose_move(state, legal_moves)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
