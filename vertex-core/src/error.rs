use crate::{Cell, Player};

/// Rejected game configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {size} is too small (minimum 2)")]
    BoardTooSmall { size: u8 },

    #[error("board size {size} is too large (maximum {max})")]
    BoardTooLarge { size: u8, max: u8 },
}

/// Why a strict move application was refused.
///
/// Only [`GameState::try_apply_move`](crate::GameState::try_apply_move)
/// produces these; the lenient path returns the state unchanged instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("game is already over: {winner} won")]
    GameOver { winner: Player },

    #[error("{player} has no box on the board")]
    NoBox { player: Player },

    #[error("illegal move to {to}")]
    IllegalMove { to: Cell },
}
