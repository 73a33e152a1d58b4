//! Starting positions and blocker generation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Blocker, Cell, ConfigError, GameState, Piece, Player};

/// Largest supported board edge.
pub const MAX_BOARD_SIZE: u8 = 26;

/// Parameters for a new game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub board_size: u8,
    pub with_blockers: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: 6,
            with_blockers: false,
        }
    }
}

impl GameConfig {
    pub fn new(board_size: u8, with_blockers: bool) -> GameConfig {
        GameConfig {
            board_size,
            with_blockers,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 2 {
            return Err(ConfigError::BoardTooSmall {
                size: self.board_size,
            });
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge {
                size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(())
    }
}

/// Build the starting position, drawing blockers (if any) from the thread RNG.
pub fn initialize(config: &GameConfig) -> Result<GameState, ConfigError> {
    initialize_with_rng(config, &mut rand::rng())
}

/// Build the starting position with an explicit random source.
///
/// - P1's box starts at `(N-1, 0)` with `N-1` top-right vertices on the rest
///   of the bottom row.
/// - P2's box starts at `(0, N-1)` with `N-1` bottom-left vertices on the rest
///   of the top row.
/// - P1 moves first.
///
/// The RNG is only consulted when `config.with_blockers` is set.
pub fn initialize_with_rng<R: Rng + ?Sized>(
    config: &GameConfig,
    rng: &mut R,
) -> Result<GameState, ConfigError> {
    config.validate()?;
    let n = config.board_size;
    let last = n as i32 - 1;

    let mut pieces = Vec::with_capacity(2 * n as usize);
    pieces.push(Piece::new_box(Player::One, Player::One.home(n)));
    pieces.push(Piece::new_box(Player::Two, Player::Two.home(n)));

    for i in 1..n {
        pieces.push(Piece::new_vertex(
            Player::One,
            i,
            Player::One.orientation(),
            Cell::new(last, i as i32),
        ));
    }
    for i in 0..n - 1 {
        pieces.push(Piece::new_vertex(
            Player::Two,
            i,
            Player::Two.orientation(),
            Cell::new(0, i as i32),
        ));
    }

    let blockers = if config.with_blockers {
        generate_blockers(n, rng)
    } else {
        Vec::new()
    };

    Ok(GameState {
        board_size: n,
        pieces,
        blockers,
        current_player: Player::One,
        winner: None,
        valid_moves: Vec::new(),
        eliminated_vertices: Vec::new(),
    })
}

/// Generate a point-symmetric set of walls around the board center.
///
/// Draws `max(1, N/3)` anchors from the central third of the board. Each
/// anchor gets a horizontal wall (against the cell below) or a vertical wall
/// (against the cell to the right) with equal probability, and every wall is
/// added together with its reflection through the center. Duplicates are
/// dropped; order follows generation so a seeded RNG gives a stable result.
pub fn generate_blockers<R: Rng + ?Sized>(board_size: u8, rng: &mut R) -> Vec<Blocker> {
    if board_size < 2 {
        return Vec::new();
    }
    let n = board_size as i32;
    let lo = n / 3;
    let hi = n - n / 3;
    let anchors = (board_size / 3).max(1);

    let mut walls: Vec<Blocker> = Vec::with_capacity(anchors as usize * 2);
    for _ in 0..anchors {
        let horizontal = rng.random_bool(0.5);
        // keep the partner cell on the board
        let (row_hi, col_hi) = if horizontal {
            (hi.min(n - 1), hi)
        } else {
            (hi, hi.min(n - 1))
        };
        let row = rng.random_range(lo..row_hi);
        let col = rng.random_range(lo..col_hi);

        let anchor = Cell::new(row, col);
        let partner = if horizontal {
            Cell::new(row + 1, col)
        } else {
            Cell::new(row, col + 1)
        };
        let wall = Blocker::new(anchor, partner);
        for w in [wall, wall.mirrored(board_size)] {
            if !walls.contains(&w) {
                walls.push(w);
            }
        }
    }
    walls
}
