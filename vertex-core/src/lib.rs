//! Box & Vertex game rules.
//!
//! Each side owns one mobile box and `N-1` directional vertices. A turn slides
//! the mover's box one cell orthogonally; own vertices sharing the box's cell
//! are dragged along when the push direction matches their orientation. A
//! vertex that reaches its owner's goal corner is eliminated, and a side that
//! eliminates all of its vertices wins.
//!
//! # Board Layout (6×6)
//!
//! ```text
//!          col 0  1  2  3  4  5
//!   row 0      v  v  v  v  v  B     P2: box at (0,5), bottom-left vertices
//!   row 1      .  .  .  .  .  .
//!   row 2      .  .  .  .  .  .
//!   row 3      .  .  .  .  .  .
//!   row 4      .  .  .  .  .  .
//!   row 5      B  ^  ^  ^  ^  ^     P1: box at (5,0), top-right vertices
//! ```
//!
//! P1's goal is P2's home corner (0,5) and vice versa.
//!
//! # Orientation
//!
//! ```text
//!   TopRight     ──┐     walled on top and right: enter/push moving Up or Right
//!                  │
//!
//!   BottomLeft   │       walled on bottom and left: enter/push moving Down or Left
//!                └──
//! ```
//!
//! Every state is an immutable snapshot: [`GameState::apply_move`] borrows the
//! current state and returns the next one.

#[cfg(feature = "wasm")]
pub mod wasm;

mod error;
mod rules;
mod setup;
mod state;
mod strategy;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::{ConfigError, RuleError};
pub use rules::evaluate_winner;
pub use setup::{generate_blockers, initialize, initialize_with_rng, GameConfig, MAX_BOARD_SIZE};
pub use state::GameState;
pub use strategy::Strategy;

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    #[serde(rename = "P1")]
    One = 1,
    #[serde(rename = "P2")]
    Two = 2,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert from u8 (1 or 2) to Player.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Player> {
        match bits {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Corner where this player's box starts.
    pub fn home(self, board_size: u8) -> Cell {
        let last = board_size as i32 - 1;
        match self {
            Player::One => Cell::new(last, 0),
            Player::Two => Cell::new(0, last),
        }
    }

    /// Cell where this player's vertices are eliminated: the opponent's home corner.
    pub fn goal(self, board_size: u8) -> Cell {
        self.opponent().home(board_size)
    }

    /// Orientation given to every vertex this player starts with.
    pub fn orientation(self) -> Orientation {
        match self {
            Player::One => Orientation::TopRight,
            Player::Two => Orientation::BottomLeft,
        }
    }

    /// Short lowercase tag used in piece ids ("p1", "p2").
    fn tag(self) -> &'static str {
        match self {
            Player::One => "p1",
            Player::Two => "p2",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => f.write_str("P1"),
            Player::Two => f.write_str("P2"),
        }
    }
}

/// One of the four orthogonal slide directions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in move generation order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// (row, col) delta for one step.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Direction of a single orthogonal step from `from` to `to`, if it is one.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        let dr = to.row.checked_sub(from.row)?;
        let dc = to.col.checked_sub(from.col)?;
        match (dr, dc) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Fixed orientation of a vertex piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    TopRight,
    BottomLeft,
}

impl Orientation {
    /// Whether a box may enter this vertex's cell, or carry it, moving in `dir`.
    ///
    /// Move generation and pushing both go through this predicate.
    #[inline]
    pub fn permits(self, dir: Direction) -> bool {
        match self {
            Orientation::TopRight => matches!(dir, Direction::Up | Direction::Right),
            Orientation::BottomLeft => matches!(dir, Direction::Down | Direction::Left),
        }
    }
}

/// A board cell. Row grows downward, column grows rightward.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// Check if both coordinates are in `[0, board_size)`.
    #[inline]
    pub fn in_bounds(self, board_size: u8) -> bool {
        let n = board_size as i32;
        (0..n).contains(&self.row) && (0..n).contains(&self.col)
    }

    /// The neighbouring cell one step in `dir`. May be off-board.
    #[inline]
    pub fn offset(self, dir: Direction) -> Cell {
        let (dr, dc) = dir.delta();
        Cell::new(self.row + dr, self.col + dc)
    }

    /// King-move distance; 1 means touching, diagonals included.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }

    #[inline]
    pub fn manhattan(self, other: Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Point reflection through the board center.
    #[inline]
    pub fn mirrored(self, board_size: u8) -> Cell {
        let last = board_size as i32 - 1;
        Cell::new(last - self.row, last - self.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Error returned when parsing a [`Cell`] from notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell notation {0:?}: expected (row,col)")]
pub struct ParseCellError(pub String);

impl FromStr for Cell {
    type Err = ParseCellError;

    /// Accepts `(row,col)` or `row,col`, with optional whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellError(s.to_string());
        let trimmed = s.trim();
        let inner = match trimmed.strip_prefix('(') {
            Some(rest) => rest.strip_suffix(')').ok_or_else(err)?,
            None => trimmed,
        };
        let (row, col) = inner.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let col = col.trim().parse().map_err(|_| err())?;
        Ok(Cell::new(row, col))
    }
}

/// What a piece is. Only vertices carry an orientation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PieceKind {
    Box,
    Vertex { orientation: Orientation },
}

/// Stable piece identity, e.g. `box-p1` or `vertex-p2-3`. Never reused.
#[derive(Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    pub fn for_box(owner: Player) -> PieceId {
        PieceId(format!("box-{}", owner.tag()))
    }

    pub fn for_vertex(owner: Player, ordinal: u8) -> PieceId {
        PieceId(format!("vertex-{}-{}", owner.tag(), ordinal))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A piece on the board.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    #[serde(flatten)]
    pub kind: PieceKind,
    #[serde(rename = "player")]
    pub owner: Player,
    pub position: Cell,
}

impl Piece {
    pub fn new_box(owner: Player, position: Cell) -> Piece {
        Piece {
            id: PieceId::for_box(owner),
            kind: PieceKind::Box,
            owner,
            position,
        }
    }

    pub fn new_vertex(owner: Player, ordinal: u8, orientation: Orientation, position: Cell) -> Piece {
        Piece {
            id: PieceId::for_vertex(owner, ordinal),
            kind: PieceKind::Vertex { orientation },
            owner,
            position,
        }
    }

    #[inline]
    pub fn is_box(&self) -> bool {
        matches!(self.kind, PieceKind::Box)
    }

    #[inline]
    pub fn is_vertex(&self) -> bool {
        matches!(self.kind, PieceKind::Vertex { .. })
    }

    /// Orientation of a vertex; `None` for a box.
    #[inline]
    pub fn orientation(&self) -> Option<Orientation> {
        match self.kind {
            PieceKind::Box => None,
            PieceKind::Vertex { orientation } => Some(orientation),
        }
    }
}

/// A wall on the edge between two orthogonally adjacent cells.
///
/// The pair is unordered; [`Blocker::new`] stores it in canonical order so
/// that equal walls compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Blocker {
    pub from: Cell,
    pub to: Cell,
}

impl Blocker {
    pub fn new(a: Cell, b: Cell) -> Blocker {
        debug_assert_eq!(a.manhattan(b), 1, "blocker cells must be orthogonally adjacent");
        if a <= b {
            Blocker { from: a, to: b }
        } else {
            Blocker { from: b, to: a }
        }
    }

    /// Check if stepping between `a` and `b` (either way) crosses this wall.
    #[inline]
    pub fn separates(&self, a: Cell, b: Cell) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The same wall reflected through the board center.
    pub fn mirrored(&self, board_size: u8) -> Blocker {
        Blocker::new(self.from.mirrored(board_size), self.to.mirrored(board_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }

    #[test]
    fn test_player_from_bits() {
        assert_eq!(Player::from_bits(1), Some(Player::One));
        assert_eq!(Player::from_bits(2), Some(Player::Two));
        assert_eq!(Player::from_bits(0), None);
        assert_eq!(Player::from_bits(3), None);
    }

    #[test]
    fn test_home_and_goal_corners() {
        assert_eq!(Player::One.home(6), Cell::new(5, 0));
        assert_eq!(Player::Two.home(6), Cell::new(0, 5));
        assert_eq!(Player::One.goal(6), Cell::new(0, 5));
        assert_eq!(Player::Two.goal(6), Cell::new(5, 0));
    }

    #[test]
    fn test_orientation_permits() {
        assert!(Orientation::TopRight.permits(Direction::Up));
        assert!(Orientation::TopRight.permits(Direction::Right));
        assert!(!Orientation::TopRight.permits(Direction::Down));
        assert!(!Orientation::TopRight.permits(Direction::Left));

        assert!(Orientation::BottomLeft.permits(Direction::Down));
        assert!(Orientation::BottomLeft.permits(Direction::Left));
        assert!(!Orientation::BottomLeft.permits(Direction::Up));
        assert!(!Orientation::BottomLeft.permits(Direction::Right));
    }

    #[test]
    fn test_direction_between() {
        let c = Cell::new(3, 3);
        for dir in Direction::ALL {
            assert_eq!(Direction::between(c, c.offset(dir)), Some(dir));
        }
        assert_eq!(Direction::between(c, c), None);
        assert_eq!(Direction::between(c, Cell::new(4, 4)), None);
        assert_eq!(Direction::between(c, Cell::new(1, 3)), None);
        assert_eq!(Direction::between(Cell::new(5, 0), Cell::new(i32::MIN, 0)), None);
        assert_eq!(Direction::between(Cell::new(0, -1), Cell::new(0, i32::MAX)), None);
    }

    #[test]
    fn test_cell_bounds() {
        assert!(Cell::new(0, 0).in_bounds(6));
        assert!(Cell::new(5, 5).in_bounds(6));
        assert!(!Cell::new(-1, 0).in_bounds(6));
        assert!(!Cell::new(0, 6).in_bounds(6));
        assert!(!Cell::new(6, 2).in_bounds(6));
    }

    #[test]
    fn test_cell_distances() {
        let a = Cell::new(2, 2);
        assert_eq!(a.chebyshev(Cell::new(3, 3)), 1);
        assert_eq!(a.chebyshev(Cell::new(2, 4)), 2);
        assert_eq!(a.manhattan(Cell::new(3, 3)), 2);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn test_cell_mirrored() {
        assert_eq!(Cell::new(5, 0).mirrored(6), Cell::new(0, 5));
        assert_eq!(Cell::new(2, 3).mirrored(6), Cell::new(3, 2));
        assert_eq!(Cell::new(1, 4).mirrored(6).mirrored(6), Cell::new(1, 4));
    }

    #[test]
    fn test_cell_notation() {
        let cell = Cell::new(4, 0);
        assert_eq!(cell.to_string(), "(4,0)");
        assert_eq!("(4,0)".parse::<Cell>(), Ok(cell));
        assert_eq!(" ( 4 , 0 ) ".parse::<Cell>(), Ok(cell));
        assert_eq!("4,0".parse::<Cell>(), Ok(cell));
        assert!("(4;0)".parse::<Cell>().is_err());
        assert!("(4,0".parse::<Cell>().is_err());
        assert!("(a,0)".parse::<Cell>().is_err());
    }

    #[test]
    fn test_piece_ids() {
        assert_eq!(PieceId::for_box(Player::One).as_str(), "box-p1");
        assert_eq!(PieceId::for_box(Player::Two).as_str(), "box-p2");
        assert_eq!(PieceId::for_vertex(Player::One, 3).as_str(), "vertex-p1-3");
        assert_eq!(PieceId::for_vertex(Player::Two, 0).to_string(), "vertex-p2-0");
    }

    #[test]
    fn test_piece_kind_accessors() {
        let b = Piece::new_box(Player::One, Cell::new(5, 0));
        assert!(b.is_box());
        assert!(!b.is_vertex());
        assert_eq!(b.orientation(), None);

        let v = Piece::new_vertex(Player::Two, 1, Orientation::BottomLeft, Cell::new(0, 1));
        assert!(v.is_vertex());
        assert_eq!(v.orientation(), Some(Orientation::BottomLeft));
    }

    #[test]
    fn test_blocker_is_unordered() {
        let a = Cell::new(2, 2);
        let b = Cell::new(2, 3);
        assert_eq!(Blocker::new(a, b), Blocker::new(b, a));
        let wall = Blocker::new(b, a);
        assert!(wall.separates(a, b));
        assert!(wall.separates(b, a));
        assert!(!wall.separates(a, Cell::new(3, 2)));
    }

    #[test]
    fn test_blocker_mirrored() {
        let wall = Blocker::new(Cell::new(2, 2), Cell::new(3, 2));
        let mirror = wall.mirrored(6);
        assert_eq!(mirror, Blocker::new(Cell::new(3, 3), Cell::new(2, 3)));
        assert_eq!(mirror.mirrored(6), wall);
    }
}
