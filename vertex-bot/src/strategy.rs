//! Strategy implementations.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use xxhash_rust::xxh64::xxh64;

use vertex_core::{Cell, GameState, Strategy};

use crate::heuristic::{evaluate, WIN_SCORE};

/// Search depth used when none is given.
pub const DEFAULT_DEPTH: u8 = 2;

/// Larger than any reachable score, small enough to negate safely.
const INFINITY: i32 = WIN_SCORE * 2;

// ========== Random ==========

/// Picks uniformly among the legal moves.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose_move(&mut self, _state: &GameState, legal_moves: &[Cell]) -> Option<Cell> {
        legal_moves.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}

// ========== Greedy ==========

/// Plays the move with the best immediate evaluation.
#[derive(Debug, Default)]
pub struct GreedyStrategy;

impl Strategy for GreedyStrategy {
    fn choose_move(&mut self, state: &GameState, legal_moves: &[Cell]) -> Option<Cell> {
        let mover = state.current_player;
        let mut best: Option<(Cell, i32)> = None;
        for &to in legal_moves {
            let score = evaluate(&state.apply_move(to), mover);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((to, score));
            }
        }
        best.map(|(to, _)| to)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

// ========== Lookahead ==========

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    depth: u8,
    score: i32,
    bound: Bound,
}

/// Fixed-depth negamax with alpha-beta pruning.
///
/// Positions are memoized by [`position_key`]. The table is cleared before
/// every decision, so walls (which never move) are left out of the key.
pub struct LookaheadStrategy {
    depth: u8,
    table: HashMap<u64, Entry>,
    nodes: u64,
}

impl LookaheadStrategy {
    pub fn new(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
            table: HashMap::new(),
            nodes: 0,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Score of `state` for the side to move, searched `depth` plies deep.
    fn negamax(&mut self, state: &GameState, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if state.is_over() {
            // the side to move has lost; sooner losses are worse
            return -WIN_SCORE - depth as i32;
        }
        if depth == 0 {
            return evaluate(state, state.current_player);
        }

        let key = position_key(state);
        if let Some(entry) = self.table.get(&key) {
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return evaluate(state, state.current_player);
        }

        let alpha_orig = alpha;
        let mut best = -INFINITY;
        for to in moves {
            let child = state.apply_move(to);
            let score = -self.negamax(&child, depth - 1, -beta, -alpha);
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.insert(
            key,
            Entry {
                depth,
                score: best,
                bound,
            },
        );
        best
    }
}

impl Default for LookaheadStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Strategy for LookaheadStrategy {
    fn choose_move(&mut self, state: &GameState, legal_moves: &[Cell]) -> Option<Cell> {
        self.table.clear();
        self.nodes = 0;

        let mut alpha = -INFINITY;
        let mut best: Option<Cell> = None;
        for &to in legal_moves {
            let child = state.apply_move(to);
            let score = -self.negamax(&child, self.depth - 1, -INFINITY, -alpha);
            if best.is_none() || score > alpha {
                alpha = score;
                best = Some(to);
            }
        }

        debug!(
            depth = self.depth,
            nodes = self.nodes,
            table = self.table.len(),
            score = alpha,
            "lookahead decided"
        );
        best
    }

    fn name(&self) -> &str {
        "lookahead"
    }
}

/// Hash of everything that decides the outcome from here on, except walls.
///
/// Vertices of one owner are interchangeable, so pieces are encoded without
/// ids and sorted before hashing.
pub fn position_key(state: &GameState) -> u64 {
    let mut pieces: Vec<[u8; 4]> = state
        .pieces
        .iter()
        .map(|p| {
            [
                p.is_vertex() as u8,
                p.owner as u8,
                p.position.row as u8,
                p.position.col as u8,
            ]
        })
        .collect();
    pieces.sort_unstable();

    let mut bytes = Vec::with_capacity(3 + pieces.len() * 4);
    bytes.push(state.board_size);
    bytes.push(state.current_player as u8);
    bytes.push(state.winner.map_or(0, |w| w as u8));
    bytes.extend(pieces.iter().flatten());
    xxh64(&bytes, 0)
}

// ========== Selection ==========

/// The built-in strategies, selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Random,
    Greedy,
    Lookahead,
}

impl StrategyKind {
    /// Construct the strategy. `seed` feeds the random strategy and `depth`
    /// the lookahead; each is ignored by the others.
    pub fn build(self, seed: u64, depth: u8) -> Box<dyn Strategy + Send> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::new(seed)),
            StrategyKind::Greedy => Box::new(GreedyStrategy),
            StrategyKind::Lookahead => Box::new(LookaheadStrategy::new(depth)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Greedy => "greedy",
            StrategyKind::Lookahead => "lookahead",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy {0:?} (expected random, greedy or lookahead)")]
pub struct ParseStrategyError(pub String);

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "easy" => Ok(StrategyKind::Random),
            "greedy" | "medium" => Ok(StrategyKind::Greedy),
            "lookahead" | "hard" => Ok(StrategyKind::Lookahead),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
