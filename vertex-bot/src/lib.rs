//! Computer opponents for Box & Vertex.
//!
//! Three strengths, all behind [`vertex_core::Strategy`]:
//! - [`RandomStrategy`]: uniform pick among legal moves
//! - [`GreedyStrategy`]: best one-ply [`heuristic::evaluate`] score
//! - [`LookaheadStrategy`]: negamax with alpha-beta and a transposition table
//!
//! The [`arena`] module plays strategies against each other and
//! [`MatchStats`] summarizes the results.

pub mod arena;
pub mod heuristic;
mod stats;
mod strategy;

pub use stats::MatchStats;
pub use strategy::{
    position_key, GreedyStrategy, LookaheadStrategy, ParseStrategyError, RandomStrategy,
    StrategyKind, DEFAULT_DEPTH,
};
