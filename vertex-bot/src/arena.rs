//! Self-play between strategies.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use vertex_core::{initialize_with_rng, Cell, ConfigError, GameConfig, Player, Strategy};

use crate::stats::MatchStats;
use crate::strategy::StrategyKind;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "player")]
pub enum Outcome {
    /// The player eliminated all of its vertices.
    Won(Player),
    /// The player had no legal move, or its strategy offered none.
    Stalled(Player),
    PlyLimit,
    Interrupted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayedMove {
    pub player: Player,
    pub to: Cell,
}

/// Everything that happened in one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub plies: usize,
    pub winner: Option<Player>,
    pub outcome: Outcome,
    pub moves: Vec<PlayedMove>,
}

impl GameRecord {
    /// Moves in `(row,col)` notation, space separated.
    pub fn transcript(&self) -> String {
        self.moves
            .iter()
            .map(|m| m.to.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Play one game to completion. `rng` draws the walls, if any.
pub fn play_game<R: Rng + ?Sized>(
    config: &GameConfig,
    p1: &mut dyn Strategy,
    p2: &mut dyn Strategy,
    max_plies: usize,
    rng: &mut R,
) -> Result<GameRecord, ConfigError> {
    play_until(config, p1, p2, max_plies, rng, &AtomicBool::new(true))
}

/// Like [`play_game`], but stops as soon as `running` is cleared.
pub fn play_until<R: Rng + ?Sized>(
    config: &GameConfig,
    p1: &mut dyn Strategy,
    p2: &mut dyn Strategy,
    max_plies: usize,
    rng: &mut R,
    running: &AtomicBool,
) -> Result<GameRecord, ConfigError> {
    let mut state = initialize_with_rng(config, rng)?;
    let mut moves = Vec::new();

    let outcome = loop {
        if let Some(winner) = state.winner {
            break Outcome::Won(winner);
        }
        if moves.len() >= max_plies {
            break Outcome::PlyLimit;
        }
        if !running.load(Ordering::SeqCst) {
            break Outcome::Interrupted;
        }

        let player = state.current_player;
        let legal = state.legal_moves();
        if legal.is_empty() {
            break Outcome::Stalled(player);
        }

        let strategy: &mut dyn Strategy = match player {
            Player::One => &mut *p1,
            Player::Two => &mut *p2,
        };
        let Some(to) = strategy.choose_move(&state, &legal) else {
            break Outcome::Stalled(player);
        };
        state = match state.try_apply_move(to) {
            Ok(next) => next,
            Err(e) => {
                warn!(strategy = strategy.name(), %e, "strategy offered a bad move");
                break Outcome::Stalled(player);
            }
        };
        moves.push(PlayedMove { player, to });
    };

    debug!(plies = moves.len(), ?outcome, "game finished");
    Ok(GameRecord {
        plies: moves.len(),
        winner: state.winner,
        outcome,
        moves,
    })
}

/// Settings shared by every game of a match.
#[derive(Clone, Copy, Debug)]
pub struct MatchConfig {
    pub games: u32,
    pub game: GameConfig,
    pub max_plies: usize,
    pub seed: u64,
    pub depth: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 100,
            game: GameConfig::default(),
            max_plies: 500,
            seed: 0,
            depth: crate::DEFAULT_DEPTH,
        }
    }
}

/// Play `config.games` games of `p1` against `p2` (P1 always moves first).
///
/// Game `i` is seeded with `seed + i`, so a match is reproducible. Checks
/// `running` before each move and returns early once it is cleared.
pub fn run_match(
    config: &MatchConfig,
    p1: StrategyKind,
    p2: StrategyKind,
    running: &AtomicBool,
    log_interval_secs: u64,
) -> Result<MatchStats, ConfigError> {
    config.game.validate()?;
    let mut stats = MatchStats::new(p1, p2);

    for i in 0..config.games {
        if !running.load(Ordering::SeqCst) {
            info!(played = i, "match interrupted");
            break;
        }
        let seed = config.seed.wrapping_add(i as u64);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut first = p1.build(seed, config.depth);
        let mut second = p2.build(seed ^ 0x9e37_79b9_7f4a_7c15, config.depth);

        let record = play_until(
            &config.game,
            first.as_mut(),
            second.as_mut(),
            config.max_plies,
            &mut rng,
            running,
        )?;
        debug!(game = i, outcome = ?record.outcome, moves = %record.transcript(), "game recorded");
        stats.record(&record);

        if stats.should_log(log_interval_secs) {
            stats.log_progress(config.games);
        }
    }

    Ok(stats)
}
