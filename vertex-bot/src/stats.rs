//! Match statistics tracking.

use std::time::Instant;

use vertex_core::Player;

use crate::arena::{GameRecord, Outcome};
use crate::strategy::StrategyKind;

/// Results collected over a match.
#[derive(Debug)]
pub struct MatchStats {
    pub p1: StrategyKind,
    pub p2: StrategyKind,

    /// Games finished (including interrupted ones)
    pub games: u64,

    pub p1_wins: u64,
    pub p2_wins: u64,

    /// Games where the side to move had nothing to play
    pub stalls: u64,

    /// Games cut off by the ply limit
    pub ply_limits: u64,

    pub interrupted: u64,

    /// Sum of plies over all games, for the average
    pub total_plies: u64,

    /// Longest game seen
    pub longest: u64,

    /// For rate calculation
    start_time: Instant,
    last_log_time: Instant,
}

impl MatchStats {
    pub fn new(p1: StrategyKind, p2: StrategyKind) -> Self {
        let now = Instant::now();
        Self {
            p1,
            p2,
            games: 0,
            p1_wins: 0,
            p2_wins: 0,
            stalls: 0,
            ply_limits: 0,
            interrupted: 0,
            total_plies: 0,
            longest: 0,
            start_time: now,
            last_log_time: now,
        }
    }

    /// Record one finished game
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_plies += game.plies as u64;
        self.longest = self.longest.max(game.plies as u64);
        match game.outcome {
            Outcome::Won(Player::One) => self.p1_wins += 1,
            Outcome::Won(Player::Two) => self.p2_wins += 1,
            Outcome::Stalled(_) => self.stalls += 1,
            Outcome::PlyLimit => self.ply_limits += 1,
            Outcome::Interrupted => self.interrupted += 1,
        }
    }

    pub fn average_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_plies as f64 / self.games as f64
        }
    }

    /// Share of games won by `player`, in percent
    pub fn win_rate(&self, player: Player) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let wins = match player {
            Player::One => self.p1_wins,
            Player::Two => self.p2_wins,
        };
        100.0 * wins as f64 / self.games as f64
    }

    /// Get current games per second
    pub fn games_per_sec(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.games as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        self.last_log_time.elapsed().as_secs() >= interval_secs
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self, total_games: u32) {
        let elapsed_total = self.start_time.elapsed().as_secs();
        println!(
            "[{:02}:{:02}:{:02}] games={}/{} p1={} p2={} stalled={} limit={} rate={:.1}/s",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.games,
            total_games,
            self.p1_wins,
            self.p2_wins,
            self.stalls,
            self.ply_limits,
            self.games_per_sec(),
        );
        self.last_log_time = Instant::now();
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("P1 ({}) vs P2 ({})", self.p1, self.p2);
        println!("Games played: {}", self.games);
        println!("  - P1 wins: {} ({:.1}%)", self.p1_wins, self.win_rate(Player::One));
        println!("  - P2 wins: {} ({:.1}%)", self.p2_wins, self.win_rate(Player::Two));
        println!("  - Stalled: {}", self.stalls);
        println!("  - Ply limit: {}", self.ply_limits);
        if self.interrupted > 0 {
            println!("  - Interrupted: {}", self.interrupted);
        }
        println!("Average length: {:.1} plies", self.average_plies());
        println!("Longest game: {} plies", self.longest);
        println!(
            "Time: {:.2}s ({:.1} games/sec)",
            self.start_time.elapsed().as_secs_f64(),
            self.games_per_sec()
        );
    }
}
