use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use vertex_bot::DEFAULT_DEPTH;
use vertex_core::GameConfig;

/// Relay settings. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "vertex-relay", about = "Room relay for Box & Vertex")]
pub struct RelayConfig {
    /// Address to listen on
    #[arg(long, env = "RELAY_BIND", default_value = "0.0.0.0:3001")]
    pub bind: SocketAddr,

    /// Only this origin may call the relay from a browser (any origin if unset)
    #[arg(long, env = "FRONTEND_URL")]
    pub frontend_url: Option<String>,

    /// Board size for rooms that don't ask for one
    #[arg(long, env = "RELAY_BOARD_SIZE", default_value_t = 6)]
    pub board_size: u8,

    /// Place walls in rooms that don't say otherwise
    #[arg(long, env = "RELAY_BLOCKERS")]
    pub blockers: bool,

    /// Delay before a bot answers, in milliseconds
    #[arg(long, env = "RELAY_BOT_THINK_MS", default_value_t = 800)]
    pub bot_think_ms: u64,

    /// Search depth for lookahead bots
    #[arg(long, env = "RELAY_BOT_DEPTH", default_value_t = DEFAULT_DEPTH)]
    pub bot_depth: u8,

    /// Refuse to open rooms beyond this many
    #[arg(long, env = "RELAY_MAX_ROOMS", default_value_t = 1024)]
    pub max_rooms: usize,

    /// Close rooms nobody has joined or moved in for this long, in seconds
    #[arg(long, env = "RELAY_ROOM_TTL_SECS", default_value_t = 3600)]
    pub room_ttl_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3001)),
            frontend_url: None,
            board_size: 6,
            blockers: false,
            bot_think_ms: 800,
            bot_depth: DEFAULT_DEPTH,
            max_rooms: 1024,
            room_ttl_secs: 3600,
        }
    }
}

impl RelayConfig {
    /// Game settings for a room that overrides nothing.
    pub fn default_game(&self) -> GameConfig {
        GameConfig::new(self.board_size, self.blockers)
    }

    pub fn room_ttl(&self) -> Duration {
        Duration::from_secs(self.room_ttl_secs)
    }
}
