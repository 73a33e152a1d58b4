//! JSON request, response, and event bodies.

use serde::{Deserialize, Serialize};

use vertex_bot::StrategyKind;
use vertex_core::{Cell, GameState, Player};

use crate::room::RoomId;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRoomRequest {
    pub room_id: Option<String>,
    pub board_size: Option<u8>,
    pub with_blockers: Option<bool>,
    pub seed: Option<u64>,
    /// Seat a computer opponent as P2
    pub opponent: Option<StrategyKind>,
}

/// A claimed seat. The token authorizes moves for `player`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatModel {
    pub room_id: RoomId,
    pub player: Player,
    pub token: String,
    pub state: GameState,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub token: String,
    pub row: i32,
    pub col: i32,
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MovesModel {
    pub player: Player,
    pub moves: Vec<Cell>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntryModel {
    pub index: usize,
    pub player: Player,
    pub notation: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryModel {
    pub moves: Vec<HistoryEntryModel>,
    pub total_moves: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthModel {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorModel {
    pub detail: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LastMove {
    pub player: Player,
    pub to: Cell,
}

/// Pushed to every WebSocket subscriber of a room.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Sent once to a new subscriber.
    Snapshot { state: GameState },
    GameStart { state: GameState },
    GameUpdate {
        state: GameState,
        #[serde(rename = "lastMove")]
        last_move: LastMove,
    },
    PlayerJoined { player: Player },
}
