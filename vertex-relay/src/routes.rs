//! HTTP and WebSocket handlers.

use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    response::Response,
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use vertex_core::{initialize, initialize_with_rng, Cell, GameConfig, GameState, Player};

use crate::error::RelayError;
use crate::models::{
    CreateRoomRequest, HealthModel, HistoryEntryModel, HistoryModel, MoveRequest, MovesModel,
    SeatModel, ServerEvent, TokenQuery,
};
use crate::room::{RoomHandle, RoomId};
use crate::AppState;

fn lookup(state: &AppState, id: &str) -> Result<RoomHandle, RelayError> {
    let id: RoomId = id.parse()?;
    state.rooms.get(&id)
}

// =============================================================================
// Rooms
// =============================================================================

pub async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<SeatModel>, RelayError> {
    let id = req.room_id.as_deref().map(str::parse::<RoomId>).transpose()?;

    let defaults = state.config.default_game();
    let config = GameConfig::new(
        req.board_size.unwrap_or(defaults.board_size),
        req.with_blockers.unwrap_or(defaults.with_blockers),
    );
    let game = match req.seed {
        Some(seed) => initialize_with_rng(&config, &mut StdRng::seed_from_u64(seed))?,
        None => initialize(&config)?,
    };

    let handle = state.rooms.create(id, game, req.opponent)?;
    let mut room = handle.lock();
    let (player, token) = room.join()?;
    Ok(Json(SeatModel {
        room_id: room.id.clone(),
        player,
        token,
        state: room.game.clone(),
    }))
}

pub async fn join_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SeatModel>, RelayError> {
    let handle = lookup(&state, &id)?;
    let mut room = handle.lock();
    let (player, token) = room.join()?;
    Ok(Json(SeatModel {
        room_id: room.id.clone(),
        player,
        token,
        state: room.game.clone(),
    }))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameState>, RelayError> {
    let handle = lookup(&state, &id)?;
    let room = handle.lock();
    Ok(Json(room.game.clone()))
}

pub async fn get_moves(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<MovesModel>, RelayError> {
    let handle = lookup(&state, &id)?;
    let room = handle.lock();
    let player = room.player_for(&query.token)?;
    Ok(Json(MovesModel {
        player,
        moves: room.legal_moves_for(player),
    }))
}

pub async fn make_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameState>, RelayError> {
    let handle = lookup(&state, &id)?;
    let (game, bot_due) = {
        let mut room = handle.lock();
        let player = room.player_for(&req.token)?;
        let game = room.play(player, Cell::new(req.row, req.col))?.clone();
        (game, room.bot_to_move())
    };

    if bot_due {
        schedule_bot(&state, handle);
    }
    Ok(Json(game))
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryModel>, RelayError> {
    let handle = lookup(&state, &id)?;
    let room = handle.lock();
    let moves: Vec<HistoryEntryModel> = room
        .history
        .iter()
        .map(|m| HistoryEntryModel {
            index: m.ply,
            player: m.player,
            notation: m.to.to_string(),
        })
        .collect();
    Ok(Json(HistoryModel {
        total_moves: moves.len(),
        moves,
    }))
}

pub async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

// =============================================================================
// Bot
// =============================================================================

/// Answer for the bot after its think time. The search runs on the blocking
/// pool since deep lookahead can take a while.
fn schedule_bot(state: &AppState, handle: RoomHandle) {
    let delay = Duration::from_millis(state.config.bot_think_ms);
    let depth = state.config.bot_depth;
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let search = tokio::task::spawn_blocking(move || {
            let mut room = handle.lock();
            match room.play_bot(depth) {
                Some(to) => debug!(room = %room.id, %to, "bot moved"),
                None if room.bot_to_move() => {
                    warn!(room = %room.id, player = %Player::Two, "bot has no move")
                }
                None => {}
            }
        });
        if let Err(e) = search.await {
            warn!(%e, "bot task failed");
        }
    });
}

// =============================================================================
// WebSocket
// =============================================================================

pub async fn subscribe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<Response, RelayError> {
    let handle = lookup(&state, &id)?;
    let (events, snapshot, room_id) = {
        let room = handle.lock();
        (room.subscribe(), room.game.clone(), room.id.clone())
    };
    Ok(ws.on_upgrade(move |socket| forward_events(socket, events, snapshot, room_id)))
}

async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> bool {
    let text = match serde_json::to_string(event) {
        Ok(text) => text,
        Err(e) => {
            warn!(%e, "failed to encode event");
            return true;
        }
    };
    socket.send(Message::Text(text.into())).await.is_ok()
}

/// Push the current state, then every room event, until either side hangs up.
async fn forward_events(
    mut socket: WebSocket,
    mut events: broadcast::Receiver<ServerEvent>,
    snapshot: GameState,
    room: RoomId,
) {
    info!(%room, "subscriber connected");
    if !send_event(&mut socket, &ServerEvent::Snapshot { state: snapshot }).await {
        return;
    }

    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // clients have nothing to say over the socket
                Some(Ok(_)) => {}
            },
            event = events.recv() => match event {
                Ok(event) => {
                    if !send_event(&mut socket, &event).await {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(%room, skipped, "subscriber lagging");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
    info!(%room, "subscriber disconnected");
}
