//! Box & Vertex room relay
//!
//! Holds games in memory, seats two players per room, checks every move with
//! `vertex-core`, and fans each change out to the room's WebSocket
//! subscribers. A room may seat a `vertex-bot` strategy as P2 instead of a
//! second player.
//!
//! Nothing survives a restart.

pub mod config;
pub mod error;
pub mod models;
pub mod room;
mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use config::RelayConfig;
pub use error::RelayError;
pub use room::{Room, RoomId, Rooms};

/// Shared application state
pub struct AppStateInner {
    pub rooms: Rooms,
    pub config: RelayConfig,
}

pub type AppState = Arc<AppStateInner>;

pub fn app_state(config: RelayConfig) -> AppState {
    Arc::new(AppStateInner {
        rooms: Rooms::new(config.max_rooms, config.room_ttl()),
        config,
    })
}

/// How often finished and idle rooms are looked for.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Reclaim finished and idle rooms in the background.
pub fn spawn_room_sweeper(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            state.rooms.sweep();
        }
    })
}

fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match frontend_url.map(str::parse::<HeaderValue>) {
        Some(Ok(origin)) => cors.allow_origin(origin),
        Some(Err(e)) => {
            warn!(%e, "ignoring unusable FRONTEND_URL, allowing any origin");
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config.frontend_url.as_deref());

    Router::new()
        .route("/rooms", post(routes::create_room))
        .route("/rooms/{id}", get(routes::get_room))
        .route("/rooms/{id}/join", post(routes::join_room))
        .route("/rooms/{id}/moves", get(routes::get_moves))
        .route("/rooms/{id}/move", post(routes::make_move))
        .route("/rooms/{id}/history", get(routes::get_history))
        .route("/rooms/{id}/ws", get(routes::subscribe))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
