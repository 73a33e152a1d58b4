use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vertex_relay::{app_state, router, spawn_room_sweeper, RelayConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RelayConfig::parse();
    if let Err(e) = config.default_game().validate() {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    let bind = config.bind;
    let state = app_state(config);
    spawn_room_sweeper(state.clone());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind).await.unwrap();
    info!("Box & Vertex relay running on http://{}", bind);
    axum::serve(listener, app).await.unwrap();
}
