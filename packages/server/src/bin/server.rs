//! Anonymous 1:1 matchmaking and WebRTC signaling relay server.
//!
//! Pairs WebSocket clients two by two in arrival order and relays handshake
//! payloads, chat text and typing notices between the members of each pair.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin deai-server
//! cargo run --bin deai-server -- --host 0.0.0.0 --port 3000 --static-dir dist
//! ```

use std::sync::Arc;

use clap::Parser;
use deai_server::{
    config::ServerConfig,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryLobbyRepository},
    ui::{Server, ServerOptions, state::AppState},
    usecase::{
        BroadcastStatsUseCase, ConnectClientUseCase, DisconnectClientUseCase,
        GetLobbySnapshotUseCase, GetStatsUseCase, LeaveSessionUseCase, RelayUseCase,
        SeekPartnerUseCase, SessionGate,
    },
};
use deai_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(
        &[env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "tower_http"],
        &config.log_level,
    );

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory lobby)
    let repository = Arc::new(InMemoryLobbyRepository::default());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create UseCases
    let gate = SessionGate::new();
    let clock = Arc::new(SystemClock);
    let broadcast_stats = Arc::new(BroadcastStatsUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let state = AppState {
        connect_client_usecase: Arc::new(ConnectClientUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            broadcast_stats.clone(),
            gate.clone(),
            clock.clone(),
        )),
        seek_partner_usecase: Arc::new(SeekPartnerUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            broadcast_stats.clone(),
            gate.clone(),
        )),
        leave_session_usecase: Arc::new(LeaveSessionUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            broadcast_stats.clone(),
            gate.clone(),
        )),
        relay_usecase: Arc::new(RelayUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            gate.clone(),
        )),
        disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            broadcast_stats,
            gate,
            clock,
        )),
        get_stats_usecase: Arc::new(GetStatsUseCase::new(repository.clone())),
        get_lobby_snapshot_usecase: Arc::new(GetLobbySnapshotUseCase::new(repository)),
        debug_endpoints: config.debug_endpoints,
    };

    // 4. Create and run the server
    let options = ServerOptions {
        static_dir: config.static_dir,
        allowed_origins: config.allowed_origins,
    };
    if let Err(e) = Server::new(state, options)
        .run(config.host, config.port)
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
