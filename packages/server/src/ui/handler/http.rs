//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::http::{LobbyDetailDto, StatsDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current online users and active chats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    let stats = state.get_stats_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(stats.into())
}

/// Operator view of every client, the waiting queue and the stats.
///
/// Answers 404 unless debug endpoints are enabled.
pub async fn debug_lobby(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LobbyDetailDto>, StatusCode> {
    if !state.debug_endpoints {
        return Err(StatusCode::NOT_FOUND);
    }

    let snapshot = state.get_lobby_snapshot_usecase.execute().await;
    Ok(Json(snapshot.into()))
}
