//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::ClientId;

/// `GET /api/stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub online_users: usize,
    pub active_chats: usize,
}

/// One client in `GET /debug/lobby`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetailDto {
    pub client_id: ClientId,
    /// `idle`, `waiting` or `paired`
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<ClientId>,
    /// RFC 3339, UTC
    pub connected_at: String,
}

/// `GET /debug/lobby`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyDetailDto {
    pub clients: Vec<ClientDetailDto>,
    /// Queue order, head first
    pub waiting: Vec<ClientId>,
    pub stats: StatsDto,
}
