//! Conversion logic between domain types and DTOs.

use deai_shared::time::millis_to_rfc3339;

use crate::domain::{ClientSnapshot, ClientState, LobbySnapshot, Notice, Stats};
use crate::infrastructure::dto::{
    http::{ClientDetailDto, LobbyDetailDto, StatsDto},
    websocket::ServerEvent,
};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<Notice> for ServerEvent {
    fn from(notice: Notice) -> Self {
        match notice {
            Notice::Connected { client_id } => ServerEvent::Connected { client_id },
            Notice::PartnerFound {
                partner_id,
                initiator,
            } => ServerEvent::PartnerFound {
                initiator,
                partner_id,
            },
            Notice::Signal { from, payload } => ServerEvent::Signal {
                signal: payload.into_inner(),
                from,
            },
            Notice::Message { text } => ServerEvent::Message {
                text: text.into_string(),
            },
            Notice::Typing => ServerEvent::Typing,
            Notice::PartnerDisconnected => ServerEvent::PartnerDisconnected,
            Notice::Stats(stats) => ServerEvent::Stats {
                online_users: stats.online_users,
                active_chats: stats.active_chats,
            },
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<Stats> for StatsDto {
    fn from(stats: Stats) -> Self {
        Self {
            online_users: stats.online_users,
            active_chats: stats.active_chats,
        }
    }
}

impl From<ClientSnapshot> for ClientDetailDto {
    fn from(client: ClientSnapshot) -> Self {
        let (state, partner_id) = match client.state {
            ClientState::Idle => ("idle", None),
            ClientState::Waiting => ("waiting", None),
            ClientState::Paired { partner } => ("paired", Some(partner)),
        };
        Self {
            client_id: client.client_id,
            state: state.to_string(),
            partner_id,
            connected_at: millis_to_rfc3339(client.connected_at.value()),
        }
    }
}

impl From<LobbySnapshot> for LobbyDetailDto {
    fn from(snapshot: LobbySnapshot) -> Self {
        Self {
            clients: snapshot.clients.into_iter().map(Into::into).collect(),
            waiting: snapshot.waiting,
            stats: snapshot.stats.into(),
        }
    }
}
