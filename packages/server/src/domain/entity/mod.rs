//! Entities and the outcomes their operations report.

mod lobby;

pub use lobby::Lobby;

use super::value_object::{ClientId, Timestamp};

/// Where a connected client currently stands in matchmaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Connected but not seeking.
    Idle,
    /// Enqueued, seeking a partner.
    Waiting,
    /// Bound to exactly one partner.
    Paired { partner: ClientId },
}

/// Live population figures pushed to every client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub online_users: usize,
    pub active_chats: usize,
}

/// Result of a seek request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeekOutcome {
    /// The client was already in the queue; nothing changed.
    AlreadyWaiting,
    /// Nobody was waiting; the client is now at the tail of the queue.
    Queued { abandoned_partner: Option<ClientId> },
    /// The queue head was popped and paired with the client.
    ///
    /// The seeking client is the initiator, `partner` is not.
    Matched {
        partner: ClientId,
        abandoned_partner: Option<ClientId>,
    },
}

impl SeekOutcome {
    /// Former partner dropped because the client re-seeked while paired.
    pub fn abandoned_partner(&self) -> Option<ClientId> {
        match self {
            SeekOutcome::AlreadyWaiting => None,
            SeekOutcome::Queued { abandoned_partner }
            | SeekOutcome::Matched {
                abandoned_partner, ..
            } => *abandoned_partner,
        }
    }
}

/// What was unwound when a client left its pair or the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionEnd {
    /// Surviving partner, who must be told.
    pub partner: Option<ClientId>,
    /// Whether the client was taken out of the waiting queue.
    pub was_waiting: bool,
}

impl SessionEnd {
    /// `true` if pair or queue membership changed.
    pub fn changed(&self) -> bool {
        self.partner.is_some() || self.was_waiting
    }
}

/// A client removed from the lobby on disconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Departure {
    pub session: SessionEnd,
    pub connected_at: Timestamp,
}

/// One client as seen by the operator debug view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSnapshot {
    pub client_id: ClientId,
    pub state: ClientState,
    pub connected_at: Timestamp,
}

/// Point-in-time copy of the whole lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbySnapshot {
    /// Sorted by connect time, then id.
    pub clients: Vec<ClientSnapshot>,
    /// Queue order, head first.
    pub waiting: Vec<ClientId>,
    pub stats: Stats,
}
