//! Shared fixtures for use case tests.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{ClientId, LobbyRepository, MessagePusher, Timestamp},
    infrastructure::{
        dto::websocket::ServerEvent, message_pusher::WebSocketMessagePusher,
        repository::InMemoryLobbyRepository,
    },
};

use super::{BroadcastStatsUseCase, SessionGate};

/// Real repository and pusher wired together the way the server wires them.
pub(crate) struct Harness {
    pub repository: Arc<InMemoryLobbyRepository>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
    pub gate: SessionGate,
    pub broadcast_stats: Arc<BroadcastStatsUseCase>,
}

impl Harness {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryLobbyRepository::default());
        let message_pusher = Arc::new(WebSocketMessagePusher::default());
        let broadcast_stats = Arc::new(BroadcastStatsUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        Self {
            repository,
            message_pusher,
            gate: SessionGate::new(),
            broadcast_stats,
        }
    }

    /// Registers an idle client directly, without emitting any notice.
    pub async fn connect(&self) -> TestPeer {
        let id = ClientId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        self.repository
            .register(id, Timestamp::new(1_700_000_000_000))
            .await
            .expect("fresh id registers");
        self.message_pusher.register_client(id, tx).await;
        TestPeer { id, rx }
    }

    /// Pairs two idle clients directly; `second` becomes the initiator.
    pub async fn pair(&self, first: &TestPeer, second: &TestPeer) {
        self.repository.seek(&first.id).await.expect("first seeks");
        self.repository
            .seek(&second.id)
            .await
            .expect("second seeks");
        assert_eq!(self.repository.partner_of(&first.id).await, Some(second.id));
    }
}

pub(crate) struct TestPeer {
    pub id: ClientId,
    pub rx: mpsc::UnboundedReceiver<String>,
}

impl TestPeer {
    /// Everything pushed so far, decoded.
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(json) = self.rx.try_recv() {
            events.push(serde_json::from_str(&json).expect("pushed frames are valid events"));
        }
        events
    }

    /// Everything pushed so far except stats broadcasts.
    pub fn drain_without_stats(&mut self) -> Vec<ServerEvent> {
        self.drain()
            .into_iter()
            .filter(|event| !matches!(event, ServerEvent::Stats { .. }))
            .collect()
    }
}
