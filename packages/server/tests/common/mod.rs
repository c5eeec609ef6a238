//! Test fixtures: an in-process server on an ephemeral port and a small
//! WebSocket client that speaks the JSON event protocol.

#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, time::Duration};

use deai_server::{
    domain::ClientId,
    infrastructure::{
        dto::{
            http::{LobbyDetailDto, StatsDto},
            websocket::{ClientEvent, ServerEvent},
        },
        message_pusher::WebSocketMessagePusher,
        repository::InMemoryLobbyRepository,
    },
    ui::{Server, ServerOptions, state::AppState},
    usecase::{
        BroadcastStatsUseCase, ConnectClientUseCase, DisconnectClientUseCase,
        GetLobbySnapshotUseCase, GetStatsUseCase, LeaveSessionUseCase, RelayUseCase,
        SeekPartnerUseCase, SessionGate,
    },
};
use deai_shared::time::SystemClock;
use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const EVENT_TIMEOUT: Duration = Duration::from_secs(3);

/// Server running inside the test process
pub struct TestServer {
    pub addr: std::net::SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start with debug endpoints enabled and no static directory
    pub async fn start() -> Self {
        Self::start_with(true, ServerOptions::default()).await
    }

    pub async fn start_with(debug_endpoints: bool, options: ServerOptions) -> Self {
        let repository = Arc::new(InMemoryLobbyRepository::default());
        let message_pusher = Arc::new(WebSocketMessagePusher::default());
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
            debug_endpoints,
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has an address");
        let server = Server::new(state, options);
        let handle = tokio::spawn(async move {
            let _ = server.serve(listener).await;
        });

        TestServer { addr, handle }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stats(&self) -> StatsDto {
        reqwest::get(self.http_url("/api/stats"))
            .await
            .expect("stats request")
            .json()
            .await
            .expect("stats body")
    }

    pub async fn lobby(&self) -> LobbyDetailDto {
        reqwest::get(self.http_url("/debug/lobby"))
            .await
            .expect("lobby request")
            .json()
            .await
            .expect("lobby body")
    }

    /// Poll the debug view until the waiting queue equals `expected`.
    pub async fn wait_for_queue(&self, expected: &[ClientId]) {
        for _ in 0..100 {
            if self.lobby().await.waiting == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("waiting queue never became {:?}", expected);
    }

    /// Poll until the server reports `online` users.
    pub async fn wait_for_online(&self, online: usize) {
        for _ in 0..100 {
            if self.stats().await.online_users == online {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("online users never reached {}", online);
    }

    /// Poll until the server reports `online` users and `chats` pairs.
    pub async fn wait_for_stats(&self, online: usize, chats: usize) {
        for _ in 0..100 {
            let stats = self.stats().await;
            if stats.online_users == online && stats.active_chats == chats {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("stats never reached {} online / {} chats", online, chats);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// WebSocket test client
pub struct TestClient {
    pub id: ClientId,
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the `connected` event.
    pub async fn connect(server: &TestServer) -> Self {
        let (ws, _response) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        let mut client = TestClient {
            id: ClientId::generate(),
            ws,
        };
        match client.next_event().await {
            ServerEvent::Connected { client_id } => client.id = client_id,
            other => panic!("expected connected as first event, got {:?}", other),
        }
        client
    }

    pub async fn send(&mut self, event: &ClientEvent) {
        let json = serde_json::to_string(event).expect("serialize event");
        self.send_raw(&json).await;
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.ws
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send");
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }

    async fn try_next_event(&mut self, timeout: Duration) -> Option<ServerEvent> {
        loop {
            let frame = tokio::time::timeout(timeout, self.ws.next()).await.ok()??;
            match frame.expect("WebSocket error") {
                Message::Text(text) => {
                    return Some(serde_json::from_str(text.as_str()).expect("valid server event"));
                }
                Message::Close(_) => return None,
                _ => continue,
            }
        }
    }

    /// Next event of any kind; panics after a timeout.
    pub async fn next_event(&mut self) -> ServerEvent {
        self.try_next_event(EVENT_TIMEOUT)
            .await
            .expect("timed out waiting for an event")
    }

    /// Next event that is not a stats broadcast.
    pub async fn next_non_stats(&mut self) -> ServerEvent {
        loop {
            match self.next_event().await {
                ServerEvent::Stats { .. } => continue,
                event => return event,
            }
        }
    }

    /// Asserts nothing but stats arrives within `window`.
    pub async fn expect_silence(&mut self, window: Duration) {
        let deadline = tokio::time::Instant::now() + window;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return;
            }
            match self.try_next_event(remaining).await {
                None | Some(ServerEvent::Stats { .. }) => {}
                Some(event) => panic!("expected no event, got {:?}", event),
            }
        }
    }

    /// Drain events until `window` passes quietly; returns the last stats seen.
    pub async fn settle_stats(&mut self, window: Duration) -> Option<(usize, usize)> {
        let mut last = None;
        while let Some(event) = self.try_next_event(window).await {
            if let ServerEvent::Stats {
                online_users,
                active_chats,
            } = event
            {
                last = Some((online_users, active_chats));
            }
        }
        last
    }
}

/// Fresh empty directory under the system temp dir
pub fn temp_static_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("deai-static-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
