//! InMemory Lobby Repository 実装
//!
//! ドメイン層が定義する LobbyRepository trait の具体的な実装。
//! Lobby 集約をひとつの Mutex で保護し、各メソッドが 1 回のロックで完結します。
//! ロック中に I/O や他クライアントの待ち合わせは行いません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ClientId, Departure, Lobby, LobbyRepository, LobbySnapshot, RepositoryError, SeekOutcome,
    SessionEnd, Stats, Timestamp,
};

/// インメモリ Lobby Repository 実装
pub struct InMemoryLobbyRepository {
    lobby: Arc<Mutex<Lobby>>,
}

impl InMemoryLobbyRepository {
    pub fn new(lobby: Arc<Mutex<Lobby>>) -> Self {
        Self { lobby }
    }
}

/// Debug builds re-check the aggregate after every mutation.
fn verify(lobby: &Lobby) {
    if cfg!(debug_assertions)
        && let Err(e) = lobby.check_invariants()
    {
        tracing::error!("Lobby invariant broken: {}", e);
    }
}

impl Default for InMemoryLobbyRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Lobby::new())))
    }
}

#[async_trait]
impl LobbyRepository for InMemoryLobbyRepository {
    async fn register(
        &self,
        client_id: ClientId,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut lobby = self.lobby.lock().await;
        lobby.register(client_id, connected_at)?;
        Ok(())
    }

    async fn seek(&self, client_id: &ClientId) -> Result<SeekOutcome, RepositoryError> {
        let mut lobby = self.lobby.lock().await;
        let outcome = lobby.seek(client_id)?;
        verify(&lobby);
        Ok(outcome)
    }

    async fn leave(&self, client_id: &ClientId) -> Option<SessionEnd> {
        let mut lobby = self.lobby.lock().await;
        let end = lobby.leave(client_id);
        verify(&lobby);
        end
    }

    async fn remove(&self, client_id: &ClientId) -> Option<Departure> {
        let mut lobby = self.lobby.lock().await;
        let departure = lobby.remove(client_id);
        verify(&lobby);
        departure
    }

    async fn partner_of(&self, client_id: &ClientId) -> Option<ClientId> {
        let lobby = self.lobby.lock().await;
        lobby.partner_of(client_id)
    }

    async fn stats(&self) -> Stats {
        let lobby = self.lobby.lock().await;
        lobby.stats()
    }

    async fn stats_with_recipients(&self) -> (Stats, Vec<ClientId>) {
        let lobby = self.lobby.lock().await;
        (lobby.stats(), lobby.client_ids())
    }

    async fn snapshot(&self) -> LobbySnapshot {
        let lobby = self.lobby.lock().await;
        lobby.snapshot()
    }
}
