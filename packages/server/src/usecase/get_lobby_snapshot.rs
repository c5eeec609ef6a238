//! UseCase: Lobby スナップショットの取得（運用者向けデバッグ表示）

use std::sync::Arc;

use crate::domain::{LobbyRepository, LobbySnapshot};

pub struct GetLobbySnapshotUseCase {
    repository: Arc<dyn LobbyRepository>,
}

impl GetLobbySnapshotUseCase {
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> LobbySnapshot {
        self.repository.snapshot().await
    }
}
