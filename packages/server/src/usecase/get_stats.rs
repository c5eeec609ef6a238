//! UseCase: 統計値の取得（HTTP 用）

use std::sync::Arc;

use crate::domain::{LobbyRepository, Stats};

pub struct GetStatsUseCase {
    repository: Arc<dyn LobbyRepository>,
}

impl GetStatsUseCase {
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Stats {
        self.repository.stats().await
    }
}
