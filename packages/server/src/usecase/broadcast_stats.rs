//! UseCase: 統計値のブロードキャスト
//!
//! 接続数・ペア数を Lobby から毎回再計算し、接続中の全クライアントへ送信します。
//! 差分による更新は行いません。

use std::sync::Arc;

use crate::domain::{LobbyRepository, MessagePusher, Notice, Stats};

use super::gate::GatePass;

/// 統計値ブロードキャストのユースケース
pub struct BroadcastStatsUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastStatsUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 統計値を再計算して全員に送信
    ///
    /// Callers hold the session gate, so broadcasts go out in the same order
    /// as the changes they describe and the last one a client receives is
    /// always current.
    pub async fn execute(&self, _pass: &GatePass<'_>) -> Stats {
        let (stats, recipients) = self.repository.stats_with_recipients().await;

        if let Err(e) = self
            .message_pusher
            .broadcast(recipients, &Notice::Stats(stats))
            .await
        {
            tracing::warn!("Failed to broadcast stats: {}", e);
        }
        tracing::debug!(
            "Broadcasted stats: {} online, {} active chats",
            stats.online_users,
            stats.active_chats
        );

        stats
    }
}
