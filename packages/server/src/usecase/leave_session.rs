//! UseCase: チャット終了・待機取り消し
//!
//! 接続は維持したまま Idle に戻ります。旧相手には切断通知を送り、旧相手は
//! 自動では待機キューに戻しません。

use std::sync::Arc;

use crate::domain::{ClientId, LobbyRepository, MessagePusher, Notice, SessionEnd};

use super::{broadcast_stats::BroadcastStatsUseCase, gate::SessionGate};

/// チャット終了のユースケース
pub struct LeaveSessionUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    broadcast_stats: Arc<BroadcastStatsUseCase>,
    gate: SessionGate,
}

impl LeaveSessionUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        broadcast_stats: Arc<BroadcastStatsUseCase>,
        gate: SessionGate,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            broadcast_stats,
            gate,
        }
    }

    /// チャット終了を実行
    ///
    /// Returns `None` for clients that are not connected. Idle clients get
    /// an unchanged `SessionEnd` and cause no broadcast.
    pub async fn execute(&self, client_id: &ClientId) -> Option<SessionEnd> {
        let pass = self.gate.enter().await;

        let end = self.repository.leave(client_id).await?;
        if !end.changed() {
            tracing::debug!("Client '{}' left while idle", client_id);
            return Some(end);
        }

        if let Some(partner) = end.partner {
            tracing::info!("Client '{}' ended chat with '{}'", client_id, partner);
            if let Err(e) = self
                .message_pusher
                .push_to(&partner, &Notice::PartnerDisconnected)
                .await
            {
                tracing::warn!("Failed to notify '{}' of departure: {}", partner, e);
            }
        } else {
            tracing::info!("Client '{}' stopped waiting", client_id);
        }

        self.broadcast_stats.execute(&pass).await;

        Some(end)
    }
}
