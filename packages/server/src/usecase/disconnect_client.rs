//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 待機キュー・ペア表・接続一覧からの削除と、相手への通知
//!
//! ### なぜこのテストが必要か
//! - 切断後に状態が残らないことを保証
//! - 残された相手に切断通知がちょうど 1 回届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ペア中・待機中・Idle での切断
//! - エッジケース：同じクライアントの二重切断

use std::sync::Arc;

use deai_shared::time::Clock;

use crate::domain::{ClientId, Departure, LobbyRepository, MessagePusher, Notice};

use super::{broadcast_stats::BroadcastStatsUseCase, gate::SessionGate};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    broadcast_stats: Arc<BroadcastStatsUseCase>,
    gate: SessionGate,
    clock: Arc<dyn Clock>,
}

impl DisconnectClientUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        broadcast_stats: Arc<BroadcastStatsUseCase>,
        gate: SessionGate,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            broadcast_stats,
            gate,
            clock,
        }
    }

    /// クライアント切断を実行
    ///
    /// A second call for the same client returns `None` and sends nothing.
    pub async fn execute(&self, client_id: &ClientId) -> Option<Departure> {
        let pass = self.gate.enter().await;

        // 1. Lobby から削除（ペア・待機キューも同時に解除）
        let Some(departure) = self.repository.remove(client_id).await else {
            self.message_pusher.unregister_client(client_id).await;
            tracing::debug!("Client '{}' was already gone", client_id);
            return None;
        };

        // 2. 残された相手に通知
        if let Some(partner) = departure.session.partner {
            if let Err(e) = self
                .message_pusher
                .push_to(&partner, &Notice::PartnerDisconnected)
                .await
            {
                tracing::warn!("Failed to notify '{}' of disconnect: {}", partner, e);
            }
        }

        // 3. 送信チャンネルを登録解除
        self.message_pusher.unregister_client(client_id).await;

        let elapsed_secs =
            (self.clock.now_millis() - departure.connected_at.value()).max(0) / 1000;
        tracing::info!(
            "Client '{}' disconnected after {}s (partner: {:?}, was waiting: {})",
            client_id,
            elapsed_secs,
            departure.session.partner.map(|p| p.to_string()),
            departure.session.was_waiting
        );

        // 4. 統計値を全員に配信
        self.broadcast_stats.execute(&pass).await;

        Some(departure)
    }
}
