//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - ID の払い出し、Lobby への登録、送信チャンネルの登録
//!
//! ### なぜこのテストが必要か
//! - `connected` が必ず最初のイベントとして届くことを保証
//! - 接続直後の統計値が全員に配信されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規クライアントの接続
//! - 正常系：接続済みクライアントへの統計値配信

use std::sync::Arc;

use deai_shared::time::Clock;

use crate::domain::{ClientId, LobbyRepository, MessagePusher, Notice, PusherChannel, Timestamp};

use super::{broadcast_stats::BroadcastStatsUseCase, error::ConnectError, gate::SessionGate};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn LobbyRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    broadcast_stats: Arc<BroadcastStatsUseCase>,
    gate: SessionGate,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
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

    /// クライアント接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(ClientId)` - 払い出した ID
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(&self, sender: PusherChannel) -> Result<ClientId, ConnectError> {
        let client_id = ClientId::generate();
        let connected_at = Timestamp::new(self.clock.now_millis());

        let pass = self.gate.enter().await;

        // 1. 送信チャンネルを登録し、最初のイベントとして ID を通知
        // Lobby に載る前なので、他の通知がこれより先に届くことはない
        self.message_pusher
            .register_client(client_id, sender)
            .await;
        if let Err(e) = self
            .message_pusher
            .push_to(&client_id, &Notice::Connected { client_id })
            .await
        {
            tracing::warn!("Failed to send connected notice to '{}': {}", client_id, e);
        }

        // 2. Lobby に Idle として登録
        if let Err(e) = self.repository.register(client_id, connected_at).await {
            self.message_pusher.unregister_client(&client_id).await;
            return Err(e.into());
        }
        tracing::info!("Client '{}' connected", client_id);

        // 3. 統計値を全員に配信
        self.broadcast_stats.execute(&pass).await;

        Ok(client_id)
    }
}
