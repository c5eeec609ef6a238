//! UseCase: マッチング要求
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SeekPartnerUseCase::execute() メソッド
//! - 待機キューへの追加、先頭との成立、成立通知の送信
//!
//! ### なぜこのテストが必要か
//! - ペアの片側だけが initiator になることを保証
//! - ペア中の再要求で旧相手に切断通知が届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：待機者なしでの要求（キューに入る）
//! - 正常系：待機者ありでの要求（即時成立）
//! - エッジケース：待機中の再要求、ペア中の再要求
//! - 異常系：未接続クライアントからの要求

use std::sync::Arc;

use crate::domain::{ClientId, LobbyRepository, MessagePusher, Notice, SeekOutcome};

use super::{broadcast_stats::BroadcastStatsUseCase, error::SeekError, gate::SessionGate};

/// マッチング要求のユースケース
pub struct SeekPartnerUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    broadcast_stats: Arc<BroadcastStatsUseCase>,
    gate: SessionGate,
}

impl SeekPartnerUseCase {
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

    /// マッチング要求を実行
    ///
    /// # Returns
    ///
    /// * `Ok(SeekOutcome)` - キュー投入・成立・変化なしのいずれか
    /// * `Err(SeekError)` - 未接続、または不変条件違反
    pub async fn execute(&self, client_id: &ClientId) -> Result<SeekOutcome, SeekError> {
        let pass = self.gate.enter().await;

        let outcome = self.repository.seek(client_id).await?;

        if let Some(old_partner) = outcome.abandoned_partner() {
            tracing::info!(
                "Client '{}' left partner '{}' to search again",
                client_id,
                old_partner
            );
            self.notify(&old_partner, &Notice::PartnerDisconnected).await;
        }

        match &outcome {
            SeekOutcome::AlreadyWaiting => {
                tracing::debug!("Client '{}' is already waiting", client_id);
                return Ok(outcome);
            }
            SeekOutcome::Queued { .. } => {
                tracing::info!("Client '{}' is waiting for a partner", client_id);
            }
            SeekOutcome::Matched { partner, .. } => {
                tracing::info!("Paired '{}' (initiator) with '{}'", client_id, partner);
                self.notify(
                    client_id,
                    &Notice::PartnerFound {
                        partner_id: *partner,
                        initiator: true,
                    },
                )
                .await;
                self.notify(
                    partner,
                    &Notice::PartnerFound {
                        partner_id: *client_id,
                        initiator: false,
                    },
                )
                .await;
            }
        }

        self.broadcast_stats.execute(&pass).await;

        Ok(outcome)
    }

    async fn notify(&self, client_id: &ClientId, notice: &Notice) {
        if let Err(e) = self.message_pusher.push_to(client_id, notice).await {
            tracing::warn!(
                "Failed to send {} notice to '{}': {}",
                notice.kind(),
                client_id,
                e
            );
        }
    }
}
