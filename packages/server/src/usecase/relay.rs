//! UseCase: ペア間の中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayUseCase の forward_signal / forward_message / forward_typing
//!
//! ### なぜこのテストが必要か
//! - ペアになっていない相手へのシグナル送信（なりすまし）を防ぐ
//! - ペアのいないクライアントからの中継で何も送信されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ペア相手への中継
//! - 異常系：ペア相手以外を宛先にしたシグナル
//! - 異常系：ペアのいないクライアントからのメッセージ・入力中通知

use std::sync::Arc;

use crate::domain::{ClientId, LobbyRepository, MessagePusher, MessageText, Notice, SignalPayload};

use super::gate::SessionGate;

/// 中継の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered { to: ClientId },
    Dropped,
}

/// 中継のユースケース
///
/// Payloads are forwarded as received; nothing here looks inside them.
pub struct RelayUseCase {
    repository: Arc<dyn LobbyRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    gate: SessionGate,
}

impl RelayUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        gate: SessionGate,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            gate,
        }
    }

    /// シグナルを中継
    ///
    /// Delivered only when `to` is the sender's current partner.
    pub async fn forward_signal(
        &self,
        from: &ClientId,
        to: &ClientId,
        payload: SignalPayload,
    ) -> RelayOutcome {
        let _pass = self.gate.enter().await;

        match self.repository.partner_of(from).await {
            Some(partner) if partner == *to => {
                self.deliver(
                    &partner,
                    &Notice::Signal {
                        from: *from,
                        payload,
                    },
                )
                .await
            }
            _ => {
                tracing::debug!(
                    "Dropped signal from '{}' to '{}': not paired",
                    from,
                    to
                );
                RelayOutcome::Dropped
            }
        }
    }

    /// チャットメッセージを中継
    pub async fn forward_message(&self, from: &ClientId, text: MessageText) -> RelayOutcome {
        self.forward_to_partner(from, Notice::Message { text }).await
    }

    /// 入力中通知を中継
    pub async fn forward_typing(&self, from: &ClientId) -> RelayOutcome {
        self.forward_to_partner(from, Notice::Typing).await
    }

    async fn forward_to_partner(&self, from: &ClientId, notice: Notice) -> RelayOutcome {
        let _pass = self.gate.enter().await;

        match self.repository.partner_of(from).await {
            Some(partner) => self.deliver(&partner, &notice).await,
            None => {
                tracing::debug!("Dropped {} from '{}': no partner", notice.kind(), from);
                RelayOutcome::Dropped
            }
        }
    }

    async fn deliver(&self, to: &ClientId, notice: &Notice) -> RelayOutcome {
        match self.message_pusher.push_to(to, notice).await {
            Ok(()) => RelayOutcome::Delivered { to: *to },
            Err(e) => {
                tracing::warn!("Failed to relay {} to '{}': {}", notice.kind(), to, e);
                RelayOutcome::Dropped
            }
        }
    }
}
