//! MessagePusher trait 定義
//!
//! クライアントへの通知（push）のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, notice::Notice, value_object::ClientId};

/// Outbound channel of one connection; drained by that connection's writer task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Fire-and-forget delivery of notices to connected clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, client_id: &ClientId);

    /// 特定のクライアントに通知
    async fn push_to(&self, client_id: &ClientId, notice: &Notice) -> Result<(), MessagePushError>;

    /// 複数のクライアントに通知（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ClientId>,
        notice: &Notice,
    ) -> Result<(), MessagePushError>;
}
