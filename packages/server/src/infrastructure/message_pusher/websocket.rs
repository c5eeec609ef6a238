//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ドメインの `Notice` を JSON に変換してクライアントへ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、送信キューに積むだけです。
//! 実際のソケット書き込みは接続ごとの書き込みタスクが行うため、
//! 遅い受信者が送信側の処理を止めることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ClientId, MessagePushError, MessagePusher, Notice, PusherChannel},
    infrastructure::dto::websocket::ServerEvent,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::default();
/// pusher.register_client(client_id, tx).await;
/// pusher.push_to(&client_id, &Notice::Typing).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: Arc<Mutex<HashMap<ClientId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ClientId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

/// Encode a notice as the JSON text frame the client receives.
pub fn encode_notice(notice: &Notice) -> Result<String, MessagePushError> {
    serde_json::to_string(&ServerEvent::from(notice.clone()))
        .map_err(|e| MessagePushError::Serialization(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ClientId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(client_id, sender);
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
    }

    async fn unregister_client(&self, client_id: &ClientId) {
        let mut clients = self.clients.lock().await;
        clients.remove(client_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
    }

    async fn push_to(&self, client_id: &ClientId, notice: &Notice) -> Result<(), MessagePushError> {
        let content = encode_notice(notice)?;
        let clients = self.clients.lock().await;

        let Some(sender) = clients.get(client_id) else {
            return Err(MessagePushError::ClientNotFound(client_id.to_string()));
        };
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to client '{}'", notice.kind(), client_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ClientId>,
        notice: &Notice,
    ) -> Result<(), MessagePushError> {
        let content = encode_notice(notice)?;
        let clients = self.clients.lock().await;

        for target in targets {
            let Some(sender) = clients.get(&target) else {
                // 接続直後・切断直後のクライアントは登録前後のずれで見つからないことがある
                tracing::debug!(
                    "Client '{}' not found during '{}' broadcast, skipping",
                    target,
                    notice.kind()
                );
                continue;
            };
            if let Err(e) = sender.send(content.clone()) {
                tracing::warn!("Failed to push '{}' to client '{}': {}", notice.kind(), target, e);
            }
        }

        Ok(())
    }
}
