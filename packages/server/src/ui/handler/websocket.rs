//! WebSocket connection handlers.
//!
//! Each connection is served by two tasks: a reader that parses inbound
//! frames and dispatches them to use cases, and a writer (`pusher_loop`) that
//! drains the connection's outbound channel into the socket. When the reader
//! ends the writer is aborted; when the writer ends the reader is asked to
//! stop between frames, so an in-flight dispatch always runs to completion.
//! Only then is the client disconnected.

use std::{future::Future, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{Stream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{ClientId, MessageText, SignalPayload},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

/// Largest inbound WebSocket message accepted, in bytes.
pub const MAX_FRAME_BYTES: usize = 1 << 20;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.max_message_size(MAX_FRAME_BYTES)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
        // チャンネルが閉じられた（切断処理済み）場合はソケットも閉じる
        let _ = sender.close().await;
    })
}

/// Read frames until the stream ends, a close frame arrives, or `stop` fires.
///
/// `stop` is only observed between frames: a handler that has started is
/// awaited to completion.
async fn read_frames<S, F, Fut>(
    client_id: ClientId,
    mut frames: S,
    mut stop: oneshot::Receiver<()>,
    mut on_event: F,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
    F: FnMut(ClientEvent) -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let frame = tokio::select! {
            biased;
            _ = &mut stop => break,
            frame = frames.next() => frame,
        };

        let msg = match frame {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error from '{}': {}", client_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientEvent>(text.as_str()) {
                Ok(event) => on_event(event).await,
                Err(e) => {
                    tracing::warn!("Ignoring unparseable frame from '{}': {}", client_id, e);
                }
            },
            Message::Binary(data) => {
                tracing::warn!(
                    "Ignoring binary frame ({} bytes) from '{}'",
                    data.len(),
                    client_id
                );
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", client_id);
                break;
            }
            _ => {}
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let client_id = match state.connect_client_usecase.execute(tx).await {
        Ok(client_id) => client_id,
        Err(e) => {
            tracing::error!("Failed to register connection: {}", e);
            return;
        }
    };

    let (sender, receiver) = socket.split();

    // Spawn a task to push notices to this client
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive events from this client
    let (stop_tx, stop_rx) = oneshot::channel();
    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(read_frames(client_id, receiver, stop_rx, move |event| {
        let state = state_clone.clone();
        async move { dispatch_event(&state, &client_id, event).await }
    }));

    let writer_finished = tokio::select! {
        _ = &mut recv_task => false,
        _ = &mut send_task => true,
    };
    if writer_finished {
        // 処理中のイベントは最後まで実行させ、切断処理より前に終わらせる
        let _ = stop_tx.send(());
        let _ = recv_task.await;
    } else {
        send_task.abort();
    }

    state.disconnect_client_usecase.execute(&client_id).await;
}

/// Route one inbound event to its use case.
async fn dispatch_event(state: &AppState, client_id: &ClientId, event: ClientEvent) {
    match event {
        ClientEvent::Seek => {
            if let Err(e) = state.seek_partner_usecase.execute(client_id).await {
                tracing::warn!("Seek from '{}' failed: {}", client_id, e);
            }
        }
        ClientEvent::Leave => {
            state.leave_session_usecase.execute(client_id).await;
        }
        ClientEvent::Signal { signal, to } => {
            state
                .relay_usecase
                .forward_signal(client_id, &to, SignalPayload::new(signal))
                .await;
        }
        ClientEvent::Message { text } => {
            state
                .relay_usecase
                .forward_message(client_id, MessageText::new(text))
                .await;
        }
        ClientEvent::Typing => {
            state.relay_usecase.forward_typing(client_id).await;
        }
    }
}
