//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use deai_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use deai_shared::time::now_millis;

use crate::{
    domain::{UserCommand, outbound_events, parse_input},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

fn encode(event: &ClientEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            tracing::error!("Failed to serialize event: {}", e);
            None
        }
    }
}

/// Run one connection until the user quits (`Ok`) or the connection fails.
pub async fn run_client_session(
    url: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = match connect_async(url).await {
        Ok(result) => result,
        Err(tungstenite::Error::Url(e)) => {
            return Err(ClientError::InvalidUrl(format!("{} ({})", url, e)));
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to {}", url);

    let (mut write, mut read) = ws_stream.split();

    // マッチングは接続直後に開始する
    if let Some(seek) = encode(&ClientEvent::Seek)
        && let Err(e) = write.send(seek).await
    {
        tracing::warn!("Failed to send seek: {}", e);
        return Err(ClientError::ConnectionLost);
    }

    // Spawn a task to handle incoming events
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            let formatted = match message {
                Ok(Message::Text(text)) => match serde_json::from_str::<ServerEvent>(text.as_str())
                {
                    Ok(event) => MessageFormatter::format_event(&event, now_millis()),
                    Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                },
                Ok(Message::Binary(data)) => MessageFormatter::format_binary_message(data.len()),
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => continue,
            };
            print!("{}", formatted);
            redisplay_prompt();
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionLost);
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // Ctrl+C / Ctrl+D
                    read_task.abort();
                    let _ = write.close().await;
                    return Ok(());
                };
                let Some(command) = parse_input(&line) else {
                    continue;
                };

                match &command {
                    UserCommand::Quit => {
                        read_task.abort();
                        let _ = write.close().await;
                        return Ok(());
                    }
                    UserCommand::Help => {
                        print!("{}", MessageFormatter::format_help());
                        redisplay_prompt();
                    }
                    UserCommand::Unknown(other) => {
                        print!("{}", MessageFormatter::format_unknown_command(other));
                        redisplay_prompt();
                    }
                    UserCommand::Say(_) | UserCommand::Next | UserCommand::Leave => {}
                }

                for event in outbound_events(&command) {
                    let Some(message) = encode(&event) else {
                        continue;
                    };
                    if let Err(e) = write.send(message).await {
                        tracing::warn!("Failed to send event: {}", e);
                        read_task.abort();
                        return Err(ClientError::ConnectionLost);
                    }
                }
            }
        }
    }
}
