//! Message formatting utilities for client display.

use deai_server::infrastructure::dto::websocket::ServerEvent;
use deai_shared::time::millis_to_clock_time;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any server event received at `received_at` (Unix millis).
    pub fn format_event(event: &ServerEvent, received_at: i64) -> String {
        match event {
            ServerEvent::Connected { client_id } => Self::format_connected(&client_id.to_string()),
            ServerEvent::PartnerFound {
                initiator,
                partner_id,
            } => Self::format_partner_found(&partner_id.to_string(), *initiator),
            ServerEvent::Message { text } => Self::format_partner_message(text, received_at),
            ServerEvent::Typing => Self::format_typing(),
            ServerEvent::PartnerDisconnected => Self::format_partner_disconnected(),
            ServerEvent::Stats {
                online_users,
                active_chats,
            } => Self::format_stats(*online_users, *active_chats),
            ServerEvent::Signal { from, .. } => {
                format!("\n(handshake data from {} ignored: text chat only)\n", from)
            }
        }
    }

    pub fn format_connected(client_id: &str) -> String {
        format!(
            "\nConnected as {}. Looking for a stranger...\n\
             Commands: /next, /leave, /quit, /help\n",
            client_id
        )
    }

    pub fn format_partner_found(partner_id: &str, initiator: bool) -> String {
        let role = if initiator { " (you start)" } else { "" };
        format!(
            "\n\n============================================================\n\
             You are now chatting with a stranger {}{}\n\
             ============================================================\n",
            partner_id, role
        )
    }

    pub fn format_partner_message(text: &str, received_at: i64) -> String {
        format!(
            "\n[{}] stranger: {}\n",
            millis_to_clock_time(received_at),
            text
        )
    }

    pub fn format_typing() -> String {
        "\n(stranger is typing...)\n".to_string()
    }

    pub fn format_partner_disconnected() -> String {
        "\n- Stranger has disconnected. Type /next to find someone new.\n".to_string()
    }

    pub fn format_stats(online_users: usize, active_chats: usize) -> String {
        format!(
            "\n* {} online, {} active chats\n",
            online_users, active_chats
        )
    }

    pub fn format_raw_message(text: &str) -> String {
        format!("\n{}\n", text)
    }

    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\nReceived binary data: {} bytes\n", byte_count)
    }

    pub fn format_help() -> String {
        "\n/next   leave the current stranger and find another\n\
         /leave  end the chat or stop searching\n\
         /quit   exit\n"
            .to_string()
    }

    pub fn format_unknown_command(command: &str) -> String {
        format!("\nUnknown command: {} (try /help)\n", command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deai_server::domain::ClientId;

    #[test]
    fn test_format_partner_found_marks_initiator() {
        // テスト項目: initiator の場合だけ開始側であることが表示される
        // given (前提条件):
        let partner_id = "partner-1";

        // when (操作):
        let initiator = MessageFormatter::format_partner_found(partner_id, true);
        let responder = MessageFormatter::format_partner_found(partner_id, false);

        // then (期待する結果):
        assert!(initiator.contains("partner-1 (you start)"));
        assert!(responder.contains("partner-1\n"));
        assert!(!responder.contains("(you start)"));
    }

    #[test]
    fn test_format_partner_message() {
        // テスト項目: 相手のメッセージがそのまま表示される
        // given (前提条件):
        let text = "hello <b>world</b>";

        // when (操作):
        let result = MessageFormatter::format_partner_message(text, 0);

        // then (期待する結果):
        assert!(result.contains("stranger: hello <b>world</b>"));
    }

    #[test]
    fn test_format_stats() {
        // テスト項目: 統計値が表示される
        // given (前提条件):
        let event = ServerEvent::Stats {
            online_users: 5,
            active_chats: 2,
        };

        // when (操作):
        let result = MessageFormatter::format_event(&event, 0);

        // then (期待する結果):
        assert_eq!(result, "\n* 5 online, 2 active chats\n");
    }

    #[test]
    fn test_format_connected_shows_id() {
        // テスト項目: 接続時に自分の ID が表示される
        // given (前提条件):
        let client_id = ClientId::generate();
        let event = ServerEvent::Connected { client_id };

        // when (操作):
        let result = MessageFormatter::format_event(&event, 0);

        // then (期待する結果):
        assert!(result.contains(&client_id.to_string()));
    }

    #[test]
    fn test_format_partner_disconnected_hints_next() {
        // テスト項目: 相手の切断時に /next の案内が表示される
        // given (前提条件):
        let event = ServerEvent::PartnerDisconnected;

        // when (操作):
        let result = MessageFormatter::format_event(&event, 0);

        // then (期待する結果):
        assert!(result.contains("/next"));
    }
}
