//! WebSocket event DTOs.
//!
//! Every frame is a JSON text frame tagged by `"type"`, with camelCase names:
//!
//! ```text
//! {"type":"seek"}
//! {"type":"signal","signal":{...},"to":"<client id>"}
//! {"type":"partnerFound","initiator":true,"partnerId":"<client id>"}
//! {"type":"stats","onlineUsers":3,"activeChats":1}
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::ClientId;

/// Client -> server events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Enter or re-enter matchmaking.
    #[serde(alias = "findPartner")]
    Seek,
    /// End the current chat or stop searching.
    Leave,
    /// Handshake passthrough to the partner.
    Signal {
        signal: serde_json::Value,
        to: ClientId,
    },
    /// Chat text for the partner.
    Message { text: String },
    /// Typing notice for the partner.
    Typing,
}

/// Server -> client events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    Connected {
        client_id: ClientId,
    },
    PartnerFound {
        initiator: bool,
        partner_id: ClientId,
    },
    Signal {
        signal: serde_json::Value,
        from: ClientId,
    },
    Message {
        text: String,
    },
    Typing,
    PartnerDisconnected,
    Stats {
        online_users: usize,
        active_chats: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_seek_and_legacy_alias() {
        // テスト項目: seek と旧名 findPartner の両方がシーク要求として解釈される
        // given (前提条件):
        let seek = r#"{"type":"seek"}"#;
        let find_partner = r#"{"type":"findPartner"}"#;

        // when (操作):
        let seek = serde_json::from_str::<ClientEvent>(seek).unwrap();
        let find_partner = serde_json::from_str::<ClientEvent>(find_partner).unwrap();

        // then (期待する結果):
        assert_eq!(seek, ClientEvent::Seek);
        assert_eq!(find_partner, ClientEvent::Seek);
    }

    #[test]
    fn test_parse_signal_keeps_payload_untouched() {
        // テスト項目: signal のペイロードは任意の JSON のまま取り出される
        // given (前提条件):
        let to = ClientId::generate();
        let raw = json!({
            "type": "signal",
            "signal": {"type": "offer", "sdp": "v=0\r\n", "nested": [1, null, true]},
            "to": to.to_string(),
        })
        .to_string();

        // when (操作):
        let event = serde_json::from_str::<ClientEvent>(&raw).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::Signal {
                signal: json!({"type": "offer", "sdp": "v=0\r\n", "nested": [1, null, true]}),
                to,
            }
        );
    }

    #[test]
    fn test_parse_signal_with_invalid_target_fails() {
        // テスト項目: 宛先が ClientId として不正な signal は解釈できない
        // given (前提条件):
        let raw = r#"{"type":"signal","signal":{},"to":"somebody"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        // テスト項目: 未知の type は解釈できない
        // given (前提条件):
        let raw = r#"{"type":"kick","target":"x"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_server_events_use_camel_case() {
        // テスト項目: サーバーイベントは camelCase のフィールド名で出力される
        // given (前提条件):
        let partner_id = ClientId::generate();
        let found = ServerEvent::PartnerFound {
            initiator: true,
            partner_id,
        };
        let stats = ServerEvent::Stats {
            online_users: 3,
            active_chats: 1,
        };

        // when (操作):
        let found = serde_json::to_value(&found).unwrap();
        let stats = serde_json::to_value(&stats).unwrap();
        let disconnected = serde_json::to_value(ServerEvent::PartnerDisconnected).unwrap();

        // then (期待する結果):
        assert_eq!(
            found,
            json!({"type": "partnerFound", "initiator": true, "partnerId": partner_id.to_string()})
        );
        assert_eq!(
            stats,
            json!({"type": "stats", "onlineUsers": 3, "activeChats": 1})
        );
        assert_eq!(disconnected, json!({"type": "partnerDisconnected"}));
    }
}
