//! Value Objects
//!
//! 識別子・本文・シグナリングデータなど、不変で値として比較されるドメインの型。

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Opaque, process-unique identifier of one connection.
///
/// Assigned at connect time from a random UUID and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ClientId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ClientId {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ValueObjectError::InvalidClientId(s.to_string()))
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Chat text relayed verbatim between partners.
///
/// Any string is accepted; inbound size is bounded by the WebSocket frame
/// limit, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for MessageText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Peer-connection handshake data. Never inspected, only forwarded.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPayload(serde_json::Value);

impl SignalPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_generate_is_unique() {
        // テスト項目: 生成される ClientId は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = ClientId::generate();
        let second = ClientId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }

    #[test]
    fn test_client_id_parses_its_display_form() {
        // テスト項目: 表示形式の文字列から同じ ClientId に戻せる
        // given (前提条件):
        let client_id = ClientId::generate();

        // when (操作):
        let parsed: ClientId = client_id.to_string().parse().unwrap();

        // then (期待する結果):
        assert_eq!(parsed, client_id);
    }

    #[test]
    fn test_client_id_rejects_garbage() {
        // テスト項目: UUID でない文字列は ClientId として拒否される
        // given (前提条件):
        let raw = "not-a-client";

        // when (操作):
        let result = raw.parse::<ClientId>();

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::InvalidClientId("not-a-client".to_string()))
        );
    }

    #[test]
    fn test_client_id_serializes_as_plain_string() {
        // テスト項目: ClientId は JSON 上でただの文字列として表現される
        // given (前提条件):
        let client_id = ClientId::generate();

        // when (操作):
        let json = serde_json::to_string(&client_id).unwrap();

        // then (期待する結果):
        assert_eq!(json, format!("\"{}\"", client_id));
    }

    #[test]
    fn test_message_text_keeps_long_text() {
        // テスト項目: 長いメッセージも切り詰められずにそのまま保持される
        // given (前提条件):
        let text = "あ".repeat(5000);

        // when (操作):
        let result = MessageText::new(text.clone());

        // then (期待する結果):
        assert_eq!(result.as_str(), text);
    }

    #[test]
    fn test_message_text_keeps_whitespace_verbatim() {
        // テスト項目: 空白や改行を含むメッセージはそのまま保持される
        // given (前提条件):
        let text = "  hi\nthere  ".to_string();

        // when (操作):
        let result = MessageText::from(text.clone());

        // then (期待する結果):
        assert_eq!(result.into_string(), text);
    }
}
