//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは Lobby 集約に対する 1 回のクリティカルセクションに対応し、
//! 待機キューとペア表の更新が他の操作と交錯しないことを実装側が保証します。

use async_trait::async_trait;

use super::{
    ClientId, Departure, LobbySnapshot, RepositoryError, SeekOutcome, SessionEnd, Stats,
    Timestamp,
};

#[async_trait]
pub trait LobbyRepository: Send + Sync {
    /// 新しい接続を Idle として登録
    async fn register(
        &self,
        client_id: ClientId,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// マッチングを要求
    async fn seek(&self, client_id: &ClientId) -> Result<SeekOutcome, RepositoryError>;

    /// 現在のペアまたは待機をやめる（接続は維持）
    async fn leave(&self, client_id: &ClientId) -> Option<SessionEnd>;

    /// 切断されたクライアントを削除
    async fn remove(&self, client_id: &ClientId) -> Option<Departure>;

    /// 現在のペア相手を取得
    async fn partner_of(&self, client_id: &ClientId) -> Option<ClientId>;

    /// 統計値を取得
    async fn stats(&self) -> Stats;

    /// 統計値と、その時点で接続中の全クライアントを同時に取得
    async fn stats_with_recipients(&self) -> (Stats, Vec<ClientId>);

    /// Lobby 全体のスナップショットを取得
    async fn snapshot(&self) -> LobbySnapshot;
}
