//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetLobbySnapshotUseCase, GetStatsUseCase,
    LeaveSessionUseCase, RelayUseCase, SeekPartnerUseCase,
};

/// Use cases reachable from the handlers
pub struct AppState {
    /// ConnectClientUseCase（接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// SeekPartnerUseCase（マッチング要求のユースケース）
    pub seek_partner_usecase: Arc<SeekPartnerUseCase>,
    /// LeaveSessionUseCase（チャット終了のユースケース）
    pub leave_session_usecase: Arc<LeaveSessionUseCase>,
    /// RelayUseCase（中継のユースケース）
    pub relay_usecase: Arc<RelayUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetStatsUseCase（統計値取得のユースケース）
    pub get_stats_usecase: Arc<GetStatsUseCase>,
    /// GetLobbySnapshotUseCase（Lobby スナップショット取得のユースケース）
    pub get_lobby_snapshot_usecase: Arc<GetLobbySnapshotUseCase>,
    /// GET /debug/lobby を公開するかどうか
    pub debug_endpoints: bool,
}
