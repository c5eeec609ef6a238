//! UseCase layer: one use case per inbound event or query.

pub mod broadcast_stats;
pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod gate;
pub mod get_lobby_snapshot;
pub mod get_stats;
pub mod leave_session;
pub mod relay;
pub mod seek_partner;

#[cfg(test)]
mod test_support;

pub use broadcast_stats::BroadcastStatsUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, SeekError};
pub use gate::{GatePass, SessionGate};
pub use get_lobby_snapshot::GetLobbySnapshotUseCase;
pub use get_stats::GetStatsUseCase;
pub use leave_session::LeaveSessionUseCase;
pub use relay::{RelayOutcome, RelayUseCase};
pub use seek_partner::SeekPartnerUseCase;
