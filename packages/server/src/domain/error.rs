//! Domain errors.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("invalid client id: '{0}'")]
    InvalidClientId(String),
}

/// Lobby aggregate errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("client '{0}' is already connected")]
    AlreadyConnected(String),

    #[error("client '{0}' is not connected")]
    NotConnected(String),

    #[error("client '{0}' would be paired with itself")]
    SelfPairing(String),

    #[error("lobby invariant violated: {0}")]
    InvariantViolation(String),
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Lobby(#[from] LobbyError),
}

/// Message push errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' has no open channel")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to serialize notice: {0}")]
    Serialization(String),
}
