//! UseCase errors.

use thiserror::Error;

use crate::domain::{LobbyError, RepositoryError};

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("client id '{0}' is already registered")]
    DuplicateClientId(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ConnectError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Lobby(LobbyError::AlreadyConnected(id)) => {
                ConnectError::DuplicateClientId(id)
            }
            other => ConnectError::Repository(other),
        }
    }
}

/// マッチング要求のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeekError {
    #[error("client '{0}' is not connected")]
    NotConnected(String),

    #[error("pairing aborted: client '{0}' would be paired with itself")]
    SelfPairing(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for SeekError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Lobby(LobbyError::NotConnected(id)) => SeekError::NotConnected(id),
            RepositoryError::Lobby(LobbyError::SelfPairing(id)) => SeekError::SelfPairing(id),
            other => SeekError::Repository(other),
        }
    }
}
