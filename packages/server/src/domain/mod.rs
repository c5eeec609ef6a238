//! Domain layer: the lobby aggregate, its value objects, and the ports the
//! use cases depend on.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod notice;
pub mod repository;
pub mod value_object;

pub use entity::{
    ClientSnapshot, ClientState, Departure, Lobby, LobbySnapshot, SeekOutcome, SessionEnd, Stats,
};
pub use error::{LobbyError, MessagePushError, RepositoryError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use notice::Notice;
pub use repository::LobbyRepository;
pub use value_object::{ClientId, MessageText, SignalPayload, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
