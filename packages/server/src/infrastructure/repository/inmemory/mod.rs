//! In-memory repositories.

mod lobby;

pub use lobby::InMemoryLobbyRepository;
