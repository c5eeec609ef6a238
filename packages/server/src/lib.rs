//! Anonymous 1:1 matchmaking and WebRTC signaling relay.
//!
//! Clients connect over WebSocket, ask to be paired with a stranger, and then
//! exchange opaque handshake payloads, chat text and typing notices through
//! the server until one side leaves.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
