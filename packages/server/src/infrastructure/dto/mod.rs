//! Data Transfer Objects (DTOs) for the matchmaking server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (both directions)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
